//! ORM Bench CLI
//! Head-to-head timing of two implementations per operation

use ormbench_core::report::{headline, render_deep_summaries, render_results, to_json};
use ormbench_core::{simulated_orchestrator, Config};
use std::env;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json_output {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<()> {
    if !config.metrics.enabled {
        return Ok(());
    }
    let addr: SocketAddr = config.metrics.listen_addr.parse()?;
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

fn usage() {
    println!("usage: ormbench [all | deep | single <id> | deep-one <id> | json | config <path>]");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_logging(&config)?;
    init_metrics(&config)?;

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("all");
    let target = args.get(2).map(String::as_str);

    let labels = &config.sides;
    let orchestrator = simulated_orchestrator(&config);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ORM BENCH - {:>14} vs {:<14}       ║", labels.a, labels.b);
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    match (command, target) {
        ("all", _) => {
            let report = orchestrator.run_all().await?;
            for (id, message) in &report.failed {
                error!("{} failed: {}", id, message);
            }
            print!("{}", render_results(&orchestrator.results(), labels));
        }
        ("deep", _) => {
            let summaries = orchestrator.deep_run_all().await?;
            print!("{}", render_deep_summaries(&summaries, labels));
        }
        ("single", Some(id)) => match orchestrator.run_single(id).await {
            Ok(result) => {
                print!("{}", render_results(std::slice::from_ref(&result), labels));
                if let Some(line) = headline(&result.comparison(), labels) {
                    println!("\n{}", line);
                }
            }
            Err(e) => error!("{}", e),
        },
        ("deep-one", Some(id)) => {
            let summary = orchestrator.deep_run(id).await?;
            print!("{}", render_deep_summaries(std::slice::from_ref(&summary), labels));
        }
        ("json", _) => {
            orchestrator.run_all().await?;
            println!("{}", to_json(&orchestrator.results())?);
        }
        ("config", Some(path)) => {
            config.save(path)?;
            info!("Wrote configuration to {}", path);
        }
        _ => usage(),
    }

    Ok(())
}
