//! Configuration module

use serde::{Deserialize, Serialize};

use crate::types::{Category, OperationConfig};

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display labels of the two competitors
    pub sides: SideLabels,

    /// Registered operations, in run order
    pub operations: Vec<OperationConfig>,

    /// Run settings
    pub run: RunConfig,

    /// Demo latencies for simulated providers
    pub simulation: SimulationConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Metrics exporter settings
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideLabels {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub deep_run_repetitions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub profiles: Vec<SimulationProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationProfile {
    pub operation: String,
    pub side_a_ms: u64,
    pub side_b_ms: u64,
    pub side_a_fail_every: Option<u64>,
    pub side_b_fail_every: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub listen_addr: String,
}

fn operation(id: &str, name: &str, description: &str, category: Category) -> OperationConfig {
    OperationConfig {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
    }
}

fn profile(operation: &str, side_a_ms: u64, side_b_ms: u64) -> SimulationProfile {
    SimulationProfile {
        operation: operation.to_string(),
        side_a_ms,
        side_b_ms,
        side_a_fail_every: None,
        side_b_fail_every: None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sides: SideLabels {
                a: "Prisma".to_string(),
                b: "Drizzle".to_string(),
            },
            operations: vec![
                operation(
                    "crud",
                    "CRUD Operations",
                    "Create, Read, Update, Delete single records",
                    Category::Crud,
                ),
                operation(
                    "joins",
                    "Complex Joins",
                    "3-4 table joins with users, posts, comments, and categories",
                    Category::Joins,
                ),
                operation(
                    "aggregations",
                    "Aggregations",
                    "COUNT, SUM, AVG, GROUP BY operations",
                    Category::Aggregations,
                ),
                operation(
                    "subqueries",
                    "Subqueries",
                    "Nested SELECT statements and correlated subqueries",
                    Category::Subqueries,
                ),
                operation(
                    "transactions",
                    "Transactions",
                    "Multi-operation atomic transactions",
                    Category::Transactions,
                ),
                operation(
                    "bulk",
                    "Bulk Operations",
                    "Insert, Update, Delete 100+ records at once",
                    Category::Bulk,
                ),
            ],
            run: RunConfig {
                deep_run_repetitions: 10,
            },
            simulation: SimulationConfig {
                profiles: vec![
                    profile("crud", 18, 12),
                    profile("joins", 25, 21),
                    profile("aggregations", 14, 16),
                    profile("subqueries", 11, 9),
                    profile("transactions", 30, 22),
                    profile("bulk", 60, 45),
                ],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_output: false,
            },
            metrics: MetricsConfig {
                enabled: false,
                listen_addr: "127.0.0.1:9100".to_string(),
            },
        }
    }
}

impl Config {
    /// Load config from environment
    pub fn from_env() -> anyhow::Result<Self> {
        let config_path = std::env::var("ORMBENCH_CONFIG")
            .unwrap_or_else(|_| "config/ormbench.json".to_string());

        Self::load(&config_path)
    }

    /// Load config from a JSON file, falling back to defaults if it is missing
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Simulation profile for an operation id
    pub fn profile(&self, operation: &str) -> Option<&SimulationProfile> {
        self.simulation.profiles.iter().find(|p| p.operation == operation)
    }
}
