use serde::Deserialize;

use crate::engine::template::TemplateVocabulary;
use crate::shared::datetime::MonthNames;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub powerbi: PowerBiConfig,
    pub website: WebsiteConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub template: TemplateVocabulary,
    #[serde(default)]
    pub calendar: MonthNames,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub http_addr: String,
    /// Hex-encoded SHA-256 of the key clients send in the `Auth` header
    pub api_key_hash: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "Europe/Madrid".to_string()
}

#[derive(Debug, Deserialize)]
pub struct PowerBiConfig {
    pub url: String,
    pub resource_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay between consecutive report queries outside incremental monthly runs
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Upper bound of report queries per hour for incremental monthly runs
    #[serde(default = "default_hourly_budget")]
    pub hourly_budget: usize,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36".to_string()
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_hourly_budget() -> usize {
    500
}

#[derive(Debug, Deserialize)]
pub struct WebsiteConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

/// One statistics slice: the report dimensions it groups by and the table prefix
/// it is stored under (`<table>last_day`, `<table>monthly`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SliceConfig {
    pub dimensions: Vec<String>,
    pub table: String,
}

impl SliceConfig {
    pub fn new(dimensions: &[&str], table: &str) -> Self {
        Self {
            dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
            table: table.to_string(),
        }
    }

    pub fn last_day_table(&self) -> String {
        format!("{}last_day", self.table)
    }

    pub fn monthly_table(&self) -> String {
        format!("{}monthly", self.table)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub start_year: i32,
    pub measure_column: String,
    pub tables: Vec<SliceConfig>,
    pub check_table: String,
    pub pilgrims_table: String,
    pub templates_table: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            start_year: 2003,
            measure_column: "M0".to_string(),
            tables: default_slices(),
            check_table: "stats_camino_country_origin_last_day".to_string(),
            pilgrims_table: "stats_pilgrims_last_day".to_string(),
            templates_table: "db_queries_stats".to_string(),
        }
    }
}

pub fn default_slices() -> Vec<SliceConfig> {
    vec![
        SliceConfig::new(&["d1"], "stats_camino_"),
        SliceConfig::new(&["d2"], "stats_means_"),
        SliceConfig::new(&["d3"], "stats_gender_"),
        SliceConfig::new(&["d4"], "stats_origin_"),
        SliceConfig::new(&["d5"], "stats_country_"),
        SliceConfig::new(&["d6"], "stats_motivo_"),
        SliceConfig::new(&["d7"], "stats_age_"),
        SliceConfig::new(&["d1", "d5", "d4"], "stats_camino_country_origin_"),
    ]
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("PILGRIM_STATS_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .add_source(config::Environment::with_prefix("PILGRIM_STATS").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
