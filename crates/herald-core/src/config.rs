use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::HeraldError;

/// Top-level config (herald.toml + HERALD_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub scheduler: ScheduleTuning,
    #[serde(default)]
    pub retry: RetryConfig,
    pub source: SourceConfig,
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Minute thresholds driving the execution-mode decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleTuning {
    /// Recurrence intervals shorter than this many minutes are not honoured
    /// as periodic; the job falls through to the daily rules instead.
    #[serde(default = "default_ignore_threshold")]
    pub ignore_threshold_mins: u32,
    /// A daily trigger missed by at most this many minutes still runs today.
    #[serde(default = "default_catch_up")]
    pub catch_up_mins: u32,
}

impl Default for ScheduleTuning {
    fn default() -> Self {
        Self {
            ignore_threshold_mins: default_ignore_threshold(),
            catch_up_mins: default_catch_up(),
        }
    }
}

/// Delivery retry settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first delivery attempt. An always-failing delivery
    /// is attempted `max_retries + 1` times in total.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff unit in seconds, doubled after every failed attempt.
    #[serde(default = "default_retry_base")]
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_secs: default_retry_base(),
        }
    }
}

/// Report API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the report API, without trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

/// One configured report job, as written in herald.toml.
///
/// Entries are validated into [`crate::job::JobSpec`] at startup; a bad
/// entry is skipped without affecting the rest of the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Identifier the report API understands.
    pub report: String,
    /// Telegram chat the rendered report is delivered to.
    pub chat_id: String,
    /// Human-readable label used in rendered output.
    pub name: String,
    /// Daily trigger time, "HH:MM" 24-hour local wall clock.
    pub time: String,
    /// Optional recurrence interval in minutes. Absent or zero means
    /// "run once daily at `time`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_mins: Option<u32>,
}

fn default_ignore_threshold() -> u32 {
    30
}
fn default_catch_up() -> u32 {
    15
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_base() -> u64 {
    1
}

impl HeraldConfig {
    /// Load config from a TOML file with HERALD_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.herald/herald.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: HeraldConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("HERALD_").split("_"))
            .extract()
            .map_err(|e| HeraldError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.herald/herald.toml", home)
}
