//! Configuration management for the Ferry ETA Service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (dock registry, fleet allow-list, speed table)
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FERRY_ prefix

use std::collections::HashMap;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DockLocation;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Vessel position feed configuration
    pub positions: PositionFeedConfig,

    /// Weather feed configuration
    pub weather: WeatherFeedConfig,

    /// Reasoning service configuration
    pub reasoning: ReasoningConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Tracked fleet configuration
    #[serde(default)]
    pub fleet: FleetConfig,

    /// Registry of known dock locations
    #[serde(default = "default_docks")]
    pub docks: Vec<DockLocation>,

    /// Operator baseline cruising speeds
    #[serde(default)]
    pub speeds: SpeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PositionFeedConfig {
    /// Position feed base URL
    pub base_url: String,

    /// Position feed API key (sent as a subscription-key header)
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_feed_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherFeedConfig {
    /// Weather feed base URL
    pub base_url: String,

    /// Weather feed API key (sent as a query parameter)
    pub api_key: String,

    /// Fixed location query for current conditions
    #[serde(default = "default_weather_location")]
    pub location: String,

    /// Request timeout in seconds
    #[serde(default = "default_feed_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReasoningConfig {
    /// Reasoning service base URL (OpenAI-compatible)
    #[serde(default = "default_reasoning_base_url")]
    pub base_url: String,

    /// Reasoning service API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Request timeout in seconds, separate from the feed timeouts and
    /// short enough to keep the degraded fallback useful interactively
    #[serde(default = "default_reasoning_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Allowed request origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FleetConfig {
    /// Vessel identifiers the system tracks; all other telemetry is discarded
    #[serde(default = "default_fleet")]
    pub vessels: Vec<String>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            vessels: default_fleet(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeedConfig {
    /// Baseline cruising speed per operator, km/h
    #[serde(default = "default_baseline_table")]
    pub baseline_kph: HashMap<String, f64>,

    /// Baseline for operators not in the table, km/h
    #[serde(default = "default_baseline_kph")]
    pub default_kph: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            baseline_kph: default_baseline_table(),
            default_kph: default_baseline_kph(),
        }
    }
}

fn default_feed_timeout_secs() -> u64 {
    10
}

fn default_reasoning_timeout_secs() -> u64 {
    8
}

fn default_weather_location() -> String {
    "Auckland".to_string()
}

fn default_reasoning_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Auckland harbour dock registry. Small and static; overridable via config.
fn default_docks() -> Vec<DockLocation> {
    vec![
        DockLocation::new("Downtown Ferry Terminal", -36.8429, 174.7668),
        DockLocation::new("Devonport Wharf", -36.8382, 174.7953),
        DockLocation::new("Bayswater Wharf", -36.8240, 174.7659),
        DockLocation::new("Birkenhead Wharf", -36.8217, 174.7330),
        DockLocation::new("Half Moon Bay Marina", -36.8797, 174.8933),
        DockLocation::new("Matiatia Wharf", -36.7794, 174.9901),
        DockLocation::new("Hobsonville Point Wharf", -36.7907, 174.6636),
        DockLocation::new("Gulf Harbour Marina", -36.6230, 174.7920),
    ]
}

/// The tracked fleet. The feed publishes uppercase vessel names.
fn default_fleet() -> Vec<String> {
    [
        "KEA",
        "KORORA",
        "TIRI KAT",
        "QUICKCAT",
        "SUPERFLYTE",
        "DISCOVERY II",
        "ISLAND NAVIGATOR",
        "SEABRIDGE",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_baseline_table() -> HashMap<String, f64> {
    HashMap::from([
        ("FULLERS".to_string(), 28.0),
        ("SEALINK".to_string(), 21.0),
        ("EXPLORE".to_string(), 24.0),
        ("BELAIRE".to_string(), 22.0),
    ])
}

fn default_baseline_kph() -> f64 {
    20.0
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FERRY_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FERRY_ prefix)
            .add_source(
                Environment::with_prefix("FERRY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("fleet.vessels"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with. Failing here at
    /// startup keeps these out of the per-request path entirely.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.docks.is_empty() {
            return Err(ConfigError::Message(
                "dock registry must contain at least one dock".to_string(),
            ));
        }
        if self.speeds.default_kph <= 0.0 {
            return Err(ConfigError::Message(
                "speeds.default_kph must be positive".to_string(),
            ));
        }
        if let Some((operator, speed)) = self
            .speeds
            .baseline_kph
            .iter()
            .find(|(_, speed)| **speed <= 0.0)
        {
            return Err(ConfigError::Message(format!(
                "baseline speed for {} must be positive, got {}",
                operator, speed
            )));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
