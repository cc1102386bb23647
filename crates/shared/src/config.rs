//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Association settings.
    #[serde(default)]
    pub copro: CoproConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings of the association itself.
#[derive(Debug, Clone, Deserialize)]
pub struct CoproConfig {
    /// Display name of the association.
    #[serde(default = "default_name")]
    pub name: String,
    /// Tantièmes of the whole building, the base of articles 25 and 26.
    #[serde(default = "default_total_weight")]
    pub total_weight: u32,
    /// Currency code used on statements.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Optional JSON dataset loaded at startup.
    #[serde(default)]
    pub seed_path: Option<String>,
}

fn default_name() -> String {
    "Copropriété".to_string()
}

fn default_total_weight() -> u32 {
    1000
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Default for CoproConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            total_weight: default_total_weight(),
            currency: default_currency(),
            seed_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "copro=debug,copro_api=debug,tower_http=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("COPRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
