//! Server settings
//!
//! Built-in defaults, then an optional `cafe.toml` (or the file named by
//! `CAFE_CONFIG`), then `CAFE_*` environment variables. Later layers win.

use anyhow::{bail, Context, Result};
use config::{Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_KEY: &str = "TopSecretAPIKey";
const DEFAULT_CONFIG_FILE: &str = "cafe.toml";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub database_path: String,
    /// Shared secret for `/report-closed`.
    pub api_key: String,
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let file =
            std::env::var("CAFE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(
            File::with_name(&file).required(false),
            Environment::with_prefix("CAFE"),
        )
    }

    fn from_sources(
        file: File<config::FileSourceFile, config::FileFormat>,
        env: Environment,
    ) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("database_path", "cafes.db")?
            .set_default("api_key", DEFAULT_API_KEY)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if settings.api_key.trim().is_empty() {
            bail!("Invalid configuration: api_key must not be empty");
        }
        Ok(settings)
    }

    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }
}

/// Level to start logging at, whether or not the settings loaded.
pub fn startup_log_level(loaded: &Result<Settings>) -> &str {
    match loaded {
        Ok(settings) => &settings.log_level,
        Err(_) => DEFAULT_LOG_LEVEL,
    }
}
