use crate::config::LedgerConfig;
use crate::config::logging::LoggingConfig;
use crate::config::server::ServerConfig;
use crate::config::store::StoreConfig;
use crate::error::{Error, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        Self::load_from(Path::new("config"), env)
    }

    /// Layers `<dir>/default`, then `<dir>/<env>`, then `POINTLEDGER__*`
    /// environment variables. Missing files fall back to defaults.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(env)).required(false))
            .add_source(Environment::with_prefix("POINTLEDGER").separator("__"))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}
