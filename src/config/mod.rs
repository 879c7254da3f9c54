mod basic;
mod database;

pub use basic::BasicConfig;
pub use database::DatabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP server and logging settings (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Storage settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "EXCUSE_";

impl Config {
    /// Builds a Figment that merges defaults, an optional `config.toml` and `EXCUSE_*` env vars.
    ///
    /// Nested keys use `__` as the separator, e.g. `EXCUSE_DATABASE__URL`.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts configuration from an arbitrary figment and validates it.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads configuration from the default sources.
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(&Self::figment())
    }

    fn validate(&self) -> Result<(), figment::Error> {
        if self.database.url.trim().is_empty() {
            return Err(figment::Error::from(
                "database.url must be set and non-empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(figment::Error::from(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
