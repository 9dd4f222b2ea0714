use crate::domain::db_config::DbConfig;
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_PREFIX: &str = "DB_";
pub const DEFAULT_CONFIG_FILE: &str = "colorfreq.toml";

/// Settings taken verbatim from the environment; `Env` would parse `007` as a number.
const TEXT_KEYS: [&str; 4] = ["host", "user", "password", "name"];

/// Resolves database settings: defaults, then an optional TOML file, then `DB_*` env vars.
pub struct ConfigService {
    config_file: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn with_config_file(path: impl AsRef<Path>) -> Self {
        Self {
            config_file: path.as_ref().to_path_buf(),
        }
    }

    /// Load `.env` into the process environment, then resolve the settings.
    pub fn load(&self) -> Result<DbConfig> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable .env file"),
        }

        self.resolve(env_overrides())
    }

    fn resolve(&self, overrides: Figment) -> Result<DbConfig> {
        let config: DbConfig = Figment::from(Serialized::defaults(DbConfig::default()))
            .merge(Toml::file(&self.config_file))
            .merge(overrides)
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Invalid database settings: {}", e)))?;

        debug!(config = ?config, "Resolved database settings");
        Ok(config)
    }
}

/// `DB_PORT` goes through figment's `Env` parsing; the text settings are read raw.
fn env_overrides() -> Figment {
    let mut figment = Figment::new().merge(Env::prefixed(ENV_PREFIX).only(&["port"]));

    for key in TEXT_KEYS {
        let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
        if let Ok(value) = std::env::var(&var) {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    figment
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
