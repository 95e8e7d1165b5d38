use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::{AgriError, AgriResult};

const DEFAULT_DATABASE_URL: &str = "sqlite://agrirecord.db";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Holds the `styles/` and `images/` directories.
    pub static_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: 3000,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> AgriResult<Self> {
        Ok(Self {
            database_url: try_load("DATABASE_URL", DEFAULT_DATABASE_URL)?,
            port: try_load("PORT", DEFAULT_PORT)?,
            static_dir: try_load("STATIC_DIR", DEFAULT_STATIC_DIR)?,
            log_filter: try_load("RUST_LOG", DEFAULT_LOG_FILTER)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AgriResult<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| AgriError::Config(format!("Invalid {key} value {raw:?}: {e}")))
}
