use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Default location of the SQLite database inside the add-on container.
const DEFAULT_DB_PATH: &str = "/data/habits.db";

pub struct Config {
    pub port: u16,
    pub database_path: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("HABITS_PORT", "5000"),
            database_path: try_load("HABITS_DB_PATH", DEFAULT_DB_PATH),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
