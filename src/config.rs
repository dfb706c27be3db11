use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub reviews_path: PathBuf,
    /// Score reviews submitted over POST as well as the preloaded ones.
    pub score_on_write: bool,
    /// Largest POST body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "8000")?,
            reviews_path: try_load(&lookup, "REVIEWS_PATH", "data/reviews.csv")?,
            score_on_write: try_load(&lookup, "SCORE_ON_WRITE", "false")?,
            max_body_bytes: try_load(&lookup, "MAX_BODY_BYTES", "16777216")?,
        })
    }
}

/// Log filter from `RUST_LOG`-style directives, showing `info` and above when none are given.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::new(directives.unwrap_or("info"))
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, StartupError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        warn!("{key} not set, using default: {default}");
        default.to_string()
    });

    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| StartupError::Config {
        key,
        reason: e.to_string(),
        value,
    })
}
