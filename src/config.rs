//! Server configuration parsed from environment variables.
//!
//! A `.env` file in the working directory is loaded first when present.
//! Unparseable values fall back to their defaults rather than failing startup.

use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://food_data.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCALE_READ_SIZE: usize = 7;
pub const DEFAULT_SCALE_FALLBACK_WEIGHT: f64 = 10.0;
pub const DEFAULT_UPDATES_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Directory holding the dashboard stylesheet, served under `/static`.
    pub static_dir: PathBuf,
    /// Serial device the scale is attached to. `None` disables the reader.
    pub scale_device: Option<PathBuf>,
    /// Bytes requested per scale read.
    pub scale_read_size: usize,
    pub scale_fallback_weight: f64,
    pub updates_capacity: usize,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `DATABASE_URL`: default `sqlite://food_data.db?mode=rwc`
    /// - `PORT`: default 8000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `STATIC_DIR`: default `<crate>/static`
    /// - `SCALE_DEVICE`: unset disables the scale reader
    /// - `SCALE_READ_SIZE`: default 7
    /// - `SCALE_FALLBACK_WEIGHT`: default 10.0
    /// - `UPDATES_CHANNEL_CAPACITY`: default 64
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = non_empty(get("DATABASE_URL")).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let static_dir = non_empty(get("STATIC_DIR"))
            .map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"), PathBuf::from);
        let scale_device = non_empty(get("SCALE_DEVICE")).map(PathBuf::from);

        Self {
            database_url,
            port: parse_or(get("PORT"), DEFAULT_PORT),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS),
            static_dir,
            scale_device,
            scale_read_size: parse_or(get("SCALE_READ_SIZE"), DEFAULT_SCALE_READ_SIZE),
            scale_fallback_weight: parse_or(get("SCALE_FALLBACK_WEIGHT"), DEFAULT_SCALE_FALLBACK_WEIGHT),
            updates_capacity: parse_or(get("UPDATES_CHANNEL_CAPACITY"), DEFAULT_UPDATES_CHANNEL_CAPACITY),
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
