use crate::storage::LocalStorage;
use chrono::NaiveDateTime;
use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_COUNTDOWN_TARGET: &str = "2026-01-01T00:00:00";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub countdown_target: NaiveDateTime,
    pub quote_hour: u32,
    pub storage_quota: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let countdown_target = env::var("APP_COUNTDOWN_TARGET")
            .ok()
            .and_then(|value| parse_target(&value))
            .unwrap_or_else(default_target);

        Self {
            port: parsed_var("PORT").unwrap_or(8080),
            data_path: resolve_data_path(),
            countdown_target,
            quote_hour: parsed_var::<u32>("APP_QUOTE_HOUR")
                .filter(|hour| *hour < 24)
                .unwrap_or(22),
            storage_quota: parsed_var("APP_STORAGE_QUOTA").unwrap_or(LocalStorage::DEFAULT_QUOTA),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/state.json")
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring invalid {name}={value}");
            None
        }
    }
}

fn parse_target(value: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M:%S");
    if parsed.is_err() {
        warn!("ignoring invalid APP_COUNTDOWN_TARGET={value}");
    }
    parsed.ok()
}

fn default_target() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(DEFAULT_COUNTDOWN_TARGET, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_default()
}
