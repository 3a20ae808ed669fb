use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub db: DbConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = DbConfig {
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&get, "DB_PORT", 3306)?,
            user: get("DB_USER").context("DB_USER must be set")?,
            password: get("DB_PASS").unwrap_or_default(),
            name: get("DB_NAME").context("DB_NAME must be set")?,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
        };
        Ok(Self {
            db,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 3000)?,
        })
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        None => Ok(default),
    }
}
