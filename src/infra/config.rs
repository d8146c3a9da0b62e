//! Centralized configuration (environment variables + defaults).

use std::str::FromStr;

use anyhow::{anyhow, Context};

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Runtime environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(anyhow!("unknown APP_ENV '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match var("APP_ENV") {
            Some(v) => v.parse()?,
            None => Environment::Dev,
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(var("PORT"), "PORT", 3000u16)?;
        let max_connections = parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5u32)?.max(1);

        let database_url = if environment == Environment::Test {
            DEFAULT_DATABASE_URL.to_string()
        } else if let Some(url) = var("DATABASE_URL") {
            url
        } else if let Some(db_host) = var("DB_HOST") {
            let db_port = parse_or(var("DB_PORT"), "DB_PORT", 5432u16)?;
            format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USERNAME").unwrap_or_default(),
                var("DB_PASSWORD").unwrap_or_default(),
                db_host,
                db_port,
                var("DB_NAME").unwrap_or_default(),
            )
        } else {
            DEFAULT_DATABASE_URL.to_string()
        };

        Ok(Self {
            environment,
            host,
            port,
            database_url,
            max_connections,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number, got '{}'", key, v)),
        None => Ok(default),
    }
}
