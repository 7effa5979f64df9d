use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:4200";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Runtime settings, read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub supabase_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub server_host: String,
    pub server_port: u16,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
    pub run_migrations: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("SUPABASE_JWT_SECRET")
            .or_else(|| get("JWT_SECRET"))
            .ok_or(ConfigError::Missing("SUPABASE_JWT_SECRET"))?;

        let cors_origins = parse_origins(
            &get("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            jwt_secret,
            supabase_url: get("SUPABASE_URL"),
            cors_origins,
            environment: get("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), 8000)?,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                10,
            )?,
            database_acquire_timeout: Duration::from_secs(parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                get("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                30,
            )?),
            run_migrations: parse_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), true)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() {
            "info"
        } else {
            "debug"
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
