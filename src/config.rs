use std::{num::NonZeroU32, str::FromStr};

use crate::errors::AppError;

const DEFAULT_RATE_LIMIT: NonZeroU32 = NonZeroU32::new(1000).unwrap();

/// Gateway configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub port: u16,
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: NonZeroU32,
    /// When set, create/update/delete require a bearer token.
    pub require_write_auth: bool,
    pub admin_seed: Option<AdminSeed>,
    pub db_max_connections: u32,
}

/// Credentials of an admin to create (or re-hash) at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let admin_seed = match (
            std::env::var("ADMIN_USERNAME").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminSeed { username, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_days: parsed_or("TOKEN_TTL_DAYS", 7)?,
            port: parsed_or("PORT", 3001)?,
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            rate_limit_per_minute: parsed_or("RATE_LIMIT_PER_MINUTE", DEFAULT_RATE_LIMIT)?,
            require_write_auth: parsed_or("REQUIRE_WRITE_AUTH", false)?,
            admin_seed,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 5)?,
        })
    }

    /// Settings for an in-process gateway without a database, used by tests
    /// and local runs against the memory store.
    pub fn local(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: jwt_secret.into(),
            token_ttl_days: 7,
            port: 3001,
            allowed_origins: vec!["*".to_string()],
            rate_limit_per_minute: DEFAULT_RATE_LIMIT,
            require_write_auth: false,
            admin_seed: None,
            db_max_connections: 1,
        }
    }
}

fn required(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| AppError::EnvError(format!("{key} must be set")))
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::EnvError(format!("Invalid value for {key}: {raw}")))
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
