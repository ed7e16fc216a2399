// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials for the admin account seeded at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    pub admin: Option<AdminSeed>,
    pub seed_sample_events: bool,
    /// Base URL of the remote blog API (serves `/posts` and `/posts/{id}`).
    pub posts_api_url: String,
    /// How long a fetched post collection is served before refetching, in seconds.
    pub posts_cache_ttl: u64,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://eventhub.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let admin = match (
            env::var("ADMIN_EMAIL").ok(),
            env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed {
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 7 * 24 * 60 * 60)?,
            rust_log,
            port: parse_var("PORT", 5000)?,
            admin,
            seed_sample_events: parse_var("SEED_SAMPLE_EVENTS", true)?,
            posts_api_url: env::var("POSTS_API_URL")
                .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".to_string()),
            posts_cache_ttl: parse_var("POSTS_CACHE_TTL", 3600)?,
            cors_origins,
        })
    }
}

/// Reads `name` and parses it, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
