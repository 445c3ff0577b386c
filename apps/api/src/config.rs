use anyhow::{Context, Result};

use crate::auth::token::{SigningSecret, PLACEHOLDER_SECRET};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: SigningSecret,
    pub port: u16,
    pub rust_log: String,
    /// Browser origins allowed by CORS. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `DATABASE_URL` wins;
    /// otherwise the URL is assembled from the `DB_*` parts.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&get)?,
        };

        Ok(Config {
            database_url,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            jwt_secret: SigningSecret::new(
                get("JWT_SECRET").unwrap_or_else(|| PLACEHOLDER_SECRET.to_string()),
            ),
            port: parse_or(&get, "PORT", 5000)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn database_url_from_parts(get: &impl Fn(&str) -> Option<String>) -> Result<String> {
    let host = get("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port: u16 = parse_or(get, "DB_PORT", 5432)?;
    let user = get("DB_USER")
        .context("Either DATABASE_URL or DB_USER must be set")?;
    let name = get("DB_NAME")
        .context("Either DATABASE_URL or DB_NAME must be set")?;

    Ok(match get("DB_PASSWORD") {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        None => format!("postgres://{user}@{host}:{port}/{name}"),
    })
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
