use serde::Deserialize;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "recipebox".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "recipebox-web".into()),
            ttl_minutes: session_ttl_minutes(env_parse("SESSION_TTL_MINUTES")),
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session".into()),
            cookie_secure: env_parse("SESSION_COOKIE_SECURE").unwrap_or(false),
        };
        Ok(Self {
            database_url,
            max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("APP_PORT").unwrap_or(5555),
            session,
        })
    }
}

/// Non-positive values fall back to the default; large ones are capped.
fn session_ttl_minutes(raw: Option<i64>) -> i64 {
    match raw {
        Some(m) if m > 0 => m.min(MAX_SESSION_TTL_MINUTES),
        _ => DEFAULT_SESSION_TTL_MINUTES,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
