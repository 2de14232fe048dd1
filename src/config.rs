use std::{env, fmt, str::FromStr};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("APP_PORT", 3000)?;
        let jwt_ttl_secs = positive("JWT_TTL_SECONDS", env_or("JWT_TTL_SECONDS", 3600)?)?;
        let db_max_connections = positive("DB_MAX_CONNECTIONS", env_or("DB_MAX_CONNECTIONS", 10)?)?;
        let db_acquire_timeout_secs = env_or("DB_ACQUIRE_TIMEOUT_SECONDS", 5)?;
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            database_url,
            db_max_connections,
            db_acquire_timeout_secs,
            host,
            port,
            jwt_secret,
            jwt_ttl_secs,
            cors_allowed_origins,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, env::var(key).ok().as_deref(), default)
}

/// `default` when unset or blank; a value that does not parse is an error.
fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value `{value}`")),
        None => Ok(default),
    }
}

fn positive<T>(key: &str, value: T) -> anyhow::Result<T>
where
    T: PartialOrd + Default + fmt::Display,
{
    if value <= T::default() {
        anyhow::bail!("{key} must be greater than zero, got {value}");
    }
    Ok(value)
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_or, parse_origins, positive};

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let origins = parse_origins(" http://localhost:5173, ,https://shop.example.com ");
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://shop.example.com".to_string()
            ]
        );
    }

    #[test]
    fn empty_origin_list() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn unset_or_blank_values_use_the_default() {
        assert_eq!(parse_or::<i64>("JWT_TTL_SECONDS", None, 3600).unwrap(), 3600);
        assert_eq!(parse_or::<i64>("JWT_TTL_SECONDS", Some("  "), 3600).unwrap(), 3600);
        assert_eq!(parse_or::<u16>("APP_PORT", Some("8080"), 3000).unwrap(), 8080);
    }

    #[test]
    fn unparsable_values_are_errors() {
        let err = parse_or::<i64>("JWT_TTL_SECONDS", Some("an hour"), 3600).unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_SECONDS"));
        assert!(parse_or::<u16>("APP_PORT", Some("70000"), 3000).is_err());
    }

    #[test]
    fn ttl_must_be_positive() {
        let ttl = parse_or::<i64>("JWT_TTL_SECONDS", Some("-60"), 3600).unwrap();
        assert!(positive("JWT_TTL_SECONDS", ttl).is_err());
        assert!(positive("JWT_TTL_SECONDS", 0i64).is_err());
        assert_eq!(positive("JWT_TTL_SECONDS", 60i64).unwrap(), 60);
    }
}
