use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" | "in-memory" => Ok(StorageKind::Memory),
            other => Err(anyhow::anyhow!("unknown STORAGE backend: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> anyhow::Result<Self> {
        let var = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or("127.0.0.1").to_string();
        let port = var("PORT")
            .unwrap_or("8080")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let storage = var("STORAGE").unwrap_or("postgres").parse()?;

        let database_url = match var("DATABASE_URL") {
            Some(url) => Some(url.to_string()),
            None => compose_database_url(&var),
        };
        if storage == StorageKind::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL or DB_USERNAME/DB_PASSWORD/DB_HOST/DB_NAME must be set");
        }

        let jwt_secret = var("JWT_SECRET_KEY")
            .or_else(|| var("JWT_SECRET"))
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET_KEY must be set"))?
            .to_string();
        let jwt_ttl_seconds: i64 = var("JWT_TTL_SECONDS")
            .unwrap_or("3600")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid JWT_TTL_SECONDS: {}", e))?;
        if jwt_ttl_seconds <= 0 {
            anyhow::bail!("JWT_TTL_SECONDS must be positive");
        }

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or("*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            jwt_secret,
            jwt_ttl_seconds,
            cors_origins,
        })
    }
}

fn compose_database_url<'a>(var: &impl Fn(&str) -> Option<&'a str>) -> Option<String> {
    let user = var("DB_USERNAME")?;
    let password = var("DB_PASSWORD")?;
    let host = var("DB_HOST")?;
    let port = var("DB_PORT").unwrap_or("5432");
    let name = var("DB_NAME")?;
    Some(format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn composes_database_url_from_parts() {
        let config = AppConfig::from_vars(&vars(&[
            ("JWT_SECRET_KEY", "secret"),
            ("DB_USERNAME", "blog"),
            ("DB_PASSWORD", "pw"),
            ("DB_HOST", "db"),
            ("DB_NAME", "blog"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://blog:pw@db:5432/blog")
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_ttl_seconds, 3600);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn database_url_wins_over_parts() {
        let config = AppConfig::from_vars(&vars(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_URL", "postgres://x@y/z"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://x@y/z"));
        assert_eq!(config.jwt_secret, "secret");
    }

    #[test]
    fn requires_secret_key() {
        let err = AppConfig::from_vars(&vars(&[("STORAGE", "memory")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET_KEY"));
    }

    #[test]
    fn memory_storage_needs_no_database() {
        let config = AppConfig::from_vars(&vars(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET_KEY", "secret"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageKind::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn postgres_storage_requires_database() {
        assert!(AppConfig::from_vars(&vars(&[("JWT_SECRET_KEY", "secret")])).is_err());
    }
}
