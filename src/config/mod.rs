use serde::{Deserialize, Serialize};
use sqlx::postgres::PgSslMode;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// One year. Anything longer is a misconfiguration.
pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingJwtSecret,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub sslmode: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub jwt_issuer: String,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
}

impl DatabaseConfig {
    pub fn ssl_mode(&self) -> PgSslMode {
        match self.sslmode.as_str() {
            "require" => PgSslMode::Require,
            "prefer" => PgSslMode::Prefer,
            "allow" => PgSslMode::Allow,
            "verify-ca" => PgSslMode::VerifyCa,
            "verify-full" => PgSslMode::VerifyFull,
            _ => PgSslMode::Disable,
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = parse("DB_PORT", &v)?;
        }
        if let Some(v) = lookup("DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DB_SSLMODE") {
            let mode = v.trim().to_ascii_lowercase();
            match mode.as_str() {
                "disable" | "allow" | "prefer" | "require" | "verify-ca" | "verify-full" => {
                    self.database.sslmode = mode;
                }
                _ => return Err(ConfigError::InvalidValue { key: "DB_SSLMODE", value: v }),
            }
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECT_ATTEMPTS") {
            self.database.connect_attempts = parse("DATABASE_CONNECT_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_RETRY_DELAY_SECS") {
            self.database.retry_delay_secs = parse("DATABASE_RETRY_DELAY_SECS", &v)?;
        }

        // API overrides
        if let Some(v) = lookup("API_HOST") {
            self.api.host = v;
        }
        if let Some(v) = lookup("MARKETPLACE_API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = parse("MARKETPLACE_API_PORT", &v)?;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse("API_MAX_REQUEST_SIZE_BYTES", &v)?;
        }

        // Security overrides
        self.security.jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;
        if let Some(v) = lookup("JWT_EXPIRY_HOURS") {
            let hours: i64 = parse("JWT_EXPIRY_HOURS", &v)?;
            if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&hours) {
                return Err(ConfigError::InvalidValue {
                    key: "JWT_EXPIRY_HOURS",
                    value: v,
                });
            }
            self.security.jwt_expiry_hours = hours;
        }
        if let Some(v) = lookup("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Some(v) = lookup("BCRYPT_COST") {
            self.security.bcrypt_cost = parse("BCRYPT_COST", &v)?;
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse("SECURITY_ENABLE_CORS", &v)?;
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::defaults(10),
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                jwt_issuer: "go-marketplace".to_string(),
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig::defaults(20),
            ..Self::development()
        }
    }

    fn production() -> Self {
        let mut config = Self {
            environment: Environment::Production,
            database: DatabaseConfig::defaults(50),
            ..Self::development()
        };
        config.api.max_request_size_bytes = 256 * 1024;
        config.security.enable_cors = false;
        config
    }
}

impl DatabaseConfig {
    fn defaults(max_connections: u32) -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "marketplace".to_string(),
            sslmode: "disable".to_string(),
            max_connections,
            connect_attempts: 10,
            retry_delay_secs: 2,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
