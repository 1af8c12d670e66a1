/// Configuration management for Update Post Service
///
/// Settings come from environment variables (a `.env` file is loaded first
/// when present). AWS credentials and region are resolved by `aws-config`.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Table holding post records
pub const DEFAULT_POSTS_TABLE: &str = "posts";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// DynamoDB configuration
    pub dynamodb: DynamoDbConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

/// DynamoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamoDbConfig {
    /// Posts table name
    pub table_name: String,
    /// Endpoint override, e.g. DynamoDB Local
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        // The Lambda Web Adapter hands the listener port over in PORT
        let port = match std::env::var("UPDATE_POST_SERVICE_PORT") {
            Ok(raw) => parse_value("UPDATE_POST_SERVICE_PORT", &raw)?,
            Err(_) => parse_env_or_default("PORT", 8080)?,
        };

        let table_name = std::env::var("POSTS_TABLE_NAME")
            .unwrap_or_else(|_| DEFAULT_POSTS_TABLE.to_string());
        if table_name.trim().is_empty() {
            return Err("POSTS_TABLE_NAME cannot be empty".to_string());
        }

        let endpoint_url = std::env::var("DYNAMODB_ENDPOINT_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if endpoint_url.is_some() && app_env.eq_ignore_ascii_case("production") {
            return Err("DYNAMODB_ENDPOINT_URL must not be set in production".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("UPDATE_POST_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
                json_logs: std::env::var("LOG_FORMAT")
                    .map(|v| v.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            },
            dynamodb: DynamoDbConfig {
                table_name,
                endpoint_url,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => parse_value(key, &val),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, val: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    val.trim()
        .parse()
        .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e))
}
