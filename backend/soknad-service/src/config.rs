/// Configuration management for soknad-service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use std::fmt;

use crate::services::DecodeErrorPolicy;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// NAIS cluster the service runs in (dev-gcp, prod-gcp, ...)
    pub cluster_name: String,
    /// HTTP port for health checks and metrics
    pub http_port: u16,
}

impl AppConfig {
    pub fn decode_error_policy(&self) -> DecodeErrorPolicy {
        DecodeErrorPolicy::for_cluster(&self.cluster_name)
    }
}

/// Database configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Kafka consumer configuration
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub group_id: String,
    pub soknad_topic: String,
    pub auto_offset_reset: String,
    /// Delay before a failed consumer session is recreated
    pub restart_delay_secs: u64,
    pub tls: Option<KafkaTlsConfig>,
}

/// PEM files for mTLS towards the brokers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaTlsConfig {
    pub ca_path: String,
    pub certificate_path: String,
    pub private_key_path: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            cluster_name: std::env::var("NAIS_CLUSTER_NAME")
                .unwrap_or_else(|_| "local".to_string()),
            http_port: env_or("PORT", 8080),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            min_connections: env_or("DB_MIN_CONNECTIONS", 1),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 10),
        };

        let brokers = std::env::var("KAFKA_BROKERS")
            .context("KAFKA_BROKERS environment variable not set")?;
        if brokers.trim().is_empty() {
            anyhow::bail!("KAFKA_BROKERS is empty");
        }

        let tls = match (
            std::env::var("KAFKA_CA_PATH").ok(),
            std::env::var("KAFKA_CERTIFICATE_PATH").ok(),
            std::env::var("KAFKA_PRIVATE_KEY_PATH").ok(),
        ) {
            (Some(ca_path), Some(certificate_path), Some(private_key_path)) => {
                Some(KafkaTlsConfig {
                    ca_path,
                    certificate_path,
                    private_key_path,
                })
            }
            _ => None,
        };

        let kafka = KafkaConfig {
            brokers,
            group_id: std::env::var("KAFKA_CONSUMER_GROUP")
                .unwrap_or_else(|_| "soknad-service".to_string()),
            soknad_topic: std::env::var("KAFKA_SOKNAD_TOPIC")
                .unwrap_or_else(|_| "flex.sykepengesoknad".to_string()),
            auto_offset_reset: std::env::var("KAFKA_AUTO_OFFSET_RESET")
                .unwrap_or_else(|_| "earliest".to_string()),
            restart_delay_secs: env_or("KAFKA_RESTART_DELAY_SECS", 10),
            tls,
        };

        Ok(Config {
            app,
            database,
            kafka,
        })
    }
}
