use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Internal error detail is only echoed back to clients while developing.
    pub const fn exposes_internal_errors(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub cache: CacheConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let port_retries = parse_var("APP_PORT_RETRIES", 5u16)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ttl_secs = parse_var("APP_CACHE_TTL_SECS", 600u64)?;
        let timeout_ms = parse_var("APP_STORE_TIMEOUT_MS", 2_000u64)?;
        let enabled = parse_flag("APP_STORE_ENABLED", true)?;
        let seed_on_start = parse_flag("APP_SEED_ON_START", true)?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                port_retries,
            },
            telemetry: TelemetryConfig { log_level },
            cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
            },
            store: StoreConfig {
                timeout: Duration::from_millis(timeout_ms),
                enabled,
                seed_on_start,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { name, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Additional consecutive ports tried when the configured one is taken.
    pub port_retries: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.socket_addr_for(self.port)
    }

    pub fn socket_addr_for(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Lifetime of computed query results.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

/// Persistent store access policy.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on any single store call before it counts as unreachable.
    pub timeout: Duration,
    pub enabled: bool,
    pub seed_on_start: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be true or false, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_PORT_RETRIES",
            "APP_LOG_LEVEL",
            "APP_CACHE_TTL_SECS",
            "APP_STORE_TIMEOUT_MS",
            "APP_STORE_ENABLED",
            "APP_SEED_ON_START",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.port_retries, 5);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.cache.ttl, Duration::from_secs(600));
        assert_eq!(config.store.timeout, Duration::from_millis(2_000));
        assert!(config.store.enabled);
        assert!(config.store.seed_on_start);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 5000));
        reset_env();
    }

    #[test]
    fn rejects_malformed_store_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_STORE_ENABLED", "maybe");
        match AppConfig::load() {
            Err(ConfigError::InvalidFlag { name, .. }) => assert_eq!(name, "APP_STORE_ENABLED"),
            other => panic!("expected invalid flag, got {other:?}"),
        }

        reset_env();
        env::set_var("APP_CACHE_TTL_SECS", "-3");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber { name: "APP_CACHE_TTL_SECS", .. })
        ));
        reset_env();
    }

    #[test]
    fn production_hides_internal_errors() {
        assert!(AppEnvironment::from_str("development").exposes_internal_errors());
        assert!(!AppEnvironment::from_str("prod").exposes_internal_errors());
        assert!(!AppEnvironment::from_str("ci").exposes_internal_errors());
    }
}
