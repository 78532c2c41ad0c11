use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, loaded once at startup and shared read-only.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Places searched for every query, in configured order.
    pub locations: Vec<String>,
    pub catalog_api_key: String,
    pub catalog_base_url: String,
    pub catalog_api_version: String,
    pub catalog_request_timeout_secs: u64,
    pub catalog_user_agent: String,
    /// Upper bound for a whole fan-out, shared by every location task.
    pub search_timeout_secs: u64,
    pub worker_pool_size: usize,
    pub pool_acquire_timeout_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    #[must_use]
    pub fn pool_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.pool_acquire_timeout_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("locations", &self.locations)
            .field(
                "catalog_api_key",
                &if self.catalog_api_key.is_empty() {
                    "[unset]"
                } else {
                    "[redacted]"
                },
            )
            .field("catalog_base_url", &self.catalog_base_url)
            .field("catalog_api_version", &self.catalog_api_version)
            .field(
                "catalog_request_timeout_secs",
                &self.catalog_request_timeout_secs,
            )
            .field("catalog_user_agent", &self.catalog_user_agent)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("worker_pool_size", &self.worker_pool_size)
            .field("pool_acquire_timeout_ms", &self.pool_acquire_timeout_ms)
            .finish()
    }
}
