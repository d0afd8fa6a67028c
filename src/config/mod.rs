use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub frontend_dir: String,
    /// Templates larger than this (bytes) get the artificial generation delay
    pub large_config_bytes: usize,
    pub generation_delay_ms: u64,
    /// How long content/variable saves are debounced before hitting the store
    pub debounce_ms: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("DB_PATH", "/data/confsmith.db"),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5").parse().unwrap_or(5),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            frontend_dir: get_env("FRONTEND_DIR", "/app/frontend"),
            large_config_bytes: get_env("LARGE_CONFIG_BYTES", "100000")
                .parse()
                .unwrap_or(100_000),
            generation_delay_ms: get_env("GENERATION_DELAY_MS", "500").parse().unwrap_or(500),
            debounce_ms: get_env("DEBOUNCE_MS", "300").parse().unwrap_or(300),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
