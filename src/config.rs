// src/config.rs
// Environment-driven configuration; .env values are picked up first.

use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub journal_path: String,
    pub sqlite_max_connections: u32,
    pub store_timeout_secs: u64,
    pub log_level: String,
}

fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Missing .env is fine; plain environment variables still apply.
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("CALCD_HOST", "0.0.0.0".to_string()),
            port: env_var_or("CALCD_PORT", 8496),
            database_url: env_var_or("DATABASE_URL", "sqlite:calcd.db".to_string()),
            journal_path: env_var_or("CALCD_JOURNAL_PATH", "calcd-journal.jsonl".to_string()),
            sqlite_max_connections: env_var_or("CALCD_SQLITE_MAX_CONNECTIONS", 5),
            store_timeout_secs: env_var_or("CALCD_STORE_TIMEOUT_SECS", 10),
            log_level: env_var_or("CALCD_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::from_env();
        assert!(!config.database_url.is_empty());
        assert!(!config.journal_path.is_empty());
        assert!(config.sqlite_max_connections > 0);
        assert!(config.store_timeout_secs > 0);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 8496,
            database_url: "sqlite::memory:".into(),
            journal_path: "journal.jsonl".into(),
            sqlite_max_connections: 1,
            store_timeout_secs: 5,
            log_level: "info".into(),
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8496");
    }
}
