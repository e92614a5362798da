//! Configuration for Masterblog
//!
//! Centralized configuration with sensible defaults. Values can come from
//! code (builder), the environment (`Config::from_env`) or the server's CLI
//! flags, in increasing order of precedence.

use std::path::PathBuf;

use crate::error::{BlogError, Result};

/// Main configuration for a Masterblog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON file holding the array of posts
    pub storage_file: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    // -------------------------------------------------------------------------
    // Security Configuration
    // -------------------------------------------------------------------------
    /// Shared secret expected in `X-API-Key` or `?api_key=`.
    /// With no key configured every request is rejected unless `debug` is set.
    pub api_key: Option<String>,

    /// Debug mode: skips API-key authentication
    pub debug: bool,

    /// Requests allowed per client IP per minute (0 disables limiting)
    pub rate_limit_per_minute: u32,

    // -------------------------------------------------------------------------
    // Query Configuration
    // -------------------------------------------------------------------------
    /// Page size used when `per_page` is not given (at least 1)
    pub default_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_file: PathBuf::from("./posts_storage.json"),
            listen_addr: "127.0.0.1:5001".to_string(),
            api_key: None,
            debug: false,
            rate_limit_per_minute: 10,
            default_per_page: 5,
        }
    }
}

impl Config {
    // =========================================================================
    // Environment Variable Names
    // =========================================================================
    pub const ENV_STORAGE_FILE: &'static str = "MASTERBLOG_STORAGE_FILE";
    pub const ENV_LISTEN_ADDR: &'static str = "MASTERBLOG_LISTEN_ADDR";
    pub const ENV_API_KEY: &'static str = "API_KEY";
    pub const ENV_DEBUG: &'static str = "DEBUG";
    pub const ENV_RATE_LIMIT: &'static str = "RATE_LIMIT_PER_MINUTE";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment win over it.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(Self::ENV_STORAGE_FILE) {
            config.storage_file = PathBuf::from(path);
        }
        if let Some(addr) = lookup(Self::ENV_LISTEN_ADDR) {
            config.listen_addr = addr;
        }
        config.api_key = lookup(Self::ENV_API_KEY).filter(|key| !key.is_empty());
        if let Some(raw) = lookup(Self::ENV_DEBUG) {
            config.debug = parse_flag(&raw);
        }
        if let Some(raw) = lookup(Self::ENV_RATE_LIMIT) {
            config.rate_limit_per_minute = raw.trim().parse().map_err(|_| {
                BlogError::Config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    Self::ENV_RATE_LIMIT,
                    raw
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from an existing config instead of the defaults
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the JSON storage file
    pub fn storage_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_file = path.into();
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Enable or disable debug mode
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the per-client request budget per minute
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.config.rate_limit_per_minute = limit;
        self
    }

    /// Set the default page size for listings (0 is raised to 1)
    pub fn default_per_page(mut self, per_page: usize) -> Self {
        self.config.default_per_page = per_page.max(1);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.storage_file, PathBuf::from("./posts_storage.json"));
        assert_eq!(config.rate_limit_per_minute, 10);
        assert!(config.api_key.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MASTERBLOG_STORAGE_FILE", "/tmp/posts.json"),
            ("API_KEY", "secret"),
            ("DEBUG", "Yes"),
            ("RATE_LIMIT_PER_MINUTE", "20"),
        ]))
        .unwrap();

        assert_eq!(config.storage_file, PathBuf::from("/tmp/posts.json"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(config.debug);
        assert_eq!(config.rate_limit_per_minute, 20);
    }

    #[test]
    fn test_from_lookup_rejects_bad_rate_limit() {
        let result = Config::from_lookup(lookup_from(&[("RATE_LIMIT_PER_MINUTE", "lots")]));

        assert!(matches!(result, Err(BlogError::Config(_))));
    }

    #[test]
    fn test_zero_default_per_page_is_raised_to_one() {
        let config = Config::builder().default_per_page(0).build();

        assert_eq!(config.default_per_page, 1);
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "")])).unwrap();

        assert!(config.api_key.is_none());
    }
}
