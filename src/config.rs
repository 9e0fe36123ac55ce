//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Prefix of generated short URLs (default: `http://localhost:3000`)
//! - `CODE_LENGTH` - Generated code length (default: 6, range: 1-32)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RANKING_QUEUE_CAPACITY` - Ranking event buffer size (default: 10000, min: 100)
//! - `RANKING_MAX_RETRIES` - Retries per failed increment (default: 3, max: 10)
//! - `BLOCKED_DOMAINS` - Comma-separated block list (default: `example.com,malicious.com`)
//! - `SELF_DOMAINS` - Comma-separated hosts of this service (default: `localhost,127.0.0.1`)
//! - `UPGRADE_HTTP` - Rewrite `http` URLs to `https` (default: `true`)
//!
//! ```bash
//! export BASE_URL="https://sho.rt"
//! export BLOCKED_DOMAINS="malicious.com,phishing.net"
//! ```

use anyhow::Result;
use std::env;

use crate::utils::url_validator::UrlValidator;

const DEFAULT_BLOCKED_DOMAINS: &str = "example.com,malicious.com";
const DEFAULT_SELF_DOMAINS: &str = "localhost,127.0.0.1";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public prefix of short URLs. Its host is treated as self-referential.
    pub base_url: String,
    pub code_length: usize,
    pub log_level: String,
    pub log_format: String,
    pub ranking_queue_capacity: usize,
    /// Retries after the first failed attempt of a ranking increment.
    pub ranking_max_retries: usize,
    pub blocked_domains: Vec<String>,
    pub self_domains: Vec<String>,
    pub upgrade_http: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            code_length: 6,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            ranking_queue_capacity: 10_000,
            ranking_max_retries: 3,
            blocked_domains: parse_list(DEFAULT_BLOCKED_DOMAINS),
            self_domains: parse_list(DEFAULT_SELF_DOMAINS),
            upgrade_http: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable numeric values fall back to their defaults;
    /// range checks happen in [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let base_url = env::var("BASE_URL").unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let code_length = env::var("CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.code_length);

        let ranking_queue_capacity = env::var("RANKING_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ranking_queue_capacity);

        let ranking_max_retries = env::var("RANKING_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ranking_max_retries);

        let blocked_domains = env::var("BLOCKED_DOMAINS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.blocked_domains);

        let self_domains = env::var("SELF_DOMAINS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.self_domains);

        let upgrade_http = env::var("UPGRADE_HTTP")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.upgrade_http);

        Ok(Self {
            listen_addr,
            base_url,
            code_length,
            log_level,
            log_format,
            ranking_queue_capacity,
            ranking_max_retries,
            blocked_domains,
            self_domains,
            upgrade_http,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `ranking_queue_capacity` is outside 100-1000000
    /// - `code_length` is outside 1-32
    /// - `ranking_max_retries` is greater than 10
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `base_url` is not an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.ranking_queue_capacity < 100 {
            anyhow::bail!(
                "RANKING_QUEUE_CAPACITY must be at least 100, got {}",
                self.ranking_queue_capacity
            );
        }

        if self.ranking_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "RANKING_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.ranking_queue_capacity
            );
        }

        if self.code_length == 0 || self.code_length > 32 {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and 32, got {}",
                self.code_length
            );
        }

        if self.ranking_max_retries > 10 {
            anyhow::bail!(
                "RANKING_MAX_RETRIES must be at most 10, got {}",
                self.ranking_max_retries
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => anyhow::bail!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            ),
        }

        Ok(())
    }

    /// Builds the URL validator described by this configuration.
    pub fn url_validator(&self) -> UrlValidator {
        UrlValidator::new(&self.blocked_domains, &self.self_domains, self.upgrade_http)
            .with_service_url(&self.base_url)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Ranking queue capacity: {}", self.ranking_queue_capacity);
        tracing::info!("  Ranking max retries: {}", self.ranking_max_retries);
        tracing::info!("  Blocked domains: {}", self.blocked_domains.join(", "));
        tracing::info!("  Self domains: {}", self.self_domains.join(", "));
        tracing::info!("  Upgrade http: {}", self.upgrade_http);
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "BASE_URL",
        "CODE_LENGTH",
        "LOG_FORMAT",
        "RANKING_QUEUE_CAPACITY",
        "RANKING_MAX_RETRIES",
        "BLOCKED_DOMAINS",
        "SELF_DOMAINS",
        "UPGRADE_HTTP",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" Example.com, ,malicious.com,"),
            vec!["example.com".to_string(), "malicious.com".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.ranking_queue_capacity = 50;
        assert!(config.validate().is_err());
        config.ranking_queue_capacity = 10_000;

        config.code_length = 0;
        assert!(config.validate().is_err());
        config.code_length = 33;
        assert!(config.validate().is_err());
        config.code_length = 6;

        config.ranking_max_retries = 11;
        assert!(config.validate().is_err());
        config.ranking_max_retries = 3;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.base_url = "sho.rt".to_string();
        assert!(config.validate().is_err());
        config.base_url = "ftp://sho.rt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_url_validator_includes_base_url_host() {
        let config = Config {
            base_url: "https://sho.rt".to_string(),
            ..Config::default()
        };

        let validator = config.url_validator();
        assert!(validator.self_domains().contains(&"sho.rt".to_string()));
        assert!(validator.self_domains().contains(&"localhost".to_string()));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ranking_queue_capacity, 10_000);
        assert_eq!(config.blocked_domains, vec!["example.com", "malicious.com"]);
        assert_eq!(config.self_domains, vec!["localhost", "127.0.0.1"]);
        assert!(config.upgrade_http);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BASE_URL", "https://sho.rt");
            env::set_var("CODE_LENGTH", "8");
            env::set_var("BLOCKED_DOMAINS", "phishing.net");
            env::set_var("UPGRADE_HTTP", "false");
            env::set_var("RANKING_MAX_RETRIES", "not-a-number");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.base_url, "https://sho.rt");
        assert_eq!(config.code_length, 8);
        assert_eq!(config.blocked_domains, vec!["phishing.net"]);
        assert!(!config.upgrade_http);
        assert_eq!(config.ranking_max_retries, 3);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_rejects_invalid() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("RANKING_QUEUE_CAPACITY", "10");
        }

        assert!(load_from_env().is_err());

        clear_env();
    }
}
