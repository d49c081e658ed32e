use std::env;
use std::fmt;

/// Sandbox host used when `ALLOY_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://sandbox.alloy.co/v1";

/// Top-level configuration for a single intake run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub alloy: AlloyConfig,
    pub telemetry: TelemetryConfig,
}

/// Connection details and credentials for the Alloy workflow API.
#[derive(Clone)]
pub struct AlloyConfig {
    pub base_url: String,
    pub workflow_token: String,
    pub workflow_secret: String,
}

// Credentials must never reach logs, so Debug redacts them.
impl fmt::Debug for AlloyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlloyConfig")
            .field("base_url", &self.base_url)
            .field("workflow_token", &"<redacted>")
            .field("workflow_secret", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from a local `.env` file (if present) and the
    /// process environment. Fails before any network activity when the
    /// workflow credentials are missing.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("ALLOY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let workflow_token = require("ALLOY_WORKFLOW_TOKEN")?;
        let workflow_secret = require("ALLOY_WORKFLOW_SECRET")?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            alloy: AlloyConfig {
                base_url,
                workflow_token,
                workflow_secret,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { key }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingCredential { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCredential { key } => {
                write!(f, "{key} is not set; add it to your local .env file")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

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
        env::remove_var("ALLOY_BASE_URL");
        env::remove_var("ALLOY_WORKFLOW_TOKEN");
        env::remove_var("ALLOY_WORKFLOW_SECRET");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_fails_without_workflow_token() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ALLOY_WORKFLOW_SECRET", "secret");
        let err = AppConfig::load().expect_err("token is required");
        assert!(err.to_string().contains("ALLOY_WORKFLOW_TOKEN"));
    }

    #[test]
    fn load_applies_defaults_and_trims_base_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ALLOY_WORKFLOW_TOKEN", "token");
        env::set_var("ALLOY_WORKFLOW_SECRET", "secret");
        env::set_var("ALLOY_BASE_URL", "https://sandbox.alloy.co/v1/");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.alloy.base_url, "https://sandbox.alloy.co/v1");
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ALLOY_WORKFLOW_TOKEN", "   ");
        env::set_var("ALLOY_WORKFLOW_SECRET", "secret");
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let config = AlloyConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            workflow_token: "top-secret-token".to_string(),
            workflow_secret: "top-secret-value".to_string(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
