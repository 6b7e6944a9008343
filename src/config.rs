//! Configuration management

use anyhow::Result;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the generative-plan endpoint
    pub gemini_api_url: String,

    /// API key for the plan endpoint. Absent means the `plan` command
    /// reports an advisory message instead of calling out.
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let gemini_api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            gemini_api_url,
            gemini_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_api_key_none_when_not_set() {
        std::env::remove_var("GEMINI_API_KEY");

        let config = Config::from_env().unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_blank_api_key_treated_as_missing() {
        std::env::set_var("GEMINI_API_KEY", "   ");

        let config = Config::from_env().unwrap();
        assert!(config.gemini_api_key.is_none());

        // Cleanup
        std::env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    fn test_config_api_url_uses_local_when_set() {
        std::env::set_var("GEMINI_API_URL", "http://localhost:9090");

        let config = Config::from_env().unwrap();
        assert_eq!(config.gemini_api_url, "http://localhost:9090");

        // Cleanup
        std::env::remove_var("GEMINI_API_URL");
    }
}
