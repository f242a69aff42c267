use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backend providers for the model collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    /// Base URL of the provider's OpenAI-compatible endpoint.
    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub provider: Provider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub chat_model: String,
    pub temperature: f32,
    pub upstream_timeout: Duration,
    pub send_introductions: bool,
    pub log_level: Level,
    pub prompts_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let provider_str = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "gemini" => Provider::Gemini,
            _ => Provider::OpenAI,
        };

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();

        let chat_model =
            std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let temperature = match std::env::var("TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "TEMPERATURE".to_string(),
                    format!("'{}' is not a number", raw),
                )
            })?,
            Err(_) => 0.3,
        };

        let upstream_timeout = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                ConfigError::InvalidValue(
                    "UPSTREAM_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a whole number of seconds", raw),
                )
            })?,
            Err(_) => Duration::from_secs(60),
        };

        let send_introductions = match std::env::var("SEND_INTRODUCTIONS") {
            Ok(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "SEND_INTRODUCTIONS".to_string(),
                        format!("'{}' is not a boolean", raw),
                    ));
                }
            },
            Err(_) => true,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH").ok().map(PathBuf::from);

        Ok(Self {
            bind_address,
            provider,
            openai_api_key,
            gemini_api_key,
            chat_model,
            temperature,
            upstream_timeout,
            send_introductions,
            log_level,
            prompts_path,
        })
    }

    /// The credential for the selected provider, if one was supplied.
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("LLM_PROVIDER");
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("CHAT_MODEL");
            env::remove_var("TEMPERATURE");
            env::remove_var("UPSTREAM_TIMEOUT_SECS");
            env::remove_var("SEND_INTRODUCTIONS");
            env::remove_var("RUST_LOG");
            env::remove_var("PROMPTS_PATH");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    fn test_provider_api_base() {
        assert_eq!(Provider::OpenAI.api_base(), "https://api.openai.com/v1");
        assert!(Provider::Gemini.api_base().contains("generativelanguage"));
        for provider in [Provider::OpenAI, Provider::Gemini] {
            assert!(!provider.api_base().ends_with('/'));
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8000");
        assert_eq!(config.provider, Provider::OpenAI);
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.chat_model, "gpt-3.5-turbo");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(config.send_introductions);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.prompts_path, None);
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_not_an_error() {
        clear_env_vars();
        unsafe {
            env::set_var("LLM_PROVIDER", "openai");
        }

        let config = Config::from_env().expect("Config should load without a key");
        assert_eq!(config.api_key(), None);
    }

    #[test]
    #[serial]
    fn test_config_gemini_provider() {
        clear_env_vars();
        unsafe {
            env::set_var("LLM_PROVIDER", "Gemini");
            env::set_var("GEMINI_API_KEY", "test-gemini-key");
            env::set_var("OPENAI_API_KEY", "test-openai-key");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.api_key(), Some("test-gemini-key"));
    }

    #[test]
    #[serial]
    fn test_unknown_provider_falls_back_to_openai() {
        clear_env_vars();
        unsafe {
            env::set_var("LLM_PROVIDER", "anthropic");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.provider, Provider::OpenAI);
    }

    #[test]
    #[serial]
    fn test_config_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("OPENAI_API_KEY", "custom-openai-key");
            env::set_var("CHAT_MODEL", "gpt-4o");
            env::set_var("TEMPERATURE", "0.9");
            env::set_var("UPSTREAM_TIMEOUT_SECS", "15");
            env::set_var("SEND_INTRODUCTIONS", "false");
            env::set_var("RUST_LOG", "debug");
            env::set_var("PROMPTS_PATH", "/custom/prompts");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.api_key(), Some("custom-openai-key"));
        assert_eq!(config.chat_model, "gpt-4o");
        assert!((config.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert!(!config.send_introductions);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.prompts_path, Some(PathBuf::from("/custom/prompts")));
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
            _ => panic!("Expected InvalidValue for BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_temperature() {
        clear_env_vars();
        unsafe {
            env::set_var("TEMPERATURE", "warm");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, msg) => {
                assert_eq!(var, "TEMPERATURE");
                assert!(msg.contains("warm"));
            }
            _ => panic!("Expected InvalidValue for TEMPERATURE"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_timeout() {
        clear_env_vars();
        unsafe {
            env::set_var("UPSTREAM_TIMEOUT_SECS", "-3");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "UPSTREAM_TIMEOUT_SECS"),
            _ => panic!("Expected InvalidValue for UPSTREAM_TIMEOUT_SECS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_introductions_flag() {
        clear_env_vars();
        unsafe {
            env::set_var("SEND_INTRODUCTIONS", "maybe");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "SEND_INTRODUCTIONS"),
            _ => panic!("Expected InvalidValue for SEND_INTRODUCTIONS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
            _ => panic!("Expected InvalidValue for RUST_LOG"),
        }
    }
}
