use crate::config::AppConfig;
use crate::utils::error::{Result, TutorError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based configuration. Every value may be omitted.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 5000
///
/// [llm]
/// base_url = "https://api.groq.com/openai/v1"
/// api_key = "${GROQ_API_KEY}"
/// model = "llama-3.1-8b-instant"
/// temperature = 0.7
/// max_tokens = 2048
/// timeout_seconds = 60
/// retry_attempts = 2
/// retry_delay_seconds = 1
///
/// [memory]
/// max_history = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub llm: Option<LlmSection>,
    pub memory: Option<MemorySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemorySection {
    pub max_history: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TutorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TutorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of environment variable `VAR`.
    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TutorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    /// Overlays every value present in the file onto `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                config.host = host.clone();
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(llm) = &self.llm {
            if let Some(base_url) = &llm.base_url {
                config.llm.base_url = base_url.clone();
            }
            if let Some(api_key) = llm.api_key.as_ref().filter(|k| !is_placeholder(k)) {
                config.llm.api_key = Some(api_key.clone());
            }
            if let Some(model) = &llm.model {
                config.llm.model = model.clone();
            }
            if let Some(temperature) = llm.temperature {
                config.llm.temperature = temperature;
            }
            if let Some(max_tokens) = llm.max_tokens {
                config.llm.max_tokens = max_tokens;
            }
            if let Some(timeout) = llm.timeout_seconds {
                config.llm.timeout_seconds = timeout;
            }
            if let Some(attempts) = llm.retry_attempts {
                config.llm.retry_attempts = attempts;
            }
            if let Some(delay) = llm.retry_delay_seconds {
                config.llm.retry_delay_seconds = delay;
            }
        }

        if let Some(max_history) = self.memory.as_ref().and_then(|m| m.max_history) {
            config.max_history = max_history;
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [llm]
            model = "llama-3.3-70b-versatile"
            temperature = 0.2

            [memory]
            max_history = 4
        "#;

        let file = TomlConfig::from_toml_str(toml).unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.max_history, 4);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("QT_TEST_BASE_URL", "http://127.0.0.1:9999/v1");
        let toml = r#"
            [llm]
            base_url = "${QT_TEST_BASE_URL}"
            api_key = "${QT_TEST_SURELY_UNSET_KEY}"
        "#;

        let file = TomlConfig::from_toml_str(toml).unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.llm.base_url, "http://127.0.0.1:9999/v1");
        // unresolved placeholders never become credentials
        assert_eq!(config.llm.api_key, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[server]\nbind = \"x\"\n").unwrap_err();
        assert!(matches!(err, TutorError::ConfigValidationError { .. }));
    }
}
