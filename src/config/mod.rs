pub mod toml_config;

use crate::adapters::groq::{GroqSettings, DEFAULT_BASE_URL};
use crate::core::memory::DEFAULT_MAX_HISTORY;
use crate::core::tutor::{TutorOptions, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_required_field,
    validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Parser)]
#[command(name = "quantum-tutor")]
#[command(about = "Web dashboard for an AI quantum computing tutor")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long, env = "QUANTUM_TUTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind (default 0.0.0.0)
    #[arg(long, env = "QUANTUM_TUTOR_HOST")]
    pub host: Option<String>,

    /// Port to listen on (default 5000)
    #[arg(long, env = "QUANTUM_TUTOR_PORT")]
    pub port: Option<u16>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: 60,
            retry_attempts: 2,
            retry_delay_seconds: 1,
        }
    }
}

/// Fully resolved settings: defaults, then the TOML file, then CLI flags and
/// environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub max_history: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            llm: LlmConfig::default(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl AppConfig {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Ok(Self::resolve(cli, file.as_ref()))
    }

    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            file.apply_to(&mut config);
        }

        if let Some(host) = &cli.host {
            config.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(api_key) = cli.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = Some(api_key.clone());
        }
        config
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn groq_settings(&self) -> Result<GroqSettings> {
        let api_key = validate_required_field("GROQ_API_KEY", &self.llm.api_key)?;
        Ok(GroqSettings {
            base_url: self.llm.base_url.clone(),
            api_key: api_key.clone(),
            timeout: Duration::from_secs(self.llm.timeout_seconds),
            retry_attempts: self.llm.retry_attempts,
            retry_delay: Duration::from_secs(self.llm.retry_delay_seconds),
        })
    }

    pub fn tutor_options(&self) -> TutorOptions {
        TutorOptions {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            max_history: self.max_history,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_positive_number("server.port", usize::from(self.port), 1)?;
        validate_url("llm.base_url", &self.llm.base_url)?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validate_positive_number("llm.max_tokens", self.llm.max_tokens as usize, 1)?;
        validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds as usize, 1)?;
        validate_positive_number("memory.max_history", self.max_history, 1)?;
        let api_key = validate_required_field("GROQ_API_KEY", &self.llm.api_key)?;
        validate_non_empty_string("GROQ_API_KEY", api_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TutorError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> CliConfig {
        let mut argv = vec!["quantum-tutor"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_listen_on_port_5000() {
        let config = AppConfig::resolve(&cli(&["--api-key", "gsk_test"]), None);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_history, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str("[server]\nport = 8080\nhost = \"127.0.0.1\"\n").unwrap();
        let config = AppConfig::resolve(&cli(&["--port", "9090", "--api-key", "k"]), Some(&file));
        assert_eq!(config.listen_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig {
            llm: LlmConfig {
                api_key: None,
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TutorError::MissingConfigError { .. })
        ));
        assert!(config.groq_settings().is_err());
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("k".to_string());
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());

        config.llm.temperature = 0.7;
        config.max_history = 0;
        assert!(config.validate().is_err());
    }

    fn cli_with_file(path: PathBuf) -> CliConfig {
        CliConfig {
            config: Some(path),
            host: None,
            port: Some(7000),
            api_key: Some("gsk_cli".to_string()),
            verbose: false,
            json_logs: false,
        }
    }

    #[test]
    fn test_load_reads_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[llm]
model = "llama-3.3-70b-versatile"
retry_attempts = 0

[memory]
max_history = 3
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::load(&cli_with_file(temp_file.path().to_path_buf())).unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:7000");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.retry_attempts, 0);
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_cli"));
        assert_eq!(config.max_history, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = AppConfig::load(&cli_with_file(missing)).unwrap_err();
        assert!(matches!(err, TutorError::IoError(_)));
    }

    #[test]
    fn test_nan_temperature_from_file_fails_validation() {
        let file =
            TomlConfig::from_toml_str("[llm]\ntemperature = nan\napi_key = \"k\"\n").unwrap();
        let config = AppConfig::resolve(&cli(&[]), Some(&file));
        assert!(config.llm.temperature.is_nan());
        assert!(matches!(
            config.validate(),
            Err(TutorError::InvalidConfigValueError { ref field, .. }) if field == "llm.temperature"
        ));
    }
}
