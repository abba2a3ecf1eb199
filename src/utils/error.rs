use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("LLM API returned {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("LLM API returned no completion content")]
    EmptyCompletion,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Configuration,
    Request,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TutorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::UpstreamError { .. } | Self::EmptyCompletion => ErrorCategory::Upstream,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InvalidRequest { .. } => ErrorCategory::Request,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidRequest { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::UpstreamError { .. } | Self::EmptyCompletion => {
                ErrorSeverity::Medium
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Whether another attempt at the same LLM request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_timeout() || e.is_connect(),
            Self::UpstreamError { status, .. } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the LLM service".to_string(),
            Self::UpstreamError { status, .. } => {
                format!("The LLM service rejected the request (HTTP {})", status)
            }
            Self::EmptyCompletion => "The LLM service returned an empty answer".to_string(),
            Self::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::ConfigError { message } | Self::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
            Self::InvalidRequest { message } => message.clone(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(e) => format!("Malformed data: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the configured llm.base_url",
            ErrorCategory::Upstream => "Check the API key, model name and rate limits of your Groq account",
            ErrorCategory::Configuration => {
                "Set GROQ_API_KEY and review the TOML configuration values"
            }
            ErrorCategory::Request => "Send a JSON body of the form {\"message\": \"...\"}",
            ErrorCategory::System => "Check file permissions and the configuration file path",
        }
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
