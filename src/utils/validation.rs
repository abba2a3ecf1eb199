use crate::utils::error::{Result, TutorError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TutorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TutorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TutorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(TutorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TutorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TutorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN is outside every range
    if !(min..=max).contains(&value) {
        return Err(TutorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("llm.base_url", "https://api.groq.com/openai/v1").is_ok());
        assert!(validate_url("llm.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("llm.base_url", "").is_err());
        assert!(validate_url("llm.base_url", "invalid-url").is_err());
        assert!(validate_url("llm.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("memory.max_history", 10, 1).is_ok());
        assert!(validate_positive_number("memory.max_history", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("llm.temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range("llm.temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range("llm.temperature", -0.1, 0.0, 2.0).is_err());
        assert!(validate_range("llm.temperature", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_range("llm.temperature", 2.0, 0.0, 2.0).is_ok());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        let present = Some("gsk_test".to_string());

        assert!(matches!(
            validate_required_field("GROQ_API_KEY", &missing),
            Err(TutorError::MissingConfigError { .. })
        ));
        assert_eq!(
            validate_required_field("GROQ_API_KEY", &present).unwrap(),
            "gsk_test"
        );
        assert!(validate_non_empty_string("llm.model", "   ").is_err());
    }
}
