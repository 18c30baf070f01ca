//! Validation for configuration values
//!
//! Each config section implements [`ConfigSection`], which includes validation.

use http::header::{HeaderName, HeaderValue};
use std::fmt;

/// Invalid value of one config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path, e.g. `http.upload_chunk_size`
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        match &self.value {
            Some(value) => write!(f, " (got: {})", value),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trait for configuration sections that can validate themselves
pub trait ConfigSection: Default {
    /// Validates the configuration section
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another config section into this one
    ///
    /// Values from `other` take precedence.
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates an HTTP header name
    pub fn header_name(name: &str, field: &str) -> Result<(), ValidationError> {
        HeaderName::from_bytes(name.as_bytes())
            .map(drop)
            .map_err(|_| ValidationError::with_value(field, "is not a valid header name", name))
    }

    /// Validates an HTTP header value; line breaks and other controls are rejected
    pub fn header_value(value: &str, field: &str) -> Result<(), ValidationError> {
        HeaderValue::from_str(value).map(drop).map_err(|_| {
            ValidationError::with_value(field, "contains invalid characters", value.escape_debug())
        })
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
