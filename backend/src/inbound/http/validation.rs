//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form structs deserialize every field as `Option<String>` so a missing or
//! malformed field reaches these helpers instead of failing extraction. Each
//! helper reports the offending field in the error details.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Date format accepted by date inputs.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidInteger,
    InvalidNumber,
    InvalidDate,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Reject a value the domain refused, keeping the domain's explanation.
pub(crate) fn invalid_value_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    ValidationError::new(field, reason.to_string()).with_code(ErrorCode::InvalidValue)
}

/// Require a field that is present and not blank.
pub(crate) fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse a required integer field such as a room id or a score.
pub(crate) fn parse_integer(value: Option<String>, field: FieldName) -> Result<i32, Error> {
    let raw = required(value, field)?;
    raw.trim().parse::<i32>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(field, format!("{name} must be an integer"))
            .with_value(ErrorCode::InvalidInteger, &raw)
    })
}

/// Parse a required decimal field such as a nightly price.
pub(crate) fn parse_number(value: Option<String>, field: FieldName) -> Result<f64, Error> {
    let raw = required(value, field)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} must be a number"))
                .with_value(ErrorCode::InvalidNumber, &raw)
        })
}

/// Parse a required `YYYY-MM-DD` date field.
pub(crate) fn parse_date(value: Option<String>, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = required(value, field)?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(field, format!("{name} must be a date (YYYY-MM-DD)"))
            .with_value(ErrorCode::InvalidDate, &raw)
    })
}
