use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub(crate) mod exam;
pub(crate) mod question;
pub(crate) mod student;

/// Success envelope used by every backend endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ApiEnvelope<T> {
    pub(crate) data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentRequest {
    pub(crate) student_ids: Vec<String>,
}

/// Rejections raised while turning a form draft into a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a whole number, got '{value}'")]
    NotInteger { field: &'static str, value: String },
    #[error("{field} must be a date (YYYY-MM-DD), got '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} must be a time (HH:MM), got '{value}'")]
    InvalidTime { field: &'static str, value: String },
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("{0}")]
    Invalid(String),
}

impl From<validator::ValidationErrors> for FormError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid ({})", err.code),
                })
            })
            .collect();
        messages.sort();
        FormError::Invalid(messages.join("; "))
    }
}

pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

pub(crate) fn parse_integer(field: &'static str, value: &str) -> Result<i64, FormError> {
    let trimmed = require(field, value)?;
    trimmed
        .parse::<i64>()
        .map_err(|_| FormError::NotInteger { field, value: trimmed.to_string() })
}

/// Blank optional numbers are sent as `null`.
pub(crate) fn parse_optional_integer(
    field: &'static str,
    value: &str,
) -> Result<Option<i64>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_integer(field, value).map(Some)
}

/// Reads `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Int(i64),
    Float(f64),
}

/// Counts stored by some clients as `60.0`; a fractional value is still rejected.
pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match WireNumber::deserialize(deserializer)? {
        WireNumber::Int(value) => Ok(value),
        WireNumber::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(value as i64)
        }
        WireNumber::Float(value) => {
            Err(D::Error::custom(format!("expected a whole number, got {value}")))
        }
    }
}
