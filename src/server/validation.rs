//! Request validation helpers.
//!
//! Validation runs at the API boundary, before any repository call.
//! Failures are collected per field so a response can report every
//! problem at once.

use serde_json::json;

use super::error::ApiError;

/// Pagination bounds for list endpoints.
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: i64 = 50;

/// Accumulates per-field validation failures.
#[derive(Debug, Default)]
pub struct Failures {
    items: Vec<(String, String)>,
}

impl Failures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.items.push((field.to_string(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish validation: Ok when nothing failed, otherwise a
    /// ValidationError carrying the structured failure list.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.items.is_empty() {
            return Ok(());
        }
        let message = self
            .items
            .iter()
            .map(|(_, message)| message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let detail = json!(self
            .items
            .iter()
            .map(|(field, message)| json!({ "field": field, "message": message }))
            .collect::<Vec<_>>());
        Err(ApiError::validation_with_detail(message, detail))
    }
}

/// Check a value against an inclusive numeric range.
pub fn check_range_f64(failures: &mut Failures, field: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        failures.push(
            field,
            format!("{} ({}) must be between {} and {}", field, value, min, max),
        );
    }
}

/// Check an integer against an inclusive range.
pub fn check_range_i32(failures: &mut Failures, field: &str, value: i32, min: i32, max: i32) {
    if value < min || value > max {
        failures.push(
            field,
            format!("{} ({}) must be between {} and {}", field, value, min, max),
        );
    }
}

/// Check a value is non-negative.
pub fn check_non_negative(failures: &mut Failures, field: &str, value: f64) {
    if value < 0.0 {
        failures.push(field, format!("{} ({}) must not be negative", field, value));
    }
}

/// Check a value has at most one decimal place.
pub fn check_one_decimal(failures: &mut Failures, field: &str, value: f64) {
    let scaled = value * 10.0;
    if (scaled - scaled.round()).abs() > 1e-9 {
        failures.push(
            field,
            format!("{} ({}) must have at most one decimal place", field, value),
        );
    }
}

/// Check a required string is present and within a length bound.
pub fn check_name(failures: &mut Failures, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        failures.push(field, format!("{} must not be empty", field));
    } else if value.len() > max_len {
        failures.push(
            field,
            format!("{} must be at most {} characters", field, max_len),
        );
    }
}

/// Normalize a country code to upper case, recording a failure when it is
/// not a 3-letter alphabetic code. Normalization happens exactly once, on
/// the way into the domain model.
pub fn normalize_country_code(
    failures: &mut Failures,
    value: Option<String>,
) -> Option<String> {
    value.map(|code| {
        let code = code.trim().to_string();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            failures.push(
                "country_code",
                format!("country_code ('{}') must be a 3-letter code", code),
            );
        }
        code.to_uppercase()
    })
}

/// Normalize a language code to lower case.
pub fn normalize_language_code(value: Option<String>) -> Option<String> {
    value.map(|code| code.trim().to_lowercase())
}

/// Normalize a list of language codes to lower case.
pub fn normalize_language_codes(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|code| code.trim().to_lowercase())
        .collect()
}

/// Validate list pagination parameters: limit bounded 1-100 (default 50),
/// offset non-negative (default 0).
pub fn validate_pagination(
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<(i64, i64), ApiError> {
    let mut failures = Failures::new();

    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        failures.push(
            "limit",
            format!("limit ({}) must be between 1 and {}", limit, MAX_LIMIT),
        );
    }

    let offset = offset.unwrap_or(0);
    if offset < 0 {
        failures.push("offset", format!("offset ({}) must not be negative", offset));
    }

    failures.into_result()?;
    Ok((limit, offset))
}

/// Validate a path parameter that must be a well-formed UUID. A malformed
/// id is a client error (422), distinct from a well-formed id that does
/// not resolve (404).
pub fn parse_entity_id(id: &str) -> Result<(), ApiError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ApiError::validation(format!("Invalid UUID format: '{}'", id)))
}
