use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Trimmed value of a required form field
pub fn validate_required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Optional form field where an empty input means "not given"
pub fn validate_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional numeric id from a form field; empty means none, garbage is rejected
pub fn parse_optional_id(value: Option<String>, field: &str) -> AppResult<Option<i32>> {
    match validate_optional(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a number", field))),
    }
}

/// Body of the public GET pages; rendering is left to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    pub page: String,
    pub notice: Option<String>,
}
