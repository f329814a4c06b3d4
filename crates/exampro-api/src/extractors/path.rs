//! Typed path parameter helpers.

use std::str::FromStr;

use exampro_core::AppError;

/// Parses an id from a path segment; a malformed id is a validation error.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
