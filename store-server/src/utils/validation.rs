//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! API handlers on top of the derive-based payload validation.

use shared::ApiError;
use validator::Validate;

// ── Text length limits ──────────────────────────────────────────────

/// Identifiers coming from the client: user ids, order ids, references
pub const MAX_ID_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Notes and free-text descriptions
pub const MAX_NOTE_LEN: usize = 4000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(ApiError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Run derive-based validation, folding all messages into one validation error.
pub fn validate_payload(payload: &impl Validate) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))
}
