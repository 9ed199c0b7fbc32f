//! Helpers for rendering server-side validation errors next to form fields.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use portal::error::{ApiError, FieldErrors, GENERAL_ERROR_KEY};

/// First message recorded for `field`, if any.
pub fn first_error(errors: &FieldErrors, field: &str) -> Option<String> {
    errors.get(field).and_then(|messages| messages.first()).cloned()
}

/// Message for the form as a whole: the `general` entry.
pub fn general_error(errors: &FieldErrors) -> Option<String> {
    first_error(errors, GENERAL_ERROR_KEY)
}

/// Trimmed input, or `None` when nothing but whitespace was typed.
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// What to show for a failed request: the server's `message` when it sent
/// one, the error itself otherwise.
pub fn error_message(err: &ApiError) -> String {
    err.server_message().map_or_else(|| err.to_string(), str::to_owned)
}
