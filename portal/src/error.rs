//! Error taxonomy for calls against the remote API.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` is `Clone` because a coalesced session check hands the very same
//! failure to every waiter. Callers that render forms pull the server message
//! and field errors out of `Status` bodies instead of matching on JSON.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use serde_json::Value;

/// Field-keyed validation messages, as returned under `errors` by the API.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key used when a failure carries no field errors of its own.
pub const GENERAL_ERROR_KEY: &str = "general";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, CORS, offline).
    #[error("network error: {0}")]
    Transport(String),
    /// The transport gave up waiting for a response.
    #[error("request timed out")]
    Timeout,
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Value },
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-supplied `message` field of a failed response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => body.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Server-supplied `errors` map of a failed response, empty when absent
    /// or malformed.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Status { body, .. } => body.get("errors").map(parse_field_errors).unwrap_or_default(),
            _ => FieldErrors::new(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Accept `{"field": ["a", "b"]}` as well as `{"field": "a"}`.
pub(crate) fn parse_field_errors(value: &Value) -> FieldErrors {
    let Some(map) = value.as_object() else {
        return FieldErrors::new();
    };
    map.iter()
        .filter_map(|(field, messages)| {
            let messages = match messages {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items.iter().filter_map(Value::as_str).map(str::to_owned).collect(),
                _ => return None,
            };
            Some((field.clone(), messages))
        })
        .collect()
}

/// Field errors for a form, falling back to `{general: [message]}` when the
/// server did not attribute the failure to specific fields.
pub fn errors_or_general(errors: FieldErrors, message: &str) -> FieldErrors {
    if !errors.is_empty() || message.is_empty() {
        return errors;
    }
    let mut general = FieldErrors::new();
    general.insert(GENERAL_ERROR_KEY.to_owned(), vec![message.to_owned()]);
    general
}
