use super::*;
use serde_json::json;

fn status(code: u16, body: Value) -> ApiError {
    ApiError::Status { status: code, body }
}

#[test]
fn server_message_reads_message_field() {
    let err = status(422, json!({"message": "The given data was invalid."}));
    assert_eq!(err.server_message(), Some("The given data was invalid."));
    assert_eq!(ApiError::Timeout.server_message(), None);
}

#[test]
fn field_errors_accepts_lists_and_bare_strings() {
    let err = status(
        422,
        json!({"errors": {"email": ["taken", "too long"], "password": "required", "ignored": 3}}),
    );
    let errors = err.field_errors();
    assert_eq!(errors["email"], vec!["taken".to_owned(), "too long".to_owned()]);
    assert_eq!(errors["password"], vec!["required".to_owned()]);
    assert!(!errors.contains_key("ignored"));
}

#[test]
fn field_errors_empty_for_transport_failures() {
    assert!(ApiError::Transport("offline".into()).field_errors().is_empty());
}

#[test]
fn is_unauthorized_only_for_401() {
    assert!(status(401, Value::Null).is_unauthorized());
    assert!(!status(403, Value::Null).is_unauthorized());
    assert!(!ApiError::Transport("x".into()).is_unauthorized());
}

#[test]
fn errors_or_general_falls_back_to_message() {
    let errors = errors_or_general(FieldErrors::new(), "Login failed");
    assert_eq!(errors[GENERAL_ERROR_KEY], vec!["Login failed".to_owned()]);
}

#[test]
fn errors_or_general_keeps_server_errors() {
    let mut server = FieldErrors::new();
    server.insert("login".into(), vec!["unknown".into()]);
    let errors = errors_or_general(server.clone(), "Login failed");
    assert_eq!(errors, server);
}
