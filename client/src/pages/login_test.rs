use super::*;
use portal::types::LoginIdentity;

#[test]
fn email_like_identifier_signs_in_by_email() {
    let credentials = validate_login_input("  ana@example.com ", "secret").unwrap();
    assert_eq!(credentials.identity, LoginIdentity::Email("ana@example.com".to_owned()));
    assert_eq!(credentials.password, "secret");
}

#[test]
fn other_identifiers_sign_in_by_username() {
    let credentials = validate_login_input("ana", "secret").unwrap();
    assert_eq!(credentials.identity, LoginIdentity::Login("ana".to_owned()));
}

#[test]
fn blank_identifier_is_rejected() {
    assert_eq!(validate_login_input("   ", "secret"), Err("Enter your email or username."));
}

#[test]
fn empty_password_is_rejected() {
    assert_eq!(validate_login_input("ana", ""), Err("Enter your password."));
}

#[test]
fn password_is_not_trimmed() {
    let credentials = validate_login_input("ana", " spaced ").unwrap();
    assert_eq!(credentials.password, " spaced ");
}
