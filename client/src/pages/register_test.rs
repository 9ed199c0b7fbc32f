use super::*;

fn form(name: &str, email: &str, password: &str, confirmation: &str) -> RegisterForm {
    RegisterForm {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        password_confirmation: confirmation.to_owned(),
    }
}

#[test]
fn valid_form_trims_name_and_email() {
    let registration = validate_registration(&form(" Ana ", " ana@example.com ", "pw12345678", "pw12345678")).unwrap();
    assert_eq!(registration.name, "Ana");
    assert_eq!(registration.email, "ana@example.com");
    assert_eq!(registration.password, "pw12345678");
    assert_eq!(registration.password_confirmation, "pw12345678");
    assert!(registration.extra.is_empty());
}

#[test]
fn missing_name_is_rejected_first() {
    assert_eq!(validate_registration(&form("", "", "", "")), Err("Enter your name."));
}

#[test]
fn email_without_at_sign_is_rejected() {
    assert_eq!(
        validate_registration(&form("Ana", "ana.example.com", "pw", "pw")),
        Err("Enter a valid email address.")
    );
}

#[test]
fn empty_password_is_rejected() {
    assert_eq!(validate_registration(&form("Ana", "ana@example.com", "", "")), Err("Choose a password."));
}

#[test]
fn mismatched_confirmation_is_rejected() {
    assert_eq!(
        validate_registration(&form("Ana", "ana@example.com", "one", "two")),
        Err("Passwords do not match.")
    );
}
