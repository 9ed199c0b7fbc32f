use super::*;
use portal::guard::{ACCESS_DENIED, Redirect};
use portal::routes::RouteName;
use portal::types::User;
use serde_json::json;

fn state_with(user: serde_json::Value) -> SessionState {
    let user: User = serde_json::from_value(user).unwrap();
    SessionState {
        roles: user.roles.iter().cloned().collect(),
        permissions: user.permissions.iter().cloned().collect(),
        user: Some(user),
        initialized: true,
        ..SessionState::default()
    }
}

#[test]
fn anonymous_session_is_described_as_signed_out() {
    assert_eq!(describe_session(&SessionState::default()), "not signed in");
}

#[test]
fn session_lists_identity_roles_and_permissions() {
    let state = state_with(json!({
        "id": 3,
        "name": "Ana",
        "email": "ana@example.com",
        "roles": ["admin", "technician"],
        "permissions": []
    }));
    assert_eq!(
        describe_session(&state),
        "signed in as Ana <ana@example.com> (id 3)\nroles: admin, technician\npermissions: -"
    );
}

#[test]
fn navigation_outcomes_render_target_and_notice() {
    assert_eq!(describe_navigation(&Navigation::Proceed), "proceed");
    assert_eq!(
        describe_navigation(&Navigation::Redirect(Redirect::to(RouteName::Login))),
        "redirect /login"
    );
    let denied = Redirect { to: RouteName::Dashboard, notice: Some(ACCESS_DENIED) };
    assert_eq!(
        describe_navigation(&Navigation::Redirect(denied)),
        format!("redirect /dashboard ({ACCESS_DENIED})")
    );
}

#[test]
fn json_lines_emits_one_document_per_item() {
    let items = vec![json!({"id": 1}), json!({"id": 2})];
    assert_eq!(json_lines(&items).unwrap(), "{\"id\":1}\n{\"id\":2}");
    assert_eq!(json_lines::<serde_json::Value>(&[]).unwrap(), "");
}
