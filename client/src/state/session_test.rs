use super::*;
use portal::types::User;
use serde_json::json;

fn signed_in(roles: &[&str]) -> SessionState {
    let user: User = serde_json::from_value(json!({
        "id": 7,
        "name": "Ada",
        "email": "ada@example.com",
        "roles": roles,
    }))
    .unwrap();
    SessionState {
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        user: Some(user),
        initialized: true,
        ..SessionState::default()
    }
}

#[test]
fn anonymous_session_sees_no_protected_routes() {
    let state = SessionState { initialized: true, ..SessionState::default() };
    assert!(NAV_ROUTES.iter().all(|route| !navigable(&state, *route)));
}

#[test]
fn admin_sees_every_sidebar_route_but_technicians_needs_matching_role() {
    let state = signed_in(&["admin"]);
    let visible: Vec<_> = NAV_ROUTES.into_iter().filter(|r| navigable(&state, *r)).collect();
    assert_eq!(visible, NAV_ROUTES.to_vec());
}

#[test]
fn technician_sees_crop_plantings_but_not_users() {
    let state = signed_in(&["technician"]);
    assert!(navigable(&state, RouteName::CropPlantings));
    assert!(navigable(&state, RouteName::Dashboard));
    assert!(!navigable(&state, RouteName::Users));
    assert!(!navigable(&state, RouteName::Admin));
}

#[test]
fn association_sees_technicians() {
    let state = signed_in(&["association"]);
    assert!(navigable(&state, RouteName::Technicians));
    assert!(!navigable(&state, RouteName::Farmers));
}

#[test]
fn display_name_prefers_name_then_email() {
    let mut state = signed_in(&[]);
    assert_eq!(display_name(&state).as_deref(), Some("Ada"));
    if let Some(user) = state.user.as_mut() {
        user.name = "  ".to_owned();
    }
    assert_eq!(display_name(&state).as_deref(), Some("ada@example.com"));
    assert_eq!(display_name(&SessionState::default()), None);
}
