use super::*;
use crate::http::{HttpClient, Method, REFRESH_PATH};
use crate::session::{LOGIN_PATH, NoNavigation, USER_PATH};
use crate::testing::ScriptedTransport;
use crate::types::{Credentials, User};
use futures::executor::block_on;
use serde_json::{Value, json};

fn user(roles: &[&str]) -> User {
    User {
        id: "1".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        username: None,
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        permissions: Vec::new(),
        extra: serde_json::Map::new(),
    }
}

fn signed_in(roles: &[&str]) -> SessionState {
    SessionState {
        user: Some(user(roles)),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        initialized: true,
        ..SessionState::default()
    }
}

fn anonymous() -> SessionState {
    SessionState { initialized: true, ..SessionState::default() }
}

fn checked() -> Progress {
    Progress { session_checked: true, roles_loaded: false }
}

fn session() -> (ScriptedTransport, Session<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    (transport.clone(), Session::new(HttpClient::new(transport), NoNavigation))
}

// =============================================================
// decide (pure)
// =============================================================

#[test]
fn uninitialized_session_is_checked_first() {
    let state = SessionState::default();
    for route in RouteName::ALL {
        assert_eq!(decide(&state, &route.meta(), Progress::default()), Decision::CheckSession, "{route:?}");
    }
}

#[test]
fn anonymous_session_is_rechecked_except_for_guest_routes() {
    let state = anonymous();
    assert_eq!(decide(&state, &RouteName::Dashboard.meta(), Progress::default()), Decision::CheckSession);
    assert_eq!(decide(&state, &RouteName::Login.meta(), Progress::default()), Decision::Proceed);
}

#[test]
fn guest_route_redirects_authenticated_users_to_dashboard() {
    let decision = decide(&signed_in(&["technician"]), &RouteName::Login.meta(), Progress::default());
    assert_eq!(decision, Decision::Redirect(Redirect::to(RouteName::Dashboard)));
    let decision = decide(&signed_in(&[]), &RouteName::Register.meta(), Progress::default());
    assert_eq!(decision, Decision::Redirect(Redirect::to(RouteName::Dashboard)));
}

#[test]
fn protected_route_redirects_anonymous_users_to_login() {
    for route in [RouteName::Dashboard, RouteName::Users, RouteName::CropPlantings] {
        assert_eq!(
            decide(&anonymous(), &route.meta(), checked()),
            Decision::Redirect(Redirect::to(RouteName::Login)),
            "{route:?}"
        );
    }
}

#[test]
fn any_required_role_grants_access() {
    let admin_tech = signed_in(&["admin", "technician"]);
    assert_eq!(decide(&admin_tech, &RouteMeta::roles(&["admin"]), checked()), Decision::Proceed);

    let tech = signed_in(&["technician"]);
    assert_eq!(
        decide(&tech, &RouteMeta::roles(&["admin"]), checked()),
        Decision::Redirect(Redirect { to: RouteName::Dashboard, notice: Some(ACCESS_DENIED) })
    );
    assert_eq!(decide(&tech, &RouteName::CropPlantings.meta(), checked()), Decision::Proceed);
}

#[test]
fn empty_role_set_triggers_one_role_lookup() {
    let state = signed_in(&[]);
    let meta = RouteName::Users.meta();
    assert_eq!(decide(&state, &meta, checked()), Decision::LoadRoles);

    let after_lookup = Progress { session_checked: true, roles_loaded: true };
    assert_eq!(
        decide(&state, &meta, after_lookup),
        Decision::Redirect(Redirect { to: RouteName::Dashboard, notice: Some(ACCESS_DENIED) })
    );
}

#[test]
fn unprotected_routes_proceed_for_everyone_once_checked() {
    assert_eq!(decide(&anonymous(), &RouteName::NotFound.meta(), checked()), Decision::Proceed);
    assert_eq!(decide(&signed_in(&[]), &RouteName::NotFound.meta(), checked()), Decision::Proceed);
}

#[test]
fn fallback_sends_protected_routes_to_login_only() {
    assert_eq!(fallback(&RouteName::Farmers.meta()), Navigation::Redirect(Redirect::to(RouteName::Login)));
    assert_eq!(fallback(&RouteName::Login.meta()), Navigation::Proceed);
    assert_eq!(fallback(&RouteName::NotFound.meta()), Navigation::Proceed);
}

// =============================================================
// resolve (driven)
// =============================================================

#[test]
fn anonymous_visit_to_dashboard_redirects_to_login() {
    let (transport, session) = session();
    transport
        .reply(Method::Get, USER_PATH, 401, json!({"message": "Unauthenticated."}))
        .reply(Method::Post, REFRESH_PATH, 401, Value::Null);

    let nav = block_on(resolve(&session, RouteName::Dashboard));
    assert_eq!(nav, Navigation::Redirect(Redirect::to(RouteName::Login)));

    let state = session.snapshot();
    assert!(state.user.is_none());
    assert!(state.initialized);
}

#[test]
fn failed_check_on_guest_route_proceeds() {
    let (transport, session) = session();
    transport.fail(Method::Get, USER_PATH, crate::error::ApiError::Transport("offline".into()));

    assert_eq!(block_on(resolve(&session, RouteName::Login)), Navigation::Proceed);
}

#[test]
fn login_then_role_gated_route_proceeds_without_refetch() {
    let (transport, session) = session();
    transport.reply(
        Method::Post,
        LOGIN_PATH,
        200,
        json!({"status": "success", "user": {"id": 5, "roles": ["technician"]}}),
    );
    assert!(block_on(session.login(&Credentials::login("a@b.com", "x"))).is_success());

    assert_eq!(block_on(resolve(&session, RouteName::CropPlantings)), Navigation::Proceed);
    assert_eq!(transport.count(Method::Get, USER_PATH), 0);
}

#[test]
fn missing_roles_are_fetched_before_deciding() {
    let (transport, session) = session();
    transport
        .reply(Method::Get, USER_PATH, 200, json!({"id": 1, "roles": []}))
        .reply(Method::Get, USER_PATH, 200, json!({"id": 1, "roles": ["admin"]}));

    assert_eq!(block_on(resolve(&session, RouteName::Users)), Navigation::Proceed);
    assert_eq!(transport.count(Method::Get, USER_PATH), 2);
    assert!(session.has_role("admin"));
}

#[test]
fn role_lookup_failure_falls_back_to_login() {
    let (transport, session) = session();
    transport
        .reply(Method::Get, USER_PATH, 200, json!({"id": 1}))
        .fail(Method::Get, USER_PATH, crate::error::ApiError::Timeout);

    assert_eq!(
        block_on(resolve(&session, RouteName::Admin)),
        Navigation::Redirect(Redirect::to(RouteName::Login))
    );
}

#[test]
fn overlapping_navigations_share_one_session_check() {
    let (transport, session) = session();
    let gate = transport.gate(Method::Get, USER_PATH);

    let (a, b, ()) = block_on(async {
        futures::join!(resolve(&session, RouteName::Dashboard), resolve(&session, RouteName::Farmers), async {
            let _ = gate.send(Ok(crate::http::RawResponse::new(200, json!({"id": 1, "roles": ["technician"]}))));
        })
    });

    assert_eq!(a, Navigation::Proceed);
    assert_eq!(b, Navigation::Proceed);
    assert_eq!(transport.count(Method::Get, USER_PATH), 1);
}

#[test]
fn root_path_forwards_to_landing_route() {
    let (transport, session) = session();
    transport.reply(Method::Get, USER_PATH, 200, json!({"id": 1}));
    assert_eq!(
        block_on(resolve_path(&session, "/")),
        Navigation::Redirect(Redirect::to(RouteName::Dashboard))
    );

    let (transport, session) = self::session();
    transport.fail(Method::Get, USER_PATH, crate::error::ApiError::Transport("offline".into()));
    assert_eq!(block_on(resolve_path(&session, "/")), Navigation::Redirect(Redirect::to(RouteName::Login)));
}
