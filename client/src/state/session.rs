//! Reactive bridge over the `portal` session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session itself is `Rc`-based and lives in a local [`StoredValue`];
//! components read its state through an `RwSignal` that every session
//! update refreshes. Route guards and identity-aware components go through
//! [`SessionContext`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use portal::http::HttpClient;
use portal::routes::RouteName;
use portal::session::{Session, SessionState};

use crate::net::transport::GlooTransport;

pub type AppSession = Session<GlooTransport>;

/// Sidebar entries, in display order.
pub const NAV_ROUTES: [RouteName; 7] = [
    RouteName::Dashboard,
    RouteName::Admin,
    RouteName::Users,
    RouteName::Farmers,
    RouteName::CropPlantings,
    RouteName::Technicians,
    RouteName::Notifications,
];

/// Copyable handle provided via context at the application root.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: StoredValue<AppSession, LocalStorage>,
    state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn new(session: AppSession) -> Self {
        let state = RwSignal::new(session.snapshot());
        session.subscribe(move |snapshot| state.set(snapshot.clone()));
        Self { session: StoredValue::new_local(session), state }
    }

    pub fn session(&self) -> AppSession {
        self.session.get_value()
    }

    pub fn client(&self) -> HttpClient<GlooTransport> {
        self.session.with_value(|session| session.client().clone())
    }

    /// Reactive view of the session state.
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Whether `route` belongs in the sidebar for this session.
pub fn navigable(state: &SessionState, route: RouteName) -> bool {
    let meta = route.meta();
    if meta.requires_auth && !state.is_authenticated() {
        return false;
    }
    meta.required_roles.is_empty() || state.has_any_role(meta.required_roles)
}

/// Display name for the signed-in user, falling back to the email.
pub fn display_name(state: &SessionState) -> Option<String> {
    let user = state.user.as_ref()?;
    if user.name.trim().is_empty() {
        Some(user.email.clone())
    } else {
        Some(user.name.clone())
    }
}
