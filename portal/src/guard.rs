//! Navigation guard: decides whether a route transition proceeds.
//!
//! ARCHITECTURE
//! ============
//! [`decide`] is a pure function of the session snapshot, the target route,
//! and what the guard has already fetched during this navigation. It either
//! settles (`Proceed`/`Redirect`) or names the fetch it is waiting on
//! (`CheckSession`/`LoadRoles`). [`resolve`] drives those pending states
//! against a live [`Session`] and always settles; a router adapter only has
//! to apply the resulting [`Navigation`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::http::Transport;
use crate::routes::{RouteMeta, RouteName};
use crate::session::{Session, SessionState};

pub const ACCESS_DENIED: &str = "Access denied: insufficient privileges";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: RouteName,
    /// User-visible notice to show after redirecting.
    pub notice: Option<&'static str>,
}

impl Redirect {
    pub fn to(route: RouteName) -> Self {
        Self { to: route, notice: None }
    }
}

/// Settled outcome of a guarded navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Redirect),
}

/// One step of the guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(Redirect),
    /// Await a session check, then decide again.
    CheckSession,
    /// Fetch the identity to learn its roles, then decide again.
    LoadRoles,
}

/// Fetches already performed during the current navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub session_checked: bool,
    pub roles_loaded: bool,
}

pub fn decide(state: &SessionState, meta: &RouteMeta, progress: Progress) -> Decision {
    let authenticated = state.is_authenticated();

    if !progress.session_checked && (!state.initialized || (!authenticated && !meta.requires_guest)) {
        return Decision::CheckSession;
    }

    if meta.requires_guest {
        return if authenticated {
            Decision::Redirect(Redirect::to(RouteName::Dashboard))
        } else {
            Decision::Proceed
        };
    }

    if meta.is_protected() && !authenticated {
        return Decision::Redirect(Redirect::to(RouteName::Login));
    }

    if meta.required_roles.is_empty() {
        return Decision::Proceed;
    }

    if state.roles.is_empty() && !progress.roles_loaded {
        return Decision::LoadRoles;
    }

    if state.has_any_role(meta.required_roles) {
        Decision::Proceed
    } else {
        Decision::Redirect(Redirect { to: RouteName::Dashboard, notice: Some(ACCESS_DENIED) })
    }
}

/// Where a navigation ends up when the guard itself fails.
pub fn fallback(meta: &RouteMeta) -> Navigation {
    if meta.is_protected() {
        Navigation::Redirect(Redirect::to(RouteName::Login))
    } else {
        Navigation::Proceed
    }
}

/// Run the guard for `route` to completion.
///
/// Every path ends in `Proceed` or `Redirect`; fetch failures fall back per
/// [`fallback`] instead of escaping to the router.
pub async fn resolve<T: Transport + 'static>(session: &Session<T>, route: RouteName) -> Navigation {
    let meta = route.meta();
    let mut progress = Progress::default();
    loop {
        match session.with_state(|state| decide(state, &meta, progress)) {
            Decision::Proceed => return Navigation::Proceed,
            Decision::Redirect(redirect) => {
                tracing::debug!(from = route.path(), to = redirect.to.path(), "guard redirect");
                return Navigation::Redirect(redirect);
            }
            Decision::CheckSession => {
                progress.session_checked = true;
                if let Err(err) = session.check_session().await {
                    tracing::debug!(route = route.path(), error = %err, "session check failed during navigation");
                    return fallback(&meta);
                }
            }
            Decision::LoadRoles => {
                progress.roles_loaded = true;
                if let Err(err) = session.load_roles().await {
                    tracing::warn!(route = route.path(), error = %err, "role lookup failed during navigation");
                    return fallback(&meta);
                }
            }
        }
    }
}

/// Guard a raw browser path, resolving `/` to its landing route first.
pub async fn resolve_path<T: Transport + 'static>(session: &Session<T>, path: &str) -> Navigation {
    let route = RouteName::match_path(path);
    if route != RouteName::Home {
        return resolve(session, route).await;
    }
    match resolve(session, route).await {
        Navigation::Proceed => {
            let landing = session.with_state(RouteName::landing);
            Navigation::Redirect(Redirect::to(landing))
        }
        redirect @ Navigation::Redirect(_) => redirect,
    }
}
