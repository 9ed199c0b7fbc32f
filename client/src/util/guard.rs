//! Router adapter for the `portal` navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `leptos_router` has no before-each hook, so every guarded route renders
//! through [`crate::components::guarded::Guarded`], which runs
//! [`evaluate`] once on mount and either reveals the page or navigates away.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use portal::guard::{self, Navigation};
use portal::routes::RouteName;

use crate::state::session::{AppSession, SessionContext};
use crate::state::ui::{NoticeKind, UiState};

/// What the router should do with a guarded route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Navigate {
        path: &'static str,
        notice: Option<&'static str>,
    },
}

impl From<Navigation> for GuardOutcome {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Proceed => Self::Render,
            Navigation::Redirect(redirect) => Self::Navigate { path: redirect.to.path(), notice: redirect.notice },
        }
    }
}

/// Run the guard for `route`. `/` always ends in a navigation to its landing
/// page.
pub async fn evaluate(session: &AppSession, route: RouteName) -> GuardOutcome {
    guard::resolve_path(session, route.path()).await.into()
}

/// Start the guard for `route`; the returned signal turns `true` once the
/// page may render.
pub fn install_route_guard<F>(ctx: SessionContext, ui: RwSignal<UiState>, route: RouteName, navigate: F) -> ReadSignal<bool>
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    let allowed = RwSignal::new(false);
    let session = ctx.session();
    leptos::task::spawn_local(async move {
        match evaluate(&session, route).await {
            GuardOutcome::Render => allowed.set(true),
            GuardOutcome::Navigate { path, notice } => {
                if let Some(text) = notice {
                    ui.update(|u| u.notify(NoticeKind::Error, text));
                }
                navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    });
    allowed.read_only()
}
