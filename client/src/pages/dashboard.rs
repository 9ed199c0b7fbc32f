//! Dashboard page: identity summary and shortcuts into the sections the
//! current user may open.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route (`/` forwards here). It reads
//! everything from the session store; the only request it issues is an
//! explicit session refresh.

use leptos::prelude::*;
use leptos_router::components::A;
use portal::routes::RouteName;
use portal::session::AuthOutcome;

use crate::state::session::{NAV_ROUTES, display_name, navigable, use_session};
use crate::state::ui::{NoticeKind, UiState};

fn joined_or(labels: impl IntoIterator<Item = String>, empty: &str) -> String {
    let labels: Vec<String> = labels.into_iter().collect();
    if labels.is_empty() { empty.to_owned() } else { labels.join(", ") }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let state = ctx.state();

    let greeting = move || format!("Welcome, {}", display_name(&state.get()).unwrap_or_default());
    let roles = move || joined_or(state.get().roles, "none");
    let permissions = move || joined_or(state.get().permissions, "none");

    let shortcuts = move || {
        let current = state.get();
        NAV_ROUTES
            .into_iter()
            .filter(|route| *route != RouteName::Dashboard && navigable(&current, *route))
            .map(|route| {
                view! {
                    <A href=route.path() attr:class="dashboard__shortcut">
                        {route.title()}
                    </A>
                }
            })
            .collect_view()
    };

    let on_refresh = move |_| {
        let session = ctx.session();
        leptos::task::spawn_local(async move {
            // A failed refresh signs out and shows `/login` from inside the session.
            match session.refresh_token().await {
                AuthOutcome::Success(_) => ui.update(|u| u.notify(NoticeKind::Success, "Session refreshed")),
                AuthOutcome::Failure { message, .. } => ui.update(|u| u.notify(NoticeKind::Error, message)),
            }
        });
    };

    view! {
        <section class="dashboard">
            <h1 class="dashboard__greeting">{greeting}</h1>
            <dl class="dashboard__identity">
                <dt>"Email"</dt>
                <dd>{move || state.get().user.map(|u| u.email).unwrap_or_default()}</dd>
                <dt>"Roles"</dt>
                <dd>{roles}</dd>
                <dt>"Permissions"</dt>
                <dd>{permissions}</dd>
            </dl>
            <div class="dashboard__shortcuts">{shortcuts}</div>
            <button class="btn" on:click=on_refresh disabled=move || state.get().loading>
                "Refresh session"
            </button>
        </section>
    }
}
