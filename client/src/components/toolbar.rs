//! Top bar displaying the page title, theme toggle, identity, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Visible on every authenticated page; logout goes through the session
//! store, which clears state and navigates to `/login` itself.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use portal::routes::RouteName;

use crate::state::session::{display_name, use_session};
use crate::state::ui::{NoticeKind, UiState};

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let location = use_location();

    let page_title = move || RouteName::match_path(&location.pathname.get()).title();
    let identity = move || display_name(&ctx.state().get()).unwrap_or_default();

    let on_logout = move |_| {
        let session = ctx.session();
        leptos::task::spawn_local(async move {
            if let Err(err) = session.logout().await {
                let text = err.server_message().unwrap_or("Logout failed").to_owned();
                ui.update(|u| u.notify(NoticeKind::Error, text));
            }
        });
    };

    view! {
        <header class="toolbar">
            <button
                class="btn toolbar__menu"
                title="Toggle navigation"
                on:click=move |_| ui.update(|u| u.sidebar_open = !u.sidebar_open)
            >
                "☰"
            </button>
            <span class="toolbar__title">{page_title}</span>
            <span class="toolbar__spacer"></span>

            <button
                class="btn toolbar__theme-toggle"
                on:click=move |_| {
                    let current = ui.get().dark_mode;
                    let next = crate::util::theme::toggle(current);
                    ui.update(|u| u.dark_mode = next);
                }
                title="Toggle dark mode"
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>

            <span class="toolbar__self">{identity}</span>

            <button
                class="btn toolbar__logout"
                on:click=on_logout
                disabled=move || ctx.state().get().loading
                title="Logout"
            >
                "Logout"
            </button>
        </header>
    }
}
