//! Role-filtered navigation sidebar.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::{NAV_ROUTES, navigable, use_session};
use crate::state::ui::UiState;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();

    let entries = move || {
        let state = ctx.state().get();
        NAV_ROUTES
            .into_iter()
            .filter(|route| navigable(&state, *route))
            .map(|route| {
                view! {
                    <li class="sidebar__item">
                        <A href=route.path()>{route.title()}</A>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="sidebar" class:sidebar--open=move || ui.get().sidebar_open>
            <div class="sidebar__brand">"Agriboard"</div>
            <ul class="sidebar__list">{entries}</ul>
        </nav>
    }
}
