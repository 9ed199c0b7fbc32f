//! Route wrapper that renders its children only after the guard allows it.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use portal::routes::RouteName;

use crate::state::session::use_session;
use crate::state::ui::UiState;
use crate::util::guard::install_route_guard;

#[component]
pub fn Guarded(route: RouteName, children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let allowed = install_route_guard(ctx, ui, route, use_navigate());

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <div class="page-loading">"Loading..."</div> }>
            {children()}
        </Show>
    }
}
