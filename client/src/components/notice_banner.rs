//! Dismissable banner for the current [`Notice`](crate::state::ui::Notice).

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    move || {
        ui.get().notice.map(|notice| {
            view! {
                <div class=notice.kind.class() role="status">
                    <span class="notice__text">{notice.text}</span>
                    <button class="notice__close" title="Dismiss" on:click=move |_| ui.update(UiState::dismiss_notice)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
