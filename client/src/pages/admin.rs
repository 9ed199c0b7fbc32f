//! Administration page: look up a user's profile and replace their
//! permission set.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use portal::resources;
use serde_json::Value;

use crate::state::session::use_session;
use crate::state::ui::{NoticeKind, UiState};
use crate::util::form::{error_message, non_blank};

/// Split a comma or newline separated list into distinct, trimmed names,
/// keeping first-seen order.
fn parse_permission_list(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in input.split([',', '\n']).map(str::trim).filter(|n| !n.is_empty()) {
        if !out.iter().any(|seen| seen == name) {
            out.push(name.to_owned());
        }
    }
    out
}

/// Permission names found in a profile body (`permissions` as strings or as
/// `{name}` objects), joined for the editor.
fn permissions_from_profile(profile: &Value) -> String {
    let source = profile.get("data").unwrap_or(profile);
    source
        .get("permissions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().or_else(|| item.get("name").and_then(Value::as_str)))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let user_id = RwSignal::new(String::new());
    let permissions = RwSignal::new(String::new());
    let profile = RwSignal::new(None::<Value>);
    let busy = RwSignal::new(false);

    let on_lookup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = non_blank(&user_id.get()) else {
            ui.update(|u| u.notify(NoticeKind::Info, "Enter a user id first."));
            return;
        };
        busy.set(true);
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            match resources::user_profile(&client, &id).await {
                Ok(body) => {
                    permissions.set(permissions_from_profile(&body));
                    profile.set(Some(body));
                }
                Err(err) => {
                    profile.set(None);
                    ui.update(|u| u.notify(NoticeKind::Error, error_message(&err)));
                }
            }
            busy.set(false);
        });
    };

    let on_save = move |_| {
        let Some(id) = non_blank(&user_id.get()) else {
            return;
        };
        let names = parse_permission_list(&permissions.get());
        busy.set(true);
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            match resources::update_user_permissions(&client, &id, &names).await {
                Ok(_) => ui.update(|u| u.notify(NoticeKind::Success, "Permissions updated")),
                Err(err) => ui.update(|u| u.notify(NoticeKind::Error, error_message(&err))),
            }
            busy.set(false);
        });
    };

    let profile_text = move || {
        profile
            .get()
            .map(|body| serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()))
    };

    view! {
        <section class="admin">
            <h1>"Administration"</h1>
            <form class="admin__lookup" on:submit=on_lookup>
                <input
                    class="input"
                    type="text"
                    placeholder="User id"
                    prop:value=move || user_id.get()
                    on:input=move |ev| user_id.set(event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Load profile"
                </button>
            </form>
            <Show when=move || profile.with(Option::is_some)>
                <pre class="admin__profile">{profile_text}</pre>
                <label class="admin__permissions">
                    "Permissions (comma separated)"
                    <textarea
                        class="input"
                        prop:value=move || permissions.get()
                        on:input=move |ev| permissions.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn--primary" on:click=on_save disabled=move || busy.get()>
                    "Save permissions"
                </button>
            </Show>
        </section>
    }
}
