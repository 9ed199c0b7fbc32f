//! Farmer registry: filtered listing and registration of new farmers.

#[cfg(test)]
#[path = "farmers_test.rs"]
mod farmers_test;

use leptos::prelude::*;
use portal::resources::{self, FarmerQuery};
use serde_json::{Map, Value};

use crate::components::record_list::{Column, RecordList, next_sort};
use crate::state::session::use_session;
use crate::state::ui::{NoticeKind, UiState};
use crate::util::form::{error_message, non_blank};

#[derive(Clone, Debug, Default, PartialEq)]
struct FarmerForm {
    name: String,
    phone: String,
    association: String,
    address: String,
}

/// Body for `POST /api/farmers`. Only the name is required; blank optional
/// fields are left out.
fn farmer_payload(form: &FarmerForm) -> Result<Value, &'static str> {
    let name = non_blank(&form.name).ok_or("Farmer name is required.")?;
    let mut body = Map::new();
    body.insert("name".into(), Value::String(name));
    for (key, value) in [("phone", &form.phone), ("association", &form.association), ("address", &form.address)] {
        if let Some(value) = non_blank(value) {
            body.insert(key.into(), Value::String(value));
        }
    }
    Ok(Value::Object(body))
}

#[component]
pub fn FarmersPage() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let query = RwSignal::new(FarmerQuery::default());
    let reload = RwSignal::new(0_u64);
    let form = RwSignal::new(FarmerForm::default());
    let saving = RwSignal::new(false);

    let on_sort = Callback::new(move |key: &'static str| query.update(|q| q.sort = next_sort(&q.sort, key)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let body = match form.with(farmer_payload) {
            Ok(body) => body,
            Err(message) => {
                ui.update(|u| u.notify(NoticeKind::Error, message));
                return;
            }
        };
        saving.set(true);
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            match resources::create_farmer(&client, body).await {
                Ok(_) => {
                    ui.update(|u| u.notify(NoticeKind::Success, "Farmer registered"));
                    form.set(FarmerForm::default());
                    reload.update(|n| *n += 1);
                }
                Err(err) => ui.update(|u| u.notify(NoticeKind::Error, error_message(&err))),
            }
            saving.set(false);
        });
    };

    view! {
        <section class="farmers">
            <div class="filters">
                <input
                    class="input"
                    type="search"
                    placeholder="Search farmers"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:change=move |ev| query.update(|q| q.search = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="text"
                    placeholder="Association (blank for all)"
                    prop:value=move || query.with(|q| q.association.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.association = non_blank(&value));
                    }
                />
            </div>

            <RecordList
                query=Signal::derive(move || query.get())
                columns=vec![
                    Column::sortable("name", "Name"),
                    Column::new("phone", "Phone"),
                    Column::sortable("association", "Association"),
                    Column::sortable("created_at", "Registered"),
                ]
                sort=Signal::derive(move || query.with(|q| q.sort.clone()))
                on_sort=on_sort
                reload=reload.read_only()
            />

            <form class="editor" on:submit=on_submit>
                <h2>"Register farmer"</h2>
                <input
                    class="input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="tel"
                    placeholder="Phone"
                    prop:value=move || form.with(|f| f.phone.clone())
                    on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="text"
                    placeholder="Association"
                    prop:value=move || form.with(|f| f.association.clone())
                    on:input=move |ev| form.update(|f| f.association = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="text"
                    placeholder="Address"
                    prop:value=move || form.with(|f| f.address.clone())
                    on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                    "Register"
                </button>
            </form>
        </section>
    }
}
