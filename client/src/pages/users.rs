//! User management: filtered listing plus create, edit and delete.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;
use portal::resources::{self, ALL, Record, UserQuery};
use portal::routes::{ROLE_ADMIN, ROLE_ASSOCIATION, ROLE_TECHNICIAN};
use serde_json::{Map, Value};

use crate::components::record_list::{Column, RecordList, next_sort};
use crate::state::session::use_session;
use crate::state::ui::{NoticeKind, UiState};
use crate::util::form::{error_message, non_blank};

const ROLE_OPTIONS: [&str; 3] = [ROLE_ADMIN, ROLE_TECHNICIAN, ROLE_ASSOCIATION];

/// Editor contents. `editing` holds the id of the user being edited; `None`
/// creates a new one.
#[derive(Clone, Debug, Default, PartialEq)]
struct UserForm {
    editing: Option<String>,
    name: String,
    email: String,
    password: String,
    role: String,
}

impl UserForm {
    fn from_record(record: &Record) -> Self {
        Self {
            editing: Some(record.id.clone()),
            name: record.text("name").unwrap_or_default(),
            email: record.text("email").unwrap_or_default(),
            password: String::new(),
            role: record.text("role").unwrap_or_default(),
        }
    }
}

/// Request body for the form. A password is required for new users; when
/// editing, an empty password leaves the current one in place.
fn user_payload(form: &UserForm) -> Result<Value, &'static str> {
    let name = non_blank(&form.name).ok_or("Name is required.")?;
    let email = non_blank(&form.email).ok_or("Email is required.")?;
    let mut body = Map::new();
    body.insert("name".into(), Value::String(name));
    body.insert("email".into(), Value::String(email));
    match (form.editing.is_some(), form.password.is_empty()) {
        (false, true) => return Err("Password is required for new users."),
        (_, false) => {
            body.insert("password".into(), Value::String(form.password.clone()));
        }
        (true, true) => {}
    }
    if let Some(role) = non_blank(&form.role) {
        body.insert("role".into(), Value::String(role));
    }
    Ok(Value::Object(body))
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let query = RwSignal::new(UserQuery::default());
    let reload = RwSignal::new(0_u64);
    let form = RwSignal::new(UserForm::default());
    let saving = RwSignal::new(false);

    let on_sort = Callback::new(move |key: &'static str| query.update(|q| q.sort = next_sort(&q.sort, key)));
    let on_select = Callback::new(move |record: Record| form.set(UserForm::from_record(&record)));
    let on_delete = Callback::new(move |id: String| {
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            match resources::delete_user(&client, &id).await {
                Ok(_) => {
                    ui.update(|u| u.notify(NoticeKind::Success, "User deleted"));
                    reload.update(|n| *n += 1);
                }
                Err(err) => ui.update(|u| u.notify(NoticeKind::Error, error_message(&err))),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get();
        let body = match user_payload(&current) {
            Ok(body) => body,
            Err(message) => {
                ui.update(|u| u.notify(NoticeKind::Error, message));
                return;
            }
        };
        saving.set(true);
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            let result = match &current.editing {
                Some(id) => resources::update_user(&client, id, body).await,
                None => resources::create_user(&client, body).await,
            };
            match result {
                Ok(_) => {
                    let text = if current.editing.is_some() { "User updated" } else { "User created" };
                    ui.update(|u| u.notify(NoticeKind::Success, text));
                    form.set(UserForm::default());
                    reload.update(|n| *n += 1);
                }
                Err(err) => ui.update(|u| u.notify(NoticeKind::Error, error_message(&err))),
            }
            saving.set(false);
        });
    };

    let role_filter = move || query.with(|q| q.role.clone().unwrap_or_else(|| ALL.to_owned()));

    view! {
        <section class="users">
            <div class="filters">
                <input
                    class="input"
                    type="search"
                    placeholder="Search users"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:change=move |ev| query.update(|q| q.search = event_target_value(&ev))
                />
                <select
                    class="input"
                    prop:value=role_filter
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.role = (value != ALL).then_some(value));
                    }
                >
                    <option value=ALL>"All roles"</option>
                    {ROLE_OPTIONS.into_iter().map(|role| view! { <option value=role>{role}</option> }).collect_view()}
                </select>
            </div>

            <RecordList
                query=Signal::derive(move || query.get())
                columns=vec![
                    Column::sortable("name", "Name"),
                    Column::sortable("email", "Email"),
                    Column::new("role", "Role"),
                    Column::sortable("created_at", "Created"),
                ]
                sort=Signal::derive(move || query.with(|q| q.sort.clone()))
                on_sort=on_sort
                reload=reload.read_only()
                on_select=on_select
                on_delete=on_delete
            />

            <form class="editor" on:submit=on_submit>
                <h2>{move || if form.with(|f| f.editing.is_some()) { "Edit user" } else { "New user" }}</h2>
                <input
                    class="input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    class="input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <select
                    class="input"
                    prop:value=move || form.with(|f| f.role.clone())
                    on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                >
                    <option value="">"No role"</option>
                    {ROLE_OPTIONS.into_iter().map(|role| view! { <option value=role>{role}</option> }).collect_view()}
                </select>
                <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                    "Save"
                </button>
                <button class="btn" type="button" on:click=move |_| form.set(UserForm::default())>
                    "Clear"
                </button>
            </form>
        </section>
    }
}
