//! Technicians assigned to the signed-in association (or all, for admins).

use leptos::prelude::*;
use portal::resources::TechnicianQuery;

use crate::components::record_list::{Column, RecordList};

#[component]
pub fn TechniciansPage() -> impl IntoView {
    let query = RwSignal::new(TechnicianQuery::default());

    view! {
        <section class="technicians">
            <div class="filters">
                <input
                    class="input"
                    type="search"
                    placeholder="Search technicians"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:change=move |ev| query.update(|q| q.search = event_target_value(&ev))
                />
            </div>
            <RecordList
                query=Signal::derive(move || query.get())
                columns=vec![
                    Column::new("name", "Name"),
                    Column::new("email", "Email"),
                    Column::new("phone", "Phone"),
                    Column::new("created_at", "Joined"),
                ]
            />
        </section>
    }
}
