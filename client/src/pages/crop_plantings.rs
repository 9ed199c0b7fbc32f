//! Crop plantings with status, category and date-range filters.

#[cfg(test)]
#[path = "crop_plantings_test.rs"]
mod crop_plantings_test;

use leptos::prelude::*;
use portal::resources::{self, ALL, Category, CropPlantingQuery};

use crate::components::record_list::{Column, RecordList, next_sort};
use crate::state::session::use_session;
use crate::util::form::non_blank;

const STATUS_OPTIONS: [(&str, &str); 3] = [("planted", "Planted"), ("growing", "Growing"), ("harvested", "Harvested")];

/// Map a `<select>` value to a filter: the `all` option clears it.
fn select_filter(value: &str) -> Option<String> {
    non_blank(value).filter(|v| v != ALL)
}

#[component]
pub fn CropPlantingsPage() -> impl IntoView {
    let ctx = use_session();
    let query = RwSignal::new(CropPlantingQuery::default());
    let categories = RwSignal::new(Vec::<Category>::new());

    let client = ctx.client();
    leptos::task::spawn_local(async move {
        match resources::categories(&client).await {
            Ok(list) => categories.set(list),
            Err(err) => tracing::warn!(error = %err, "category lookup failed"),
        }
    });

    let on_sort = Callback::new(move |key: &'static str| query.update(|q| q.sort = next_sort(&q.sort, key)));
    let category_options = move || {
        categories
            .get()
            .into_iter()
            .map(|category| view! { <option value=category.id>{category.name}</option> })
            .collect_view()
    };

    view! {
        <section class="crop-plantings">
            <div class="filters">
                <input
                    class="input"
                    type="search"
                    placeholder="Search plantings"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:change=move |ev| query.update(|q| q.search = event_target_value(&ev))
                />
                <select
                    class="input"
                    prop:value=move || query.with(|q| q.status.clone().unwrap_or_else(|| ALL.to_owned()))
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.status = select_filter(&value));
                    }
                >
                    <option value=ALL>"All statuses"</option>
                    {STATUS_OPTIONS
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
                <select
                    class="input"
                    prop:value=move || query.with(|q| q.category.clone().unwrap_or_else(|| ALL.to_owned()))
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.category = select_filter(&value));
                    }
                >
                    <option value=ALL>"All categories"</option>
                    {category_options}
                </select>
                <input
                    class="input"
                    type="date"
                    title="From"
                    prop:value=move || query.with(|q| q.date_from.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.date_from = non_blank(&value));
                    }
                />
                <input
                    class="input"
                    type="date"
                    title="To"
                    prop:value=move || query.with(|q| q.date_to.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.date_to = non_blank(&value));
                    }
                />
            </div>

            <RecordList
                query=Signal::derive(move || query.get())
                columns=vec![
                    Column::sortable("crop_name", "Crop"),
                    Column::new("farmer_name", "Farmer"),
                    Column::new("category_name", "Category"),
                    Column::new("status", "Status"),
                    Column::sortable("planting_date", "Planted"),
                    Column::sortable("created_at", "Recorded"),
                ]
                sort=Signal::derive(move || query.with(|q| q.sort.clone()))
                on_sort=on_sort
            />
        </section>
    }
}
