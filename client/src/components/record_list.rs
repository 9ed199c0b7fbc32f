//! Infinite-scrolling table over a cursor-paginated listing.
//!
//! DESIGN
//! ======
//! Owns one [`InfiniteQuery`] per mounted table. Changing the filters (or
//! bumping `reload`) starts over from the first page; the query itself drops
//! responses to requests issued under older filters.

#[cfg(test)]
#[path = "record_list_test.rs"]
mod record_list_test;

use leptos::prelude::*;
use portal::pagination::{InfiniteQuery, ListQuery, Page};
use portal::resources::{Record, Sort, SortDirection};

use crate::state::session::use_session;
use crate::util::form::error_message;

/// One table column bound to a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: false }
    }

    pub const fn sortable(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: true }
    }
}

pub fn cell_text(record: &Record, key: &str) -> String {
    record.text(key).unwrap_or_else(|| "-".to_owned())
}

/// Sort after clicking the header of `key`: the active column flips, any
/// other column starts ascending.
pub fn next_sort(current: &Sort, key: &str) -> Sort {
    if current.by == key {
        Sort { by: current.by.clone(), direction: current.direction.flipped() }
    } else {
        Sort { by: key.to_owned(), direction: SortDirection::Asc }
    }
}

pub fn sort_indicator(current: &Sort, key: &str) -> &'static str {
    match (current.by == key, current.direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => "▲",
        (true, SortDirection::Desc) => "▼",
    }
}

pub fn status_line(loaded: usize, has_more: bool) -> String {
    match (loaded, has_more) {
        (0, false) => "No records found.".to_owned(),
        (1, false) => "1 record".to_owned(),
        (n, false) => format!("{n} records"),
        (n, true) => format!("{n} loaded, more available"),
    }
}

#[component]
pub fn RecordList<Q>(
    query: Signal<Q>,
    columns: Vec<Column>,
    #[prop(optional)] sort: Option<Signal<Sort>>,
    #[prop(optional)] on_sort: Option<Callback<&'static str>>,
    /// Bumped by the page after a mutation to refetch from the first page.
    #[prop(optional)]
    reload: Option<ReadSignal<u64>>,
    #[prop(optional)] on_select: Option<Callback<Record>>,
    #[prop(optional)] on_delete: Option<Callback<String>>,
) -> impl IntoView
where
    Q: ListQuery<Item = Record> + Clone + Send + Sync + 'static,
{
    let ctx = use_session();
    let list = RwSignal::new(InfiniteQuery::new(query.get_untracked()));
    let columns = StoredValue::new(columns);

    let load_more = move || {
        let Some(fetch) = list.try_update(InfiniteQuery::begin_fetch).flatten() else {
            return;
        };
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            let result = client.send_json::<Page<Record>>(&fetch.request).await;
            list.update(|l| {
                l.receive(fetch.generation, result);
            });
        });
    };

    Effect::new(move || {
        let next = query.get();
        if let Some(reload) = reload {
            reload.track();
        }
        list.update(|l| l.set_query(next));
        load_more();
    });

    let header = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|col| {
                    let key = col.key;
                    let clickable = col.sortable && on_sort.is_some();
                    let indicator = move || sort.map_or("", |s| sort_indicator(&s.get(), key));
                    view! {
                        <th
                            class:sortable=clickable
                            on:click=move |_| {
                                if let (true, Some(on_sort)) = (clickable, on_sort) {
                                    on_sort.run(key);
                                }
                            }
                        >
                            {col.label}
                            " "
                            {indicator}
                        </th>
                    }
                })
                .collect_view()
        })
    };
    let has_actions = on_select.is_some() || on_delete.is_some();

    let rows = move || {
        list.with(|l| {
            columns.with_value(|cols| {
                l.items()
                    .map(|record| {
                        let cells = cols
                            .iter()
                            .map(|col| view! { <td>{cell_text(record, col.key)}</td> })
                            .collect_view();
                        let actions = has_actions.then(|| row_actions(record, on_select, on_delete));
                        view! { <tr data-id=record.id.clone()>{cells}{actions}</tr> }
                    })
                    .collect_view()
            })
        })
    };

    let error = move || {
        list.with(|l| {
            l.error().map(error_message)
        })
    };
    let status = move || list.with(|l| status_line(l.items().count(), l.has_next_page()));

    view! {
        <div class="record-list">
            <table class="record-list__table">
                <thead>
                    <tr>
                        {header}
                        {has_actions.then(|| view! { <th class="record-list__actions"></th> })}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Show when=move || error().is_some()>
                <p class="record-list__error">{move || error().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !list.with(InfiniteQuery::is_loading)
                fallback=|| view! { <p class="record-list__status">"Loading..."</p> }
            >
                <p class="record-list__status">{status}</p>
            </Show>
            <Show when=move || list.with(|l| l.has_next_page() && !l.is_loading() && !l.is_fetching_next_page())>
                <button class="btn record-list__more" on:click=move |_| load_more()>
                    "Load more"
                </button>
            </Show>
        </div>
    }
}

fn row_actions(record: &Record, on_select: Option<Callback<Record>>, on_delete: Option<Callback<String>>) -> impl IntoView + use<> {
    let selected = record.clone();
    let id = record.id.clone();
    view! {
        <td class="record-list__actions">
            {on_select.map(|on_select| {
                view! {
                    <button class="btn btn--small" on:click=move |_| on_select.run(selected.clone())>
                        "Edit"
                    </button>
                }
            })}
            {on_delete.map(|on_delete| {
                view! {
                    <button class="btn btn--small btn--danger" on:click=move |_| on_delete.run(id.clone())>
                        "Delete"
                    </button>
                }
            })}
        </td>
    }
}
