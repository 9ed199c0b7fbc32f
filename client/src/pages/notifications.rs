//! Notification inbox with read markers and deletion.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;
use portal::error::ApiError;
use portal::pagination::{InfiniteQuery, Page};
use portal::resources::{self, Notification, NotificationQuery};
use serde_json::Value;

use crate::state::session::use_session;
use crate::state::ui::{NoticeKind, UiState};
use crate::util::form::error_message;

fn unread_count<'a>(items: impl Iterator<Item = &'a Notification>) -> usize {
    items.filter(|n| !n.is_read()).count()
}

fn headline(notification: &Notification) -> String {
    notification.message().map_or_else(|| "(no message)".to_owned(), str::to_owned)
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let ctx = use_session();
    let ui = expect_context::<RwSignal<UiState>>();
    let list = RwSignal::new(InfiniteQuery::new(NotificationQuery));

    let load_more = move || {
        let Some(fetch) = list.try_update(InfiniteQuery::begin_fetch).flatten() else {
            return;
        };
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            let result = client.send_json::<Page<Notification>>(&fetch.request).await;
            list.update(|l| {
                l.receive(fetch.generation, result);
            });
        });
    };
    let reload = move || {
        list.update(InfiniteQuery::invalidate);
        load_more();
    };
    let settle = move |result: Result<Value, ApiError>, done: &'static str| match result {
        Ok(_) => {
            ui.update(|u| u.notify(NoticeKind::Success, done));
            reload();
        }
        Err(err) => ui.update(|u| u.notify(NoticeKind::Error, error_message(&err))),
    };

    load_more();

    let on_mark_all = move |_| {
        let client = ctx.client();
        leptos::task::spawn_local(async move {
            settle(resources::mark_all_notifications_read(&client).await, "All notifications marked as read");
        });
    };

    let rows = move || {
        list.with(|l| {
            l.items()
                .map(|notification| {
                    let read_id = notification.id.clone();
                    let delete_id = notification.id.clone();
                    let read = notification.is_read();
                    view! {
                        <li class="notification" class:notification--unread=!read>
                            <span class="notification__text">{headline(notification)}</span>
                            <span class="notification__time">{notification.created_at.clone().unwrap_or_default()}</span>
                            {(!read).then(|| view! {
                                <button
                                    class="btn btn--small"
                                    on:click=move |_| {
                                        let client = ctx.client();
                                        let id = read_id.clone();
                                        leptos::task::spawn_local(async move {
                                            settle(resources::mark_notification_read(&client, &id).await, "Marked as read");
                                        });
                                    }
                                >
                                    "Mark read"
                                </button>
                            })}
                            <button
                                class="btn btn--small btn--danger"
                                on:click=move |_| {
                                    let client = ctx.client();
                                    let id = delete_id.clone();
                                    leptos::task::spawn_local(async move {
                                        settle(resources::delete_notification(&client, &id).await, "Notification deleted");
                                    });
                                }
                            >
                                "Delete"
                            </button>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let unread = move || list.with(|l| unread_count(l.items()));

    view! {
        <section class="notifications">
            <header class="notifications__header">
                <h1>"Notifications"</h1>
                <span class="notifications__unread">{move || format!("{} unread", unread())}</span>
                <button class="btn" on:click=on_mark_all disabled=move || unread() == 0>
                    "Mark all as read"
                </button>
            </header>
            <Show when=move || list.with(|l| l.error().is_some())>
                <p class="notifications__error">{move || list.with(|l| l.error().map(error_message))}</p>
            </Show>
            <ul class="notifications__list">{rows}</ul>
            <Show when=move || list.with(|l| l.has_next_page() && !l.is_loading() && !l.is_fetching_next_page())>
                <button class="btn" on:click=move |_| load_more()>
                    "Load more"
                </button>
            </Show>
        </section>
    }
}
