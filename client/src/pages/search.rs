//! User search with "load more" paging on the `created` cursor.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::User;

/// The backend returns at most this many users per page.
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Cursor for the page after `page`, or `None` when `page` was the last.
pub fn next_cursor(page: &[User]) -> Option<String> {
    if page.len() < SEARCH_PAGE_SIZE {
        return None;
    }
    page.last().and_then(|user| user.created.clone())
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();

    let query = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<User>::new());
    let cursor = RwSignal::new(None::<String>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let fetch = Callback::new(move |append: bool| {
        let term = query.get_untracked().trim().to_owned();
        if term.is_empty() || busy.get_untracked() {
            return;
        }
        let prev = if append { cursor.get_untracked() } else { None };
        busy.set(true);
        info.set(String::new());

        let client = client.clone();
        leptos::task::spawn_local(async move {
            match api::search_users(&client, &term, prev.as_deref()).await {
                Ok(page) => {
                    cursor.set(next_cursor(&page));
                    if page.is_empty() && !append {
                        info.set("No users found.".to_owned());
                    }
                    results.update(|list| {
                        if !append {
                            list.clear();
                        }
                        list.extend(page);
                    });
                }
                Err(e) => info.set(api::error_message(&e)),
            }
            busy.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        fetch.run(false);
    };

    view! {
        <section class="search-page">
            <h1>"Search"</h1>
            <form class="search-form" on:submit=on_submit>
                <input
                    class="search-input"
                    type="search"
                    placeholder="Find people by name"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button class="search-button" type="submit" disabled=move || busy.get()>
                    "Search"
                </button>
            </form>
            <ul class="search-results">
                <For each=move || results.get() key=|user| user.id.clone() let:user>
                    <li class="search-results__item">
                        <A href=format!("/author/{}", user.id)>{user.name}</A>
                    </li>
                </For>
            </ul>
            <Show when=move || cursor.get().is_some()>
                <button class="search-more" disabled=move || busy.get() on:click=move |_| fetch.run(true)>
                    "Load more"
                </button>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="search-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
