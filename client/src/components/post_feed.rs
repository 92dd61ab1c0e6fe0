//! Paged post feed shared by the home, author and profile pages.
//!
//! The feed loads its first page whenever the author filter changes and
//! offers "Load more" while the backend reports another page. With
//! `editable` set, each post carries inline edit and delete controls.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::Post;
use crate::pages::submit::validate_post_input;

#[component]
pub fn PostFeed(
    /// Show only this author's posts; `None` is the whole feed.
    #[prop(into)]
    author_id: Signal<Option<String>>,
    #[prop(into)] editable: Signal<bool>,
    /// Receives the author's display name once one of their posts loads.
    #[prop(optional)]
    author_name: Option<RwSignal<String>>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();

    let posts = RwSignal::new(Vec::<Post>::new());
    let cursor = RwSignal::new(None::<String>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let loaded = RwSignal::new(false);

    let fetch = Callback::new(move |append: bool| {
        if append && busy.get_untracked() {
            return;
        }
        let prev = if append { cursor.get_untracked() } else { None };
        let author = author_id.get_untracked();
        busy.set(true);
        info.set(String::new());

        let client = client.clone();
        leptos::task::spawn_local(async move {
            let result = match author.as_deref() {
                Some(id) => api::author_posts_page(&client, id, prev.as_deref()).await,
                None => api::posts_page(&client, prev.as_deref()).await,
            };
            // The filter moved on while this page was in flight.
            if author_id.get_untracked() != author {
                return;
            }
            match result {
                Ok(page) => {
                    if let (Some(name), Some(first)) = (author_name, page.posts.first()) {
                        name.set(first.author.name.clone());
                    }
                    cursor.set(page.next);
                    posts.update(|list| {
                        if !append {
                            list.clear();
                        }
                        list.extend(page.posts);
                    });
                }
                Err(e) => info.set(api::error_message(&e)),
            }
            loaded.set(true);
            busy.set(false);
        });
    });

    Effect::new(move || {
        author_id.track();
        loaded.set(false);
        posts.set(Vec::new());
        cursor.set(None);
        fetch.run(false);
    });

    let on_deleted = Callback::new(move |post_id: String| posts.update(|list| list.retain(|post| post.id != post_id)));
    let on_edited = Callback::new(move |edited: Post| {
        posts.update(|list| {
            if let Some(slot) = list.iter_mut().find(|post| post.id == edited.id) {
                *slot = edited;
            }
        });
    });

    view! {
        <div class="post-feed">
            <Show when=move || !loaded.get()>
                <p class="post-feed__loading">"Loading posts..."</p>
            </Show>
            <Show when=move || loaded.get() && posts.with(Vec::is_empty) && cursor.with(Option::is_none)>
                <p class="post-list__empty">"No posts yet."</p>
            </Show>
            <ul class="post-list">
                <For
                    each=move || posts.get()
                    key=|post| (post.id.clone(), post.title.clone(), post.body.clone())
                    let:post
                >
                    <PostItem post editable on_deleted on_edited/>
                </For>
            </ul>
            <Show when=move || cursor.get().is_some()>
                <button class="post-feed__more" disabled=move || busy.get() on:click=move |_| fetch.run(true)>
                    "Load more"
                </button>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="error">{move || info.get()}</p>
            </Show>
        </div>
    }
}

/// One post, with owner controls when `editable`.
#[component]
fn PostItem(
    post: Post,
    editable: Signal<bool>,
    on_deleted: Callback<String>,
    on_edited: Callback<Post>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();

    let editing = RwSignal::new(false);
    let title = RwSignal::new(post.title.clone());
    let body = RwSignal::new(post.body.clone());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let original = StoredValue::new(post.clone());

    let on_delete = {
        let client = client.clone();
        move |_| {
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            let post_id = original.with_value(|post| post.id.clone());
            let client = client.clone();
            leptos::task::spawn_local(async move {
                let result = api::delete_post(&client, &post_id).await;
                busy.set(false);
                match result {
                    Ok(()) => on_deleted.run(post_id),
                    Err(e) => info.set(api::error_message(&e)),
                }
            });
        }
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let submission = match validate_post_input(&title.get_untracked(), &body.get_untracked()) {
            Ok(submission) => submission,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());
        let post = original.get_value();
        let client = client.clone();
        leptos::task::spawn_local(async move {
            let result = api::edit_post(&client, &post, &submission).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    editing.set(false);
                    on_edited.run(Post { title: submission.title, body: submission.body, ..post });
                }
                Err(e) => info.set(api::error_message(&e)),
            }
        });
    };

    let on_cancel = move |_| {
        original.with_value(|post| {
            title.set(post.title.clone());
            body.set(post.body.clone());
        });
        info.set(String::new());
        editing.set(false);
    };

    let author_href = format!("/author/{}", post.author.id);
    view! {
        <li class="post-list__item">
            <div hidden=move || editing.get()>
                <h2 class="post-list__title">{post.title}</h2>
                <p class="post-list__meta">
                    "by "
                    <A href=author_href>{post.author.name}</A>
                    " on "
                    <time>{post.created}</time>
                </p>
                <p class="post-list__body">{post.body}</p>
                <button
                    class="btn"
                    hidden=move || !editable.get()
                    disabled=move || busy.get()
                    on:click=move |_| editing.set(true)
                >
                    "Edit"
                </button>
                <button
                    class="btn btn--danger"
                    hidden=move || !editable.get()
                    disabled=move || busy.get()
                    on:click=on_delete
                >
                    "Delete"
                </button>
            </div>
            <form class="post-edit" hidden=move || !editing.get() on:submit=on_save>
                <input
                    class="post-edit__title"
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="post-edit__body"
                    prop:value=move || body.get()
                    on:input=move |ev| body.set(event_target_value(&ev))
                ></textarea>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
                <button class="btn" type="button" on:click=on_cancel>
                    "Cancel"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="error">{move || info.get()}</p>
            </Show>
        </li>
    }
}
