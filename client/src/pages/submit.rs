//! Post composer.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::PostSubmission;
use crate::router::routes::HOME_PATH;

pub const MAX_TITLE_CHARS: usize = 50;
pub const MAX_BODY_CHARS: usize = 5000;

/// Trim and length-check a post. Limits count characters, not bytes.
///
/// # Errors
///
/// Returns the message to show next to the form.
pub fn validate_post_input(title: &str, body: &str) -> Result<PostSubmission, &'static str> {
    let title = title.trim();
    let body = body.trim();
    if title.is_empty() || body.is_empty() {
        return Err("A post needs a title and a body.");
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err("Titles are limited to 50 characters.");
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err("Posts are limited to 5000 characters.");
    }
    Ok(PostSubmission { title: title.to_owned(), body: body.to_owned() })
}

#[component]
pub fn SubmitPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let remaining = move || MAX_BODY_CHARS.saturating_sub(body.get().chars().count());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let submission = match validate_post_input(&title.get(), &body.get()) {
            Ok(submission) => submission,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Posting...".to_owned());

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::submit_post(&client, &submission).await {
                Ok(()) => navigate(HOME_PATH, NavigateOptions::default()),
                Err(e) => info.set(api::error_message(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="submit-page">
            <h1>"New post"</h1>
            <form class="submit-form" on:submit=on_submit>
                <input
                    class="submit-input"
                    type="text"
                    maxlength="50"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    class="submit-body"
                    rows="10"
                    placeholder="What's on your mind?"
                    prop:value=move || body.get()
                    on:input=move |ev| body.set(event_target_value(&ev))
                ></textarea>
                <p class="submit-remaining">{remaining} " characters left"</p>
                <button class="submit-button" type="submit" disabled=move || busy.get()>
                    "Post"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="submit-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
