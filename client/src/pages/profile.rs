//! Profile page: the signed-in user's own posts with edit and delete, a new
//! avatar upload, and account deletion. Viewing someone else's id shows their
//! posts read-only.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::post_feed::PostFeed;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::AvatarUpload;
use crate::router::routes::HOME_PATH;
use crate::state::session::SessionStore;

/// Largest avatar the backend accepts.
pub const MAX_AVATAR_BYTES: usize = 1024 * 1024;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Check a picked avatar file the way the backend will: at most
/// [`MAX_AVATAR_BYTES`], and PNG or JPEG by content rather than by name.
///
/// # Errors
///
/// Returns the message to show next to the picker.
pub fn validate_avatar(file_name: &str, bytes: Vec<u8>) -> Result<AvatarUpload, &'static str> {
    if bytes.is_empty() {
        return Err("Pick an image to upload.");
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err("Avatars are limited to 1MB.");
    }
    let content_type = if bytes.starts_with(PNG_MAGIC) {
        "image/png"
    } else if bytes.starts_with(JPEG_MAGIC) {
        "image/jpeg"
    } else {
        return Err("Avatars must be PNG or JPEG images.");
    };
    Ok(AvatarUpload { file_name: file_name.to_owned(), content_type: content_type.to_owned(), bytes })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();
    let params = use_params_map();
    let profile_id = Signal::derive(move || params.read().get("id"));
    let is_own = Memo::new(move |_| profile_id.get().is_some_and(|id| !id.is_empty() && id == session.user()));

    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let upload_avatar = {
        let client = client.clone();
        Callback::new(move |(file_name, bytes): (String, Vec<u8>)| {
            if busy.get_untracked() {
                return;
            }
            let upload = match validate_avatar(&file_name, bytes) {
                Ok(upload) => upload,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
            let user_id = profile_id.get_untracked().unwrap_or_default();
            busy.set(true);
            info.set("Uploading avatar...".to_owned());
            let client = client.clone();
            leptos::task::spawn_local(async move {
                match api::update_avatar(&client, &user_id, &upload).await {
                    Ok(user) => info.set(format!("Avatar updated ({}).", user.avatar)),
                    Err(e) => info.set(api::error_message(&e)),
                }
                busy.set(false);
            });
        })
    };

    let on_avatar_change = {
        #[cfg(feature = "csr")]
        {
            move |ev: leptos::ev::Event| {
                use wasm_bindgen::JsCast;

                let Some(file) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .and_then(|input| input.files())
                    .and_then(|files| files.get(0))
                else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                        Ok(buffer) => {
                            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                            upload_avatar.run((file.name(), bytes));
                        }
                        Err(e) => info.set(format!("Could not read the image: {e:?}")),
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = upload_avatar;
            move |_ev: leptos::ev::Event| {}
        }
    };

    let on_delete_account = move |_| {
        if busy.get_untracked() {
            return;
        }
        let user_id = profile_id.get_untracked().unwrap_or_default();
        busy.set(true);
        info.set("Deleting account...".to_owned());
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::delete_account(&client, &user_id).await {
                Ok(()) => navigate(HOME_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() }),
                Err(e) => info.set(api::error_message(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="profile-page">
            <h1>
                {move || {
                    if is_own.get() {
                        "Your posts".to_owned()
                    } else {
                        format!("Profile {}", profile_id.get().unwrap_or_default())
                    }
                }}
            </h1>
            <label class="profile-page__avatar" hidden=move || !is_own.get()>
                "New avatar "
                <input
                    type="file"
                    accept="image/png,image/jpeg"
                    disabled=move || busy.get()
                    on:change=on_avatar_change
                />
            </label>
            <PostFeed author_id=profile_id editable=is_own/>
            <button
                class="btn btn--danger profile-page__delete"
                hidden=move || !is_own.get()
                disabled=move || busy.get()
                on:click=on_delete_account
            >
                "Delete account"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="profile-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
