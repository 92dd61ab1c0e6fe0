//! Login page. Reached through the navigation guard with the requested path
//! in `?redirect=`; the backend issues auth cookies at signup, so this page
//! explains why the user landed here and carries the redirect forward.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::router::routes::HOME_PATH;

/// Resolve a `?redirect=` value to an in-app path. Anything that is not a
/// same-origin absolute path falls back to home.
pub fn safe_redirect_target(redirect: Option<&str>) -> String {
    match redirect.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}

/// Signup link that keeps the pending redirect.
pub fn signup_href(redirect: Option<&str>) -> String {
    match redirect.filter(|r| !r.trim().is_empty()) {
        Some(r) => format!("/signup?redirect={}", urlencoding::encode(r)),
        None => "/signup".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let redirect = move || query.read().get("redirect");

    view! {
        <section class="login-page">
            <div class="login-card">
                <h1>"Log in"</h1>
                <Show
                    when=move || redirect().is_some()
                    fallback=|| view! { <p class="login-card__subtitle">"You are not logged in."</p> }
                >
                    <p class="login-card__subtitle">
                        "You need to be logged in to view "
                        <code>{move || safe_redirect_target(redirect().as_deref())}</code>
                        "."
                    </p>
                </Show>
                <A href=move || signup_href(redirect().as_deref())>"Create an account"</A>
            </div>
        </section>
    }
}
