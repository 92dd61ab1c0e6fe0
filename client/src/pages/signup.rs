//! Signup page. A successful signup leaves the backend's auth cookies in
//! place; the HTTP interceptor copies the new identity into the session.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::login::safe_redirect_target;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::SignupRequest;

const MAX_NAME_LEN: usize = 15;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if name.is_empty() || name.len() > MAX_NAME_LEN || !valid_chars {
        return Err("Names are 1-15 letters, digits, or underscores.");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address.");
    };
    let domain_ok = !domain.is_empty()
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
        && domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if email.len() > MAX_EMAIL_LEN || local.is_empty() || local.contains(char::is_whitespace) || !domain_ok {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

/// At least eight bytes with an upper-case letter, a lower-case letter, a
/// digit, and a symbol. Spaces are allowed.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(char::is_numeric);
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    if password.len() < MIN_PASSWORD_LEN || !(has_upper && has_lower && has_digit && has_symbol) {
        return Err("Passwords need 8+ characters with upper, lower, digit, and symbol.");
    }
    Ok(())
}

/// Trim the fields and check them against the backend's signup rules.
///
/// # Errors
///
/// Returns the first message a user should see.
pub fn validate_signup_input(name: &str, email: &str, password: &str) -> Result<SignupRequest, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.trim().is_empty() {
        return Err("Enter a name, email, and password.");
    }
    validate_name(name)?;
    validate_email(email)?;
    validate_password(password)?;
    Ok(SignupRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let navigate = use_navigate();
    let query = use_query_map();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_signup_input(&name.get(), &email.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let target = safe_redirect_target(query.read().get("redirect").as_deref());
        busy.set(true);
        info.set("Creating account...".to_owned());

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::signup(&client, &request).await {
                Ok(()) => navigate(&target, NavigateOptions::default()),
                Err(e) => info.set(api::error_message(&e)),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="signup-page">
            <h1>"Sign up"</h1>
            <form class="signup-form" on:submit=on_submit>
                <input
                    class="signup-input"
                    type="text"
                    maxlength="15"
                    placeholder="name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="signup-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="signup-input"
                    type="password"
                    placeholder="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="signup-button" type="submit" disabled=move || busy.get()>
                    "Create account"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="signup-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
