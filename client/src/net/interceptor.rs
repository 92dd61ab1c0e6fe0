//! Request/response interception.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every HTTP exchange made through `ApiClient`:
//!
//! - pre-hook: copy the default header set onto the outgoing request;
//! - post-hook (success and error alike): re-derive the logged-in user from
//!   the auth cookie, mirror a fresh CSRF token into the default headers, and
//!   rotate the `X-REQUEST-ID` correlation id for the next request.
//!
//! DESIGN
//! ======
//! Default headers are a tab-wide, last-write-wins map shared by clones of the
//! interceptor. Exchanges may interleave in any order; nothing here assumes
//! otherwise.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::http::{ApiRequest, ApiResponse};
use crate::auth::AUTH_COOKIE;
use crate::auth::token::parse_session_token;
use crate::state::session::SessionStore;
use crate::util::cookie::SharedCookieJar;
use crate::util::request_id::generate_request_id;

/// Response header carrying the server's anti-forgery token.
pub const CSRF_HEADER: &str = "x-csrf-token";
/// Outgoing correlation id header.
pub const REQUEST_ID_HEADER: &str = "X-REQUEST-ID";

/// Headers attached to every outgoing request. Keys are stored lowercase.
#[derive(Clone, Debug, Default)]
pub struct DefaultHeaders {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl DefaultHeaders {
    pub fn set(&self, name: &str, value: impl Into<String>) {
        let mut headers = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        let headers = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        headers.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn snapshot(&self) -> Vec<(String, String)> {
        let headers = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[derive(Clone)]
pub struct Interceptor {
    session: SessionStore,
    cookies: SharedCookieJar,
    headers: DefaultHeaders,
}

impl Interceptor {
    /// Build an interceptor with a seeded correlation id, so the first
    /// request is stamped as well.
    pub fn new(session: SessionStore, cookies: SharedCookieJar) -> Self {
        let headers = DefaultHeaders::default();
        headers.set(REQUEST_ID_HEADER, generate_request_id());
        Self { session, cookies, headers }
    }

    pub fn headers(&self) -> &DefaultHeaders {
        &self.headers
    }

    /// Pre-hook: apply default headers. Headers already set on the request win.
    pub fn before_send(&self, request: &mut ApiRequest) {
        for (name, value) in self.headers.snapshot() {
            if request.header(&name).is_none() {
                request.headers.push((name, value));
            }
        }
    }

    /// Post-hook, run for every outcome. `response` is `None` when the
    /// exchange failed before any response arrived.
    pub async fn after_exchange(&self, response: Option<&ApiResponse>) {
        self.refresh_identity().await;

        if let Some(response) = response {
            self.forward_csrf(response);
        }

        self.headers.set(REQUEST_ID_HEADER, generate_request_id());
    }

    /// Sync the session store with the auth cookie. A malformed cookie counts
    /// as logged out.
    async fn refresh_identity(&self) {
        let user_id = match self.cookies.get(AUTH_COOKIE) {
            Some(raw) => match parse_session_token(&raw) {
                Ok(identity) => identity.user_id,
                Err(e) => {
                    leptos::logging::warn!("ignoring malformed auth cookie: {e}");
                    String::new()
                }
            },
            None => String::new(),
        };

        if let Err(e) = self.session.update_user(user_id).await {
            leptos::logging::warn!("session update after exchange failed: {e}");
        }
    }

    fn forward_csrf(&self, response: &ApiResponse) {
        if let Some(token) = response.header(CSRF_HEADER).filter(|t| !t.is_empty()) {
            self.headers.set(CSRF_HEADER, token);
        }
    }
}
