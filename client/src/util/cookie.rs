//! Cookie access for the auth cookie.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard and the HTTP interceptor only ever read one cookie and, on a
//! forced logout, delete it. Both go through [`CookieJar`] so the decision
//! logic runs against [`MemoryCookieJar`] in tests and `document.cookie` in
//! the browser.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Read/delete access to browser cookies.
pub trait CookieJar: Send + Sync {
    /// Value of cookie `name`; empty values count as absent.
    fn get(&self, name: &str) -> Option<String>;

    /// Expire cookie `name` for the whole site.
    fn remove(&self, name: &str);
}

pub type SharedCookieJar = Arc<dyn CookieJar>;

/// Find cookie `name` in a `document.cookie` style string (`a=1; b=2`).
///
/// Values are percent-decoded. Empty values are treated as absent.
pub fn find_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            urlencoding::decode(value.trim())
                .map_or_else(|_| value.trim().to_owned(), std::borrow::Cow::into_owned)
        })
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` style string that expires `name` on the root path.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
}

/// Cookies of the current document.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookieJar;

#[cfg(feature = "csr")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

impl CookieJar for DocumentCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let header = html_document()?.cookie().ok()?;
            find_cookie(&header, name)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = name;
            None
        }
    }

    fn remove(&self, name: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(doc) = html_document() {
                if doc.set_cookie(&expired_cookie(name)).is_err() {
                    leptos::logging::warn!("failed to expire cookie {name}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = name;
        }
    }
}

/// In-memory cookie jar.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryCookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar pre-populated with a single cookie.
    #[must_use]
    pub fn with(name: &str, value: &str) -> Self {
        let jar = Self::new();
        jar.insert(name, value);
        jar
    }

    pub fn insert(&self, name: &str, value: &str) {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.insert(name.to_owned(), value.to_owned());
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.get(name).filter(|value| !value.is_empty()).cloned()
    }

    fn remove(&self, name: &str) {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.remove(name);
    }
}
