//! Navigation guard run before every route transition.
//!
//! A user counts as logged out when the session store is empty or the auth
//! cookie is gone. Private routes send logged-out users to `/login` (after
//! clearing both), and `/login` sends logged-in users home.
//!
//! [`decide`] is the pure decision; [`NavigationGuard::before_each`] adds the
//! side effects and yields the final redirect target, if any.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{HOME_PATH, LOGIN_PATH, RouteMeta, match_route, path_of};
use crate::auth::AUTH_COOKIE;
use crate::state::session::SessionStore;
use crate::util::cookie::SharedCookieJar;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Private route while logged out. Carries the originally requested path.
    LoginRequired { redirect: String },
    /// Logged-out-only route while logged in.
    AlreadyLoggedIn,
}

pub fn is_logged_out(user_id: &str, cookie_present: bool) -> bool {
    user_id.is_empty() || !cookie_present
}

/// Decide what to do with a navigation to `full_path`.
///
/// The login check runs first, so a route misconfigured as both private and
/// logged-out-only resolves to the login redirect.
pub fn decide(meta: RouteMeta, user_id: &str, cookie_present: bool, full_path: &str) -> GuardDecision {
    let logged_out = is_logged_out(user_id, cookie_present);

    if !meta.public && logged_out {
        return GuardDecision::LoginRequired { redirect: full_path.to_owned() };
    }

    if meta.only_when_logged_out && !logged_out {
        return GuardDecision::AlreadyLoggedIn;
    }

    GuardDecision::Allow
}

/// `/login?redirect=<encoded path>`.
pub fn login_redirect_path(redirect: &str) -> String {
    format!("{LOGIN_PATH}?redirect={}", urlencoding::encode(redirect))
}

/// Guard bound to the app's session store and cookie jar.
#[derive(Clone)]
pub struct NavigationGuard {
    session: SessionStore,
    cookies: SharedCookieJar,
}

impl NavigationGuard {
    pub fn new(session: SessionStore, cookies: SharedCookieJar) -> Self {
        Self { session, cookies }
    }

    /// Pure check against the current session and cookie.
    pub fn check(&self, full_path: &str) -> GuardDecision {
        let route = match_route(path_of(full_path));
        let cookie_present = self.cookies.get(AUTH_COOKIE).is_some();
        decide(route.meta, &self.session.user_untracked(), cookie_present, full_path)
    }

    /// Carry out `decision`. Returns where to redirect, or `None` to proceed.
    ///
    /// A login redirect first deletes the auth cookie and resets the session;
    /// a failed reset is logged and the redirect happens anyway.
    pub async fn enforce(&self, decision: GuardDecision) -> Option<String> {
        match decision {
            GuardDecision::Allow => None,
            GuardDecision::LoginRequired { redirect } => {
                self.cookies.remove(AUTH_COOKIE);
                if let Err(e) = self.session.update_user("").await {
                    leptos::logging::warn!("session reset before login redirect failed: {e}");
                }
                Some(login_redirect_path(&redirect))
            }
            GuardDecision::AlreadyLoggedIn => Some(HOME_PATH.to_owned()),
        }
    }

    /// Check and enforce in one step.
    pub async fn before_each(&self, full_path: &str) -> Option<String> {
        let decision = self.check(full_path);
        self.enforce(decision).await
    }
}
