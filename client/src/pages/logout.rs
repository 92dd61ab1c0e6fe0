//! Logout page. The backend has no logout endpoint, so logging out is local:
//! drop the auth cookie, clear the session, and go home.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::AUTH_COOKIE;
use crate::router::routes::HOME_PATH;
use crate::state::session::SessionStore;
use crate::util::cookie::SharedCookieJar;

#[component]
pub fn LogoutPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let cookies = expect_context::<SharedCookieJar>();
    let navigate = use_navigate();

    Effect::new(move || {
        cookies.remove(AUTH_COOKIE);
        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = session.update_user("").await {
                leptos::logging::warn!("logout could not persist the cleared session: {e}");
            }
            navigate(HOME_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    });

    view! { <p class="logout-page">"Logging out..."</p> }
}
