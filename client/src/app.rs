//! Root application component with routing, the navigation guard, and
//! context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::nav_bar::NavBar;
use crate::net::http::{ApiClient, FetchTransport};
use crate::net::interceptor::Interceptor;
use crate::pages::{
    about::AboutPage, author::AuthorPage, home::HomePage, login::LoginPage, logout::LogoutPage,
    not_found::NotFoundPage, profile::ProfilePage, search::SearchPage, signup::SignupPage, submit::SubmitPage,
};
use crate::router::guard::{GuardDecision, NavigationGuard};
use crate::router::routes::full_path;
use crate::state::session::SessionStore;
use crate::util::cookie::{DocumentCookieJar, SharedCookieJar};
use crate::util::storage::LocalStorage;

/// Root application component.
///
/// Builds the session store, intercepted HTTP client, and navigation guard
/// once, and provides them to every page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let cookies: SharedCookieJar = Arc::new(DocumentCookieJar);
    let session = SessionStore::restore(Arc::new(LocalStorage));
    let client = ApiClient::new(FetchTransport, Interceptor::new(session.clone(), cookies.clone()));
    let guard = NavigationGuard::new(session.clone(), cookies.clone());

    provide_context(session);
    provide_context(cookies);
    provide_context(client);
    provide_context(guard);

    view! {
        <Title text="HP"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <GuardedRoutes/>
            </main>
        </Router>
    }
}

/// Routes rendered only after the guard allows the current location.
///
/// Every location change runs the guard. Redirects replace the history
/// entry so the back button does not bounce through a blocked route.
#[component]
fn GuardedRoutes() -> impl IntoView {
    let guard = expect_context::<NavigationGuard>();
    let location = use_location();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);

    Effect::new(move || {
        let path = full_path(&location.pathname.get(), &location.search.get(), &location.hash.get());
        let decision = guard.check(&path);
        if decision == GuardDecision::Allow {
            allowed.set(true);
            return;
        }

        allowed.set(false);
        let guard = guard.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Some(target) = guard.enforce(decision).await {
                navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    });

    view! {
        <Show when=move || allowed.get()>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("about") view=AboutPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("logout") view=LogoutPage/>
                <Route path=StaticSegment("search") view=SearchPage/>
                <Route path=(StaticSegment("author"), ParamSegment("id")) view=AuthorPage/>
                <Route path=(StaticSegment("profile"), ParamSegment("id")) view=ProfilePage/>
                <Route path=StaticSegment("submit") view=SubmitPage/>
            </Routes>
        </Show>
    }
}
