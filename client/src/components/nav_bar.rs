//! Top navigation bar. Links adapt to whether the session has a user.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionStore;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let logged_in = {
        let session = session.clone();
        Memo::new(move |_| session.is_logged_in())
    };
    let user_id = Memo::new(move |_| session.user());

    view! {
        <nav class="nav-bar">
            <A href="/">"Home"</A>
            <A href="/search">"Search"</A>
            <A href="/about">"About"</A>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || logged_in.get()
                fallback=|| {
                    view! {
                        <A href="/signup">"Sign up"</A>
                        <A href="/login">"Log in"</A>
                    }
                }
            >
                <A href="/submit">"Submit"</A>
                <A href=move || format!("/profile/{}", user_id.get())>"Profile"</A>
                <A href="/logout">"Log out"</A>
            </Show>
        </nav>
    }
}
