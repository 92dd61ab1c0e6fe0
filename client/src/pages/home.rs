//! Home page: the post feed, newest first.

use leptos::prelude::*;

use crate::components::post_feed::PostFeed;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="home-page">
            <h1>"Latest posts"</h1>
            <PostFeed author_id={None::<String>} editable=false/>
        </section>
    }
}
