//! Author page: the feed filtered to one author's posts.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::post_feed::PostFeed;

#[component]
pub fn AuthorPage() -> impl IntoView {
    let params = use_params_map();
    let author_id = Signal::derive(move || params.read().get("id"));
    let author_name = RwSignal::new("Author".to_owned());
    Effect::new(move || {
        author_id.track();
        author_name.set("Author".to_owned());
    });

    view! {
        <section class="author-page">
            <h1>{move || author_name.get()}</h1>
            <PostFeed author_id editable=false author_name/>
        </section>
    }
}
