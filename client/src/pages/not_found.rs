use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found-page">
            <h1>"Page not found"</h1>
            <A href="/">"Back to the feed"</A>
        </section>
    }
}
