use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="about-page">
            <h1>"About"</h1>
            <p>"A small place to share short posts. Sign up to write your own, or search for people to read."</p>
        </section>
    }
}
