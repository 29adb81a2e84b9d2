//! Shown when a signed-in role opens a route outside its allow-list.

use leptos::prelude::*;

use crate::components::protected::use_mounted;
use crate::state::auth::use_auth;
use crate::util::nav::home_for;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let session = use_auth().session();
    let mounted = use_mounted();
    let home = move || session.with(|s| home_for(s.role));

    view! {
        <section class="page unauthorized-page">
            <h1>"Access denied"</h1>
            <p>"Your role does not have access to this page."</p>
            <Show when=move || mounted.get() && session.with(|s| s.is_authenticated) fallback=|| view! { <a class="btn" href="/login">"Sign in"</a> }>
                <a class="btn" href=home>"Go to your home page"</a>
            </Show>
        </section>
    }
}
