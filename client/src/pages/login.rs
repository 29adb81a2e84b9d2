//! Login page: identifier + password against `POST /login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::use_auth;
use crate::util::fetch::{spawn_fetch, use_liveness};
use crate::util::guard::post_login_target;

const MISSING_FIELDS: &str = "Enter your email or username and password.";
const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Trim the identifier and require both fields.
fn validate_login_input(identifier: &str, password: &str) -> Result<(String, String), &'static str> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((identifier.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session();
    let query = use_query_map();
    let navigate = use_navigate();

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let liveness = use_liveness();

    let next = move || query.with(|q| q.get("next"));

    // Leave as soon as a session exists, whether it predates this page or
    // came from the form below.
    Effect::new(move || {
        let current = session.get();
        if current.is_authenticated {
            let target = post_login_target(next().as_deref(), current.role);
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (identifier_value, password_value) = match validate_login_input(&identifier.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let auth = auth.clone();
        let request = async move { auth.login(&identifier_value, &password_value).await };
        spawn_fetch(&liveness, request, move |ok| {
            if !ok {
                info.set(INVALID_CREDENTIALS.to_owned());
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Fleet Console"</h1>
                <p class="login-card__subtitle">"Sign in to manage bikes and stations"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Email or username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
