//! Route guard wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every authenticated route. The decision is re-evaluated whenever the
//! session or location changes, so logging out anywhere bounces the current
//! page to `/login`.
//!
//! The server renders without a session, so nothing session-dependent is
//! shown until the browser has mounted; server and first client render agree.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::types::Role;
use crate::state::auth::use_auth;
use crate::util::guard::{GuardDecision, current_target, decide};

/// `false` during server rendering and hydration, `true` once mounted.
pub fn use_mounted() -> ReadSignal<bool> {
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));
    mounted.read_only()
}

/// Render `children` only for sessions admitted by `roles`; redirect otherwise.
#[component]
pub fn Protected(#[prop(optional)] roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let session = use_auth().session();
    let location = use_location();
    let navigate = use_navigate();
    let mounted = use_mounted();

    let decision = Memo::new(move |_| {
        let target = current_target(&location.pathname.get(), &location.search.get());
        session.with(|s| decide(s, roles, &target))
    });

    Effect::new(move || {
        if !mounted.get() {
            return;
        }
        let decision = decision.get();
        if let Some(target) = decision.redirect() {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || mounted.get() && decision.get() == GuardDecision::Allow
            fallback=|| view! { <div class="guard-pending">"Redirecting..."</div> }
        >
            {children()}
        </Show>
    }
}
