//! Navigation sidebar with role-filtered entries and the signed-in identity.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, notify, use_toasts};
use crate::util::guard::LOGIN_PATH;
use crate::util::nav::visible_items;

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session();
    let toasts = use_toasts();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let items = move || session.with(|s| visible_items(s.role));
    let identity = move || {
        session.with(|s| {
            let name = s
                .user
                .as_ref()
                .map(|u| if u.name.is_empty() { u.email.clone() } else { u.name.clone() })
                .unwrap_or_default();
            let role = s.role.map(|r| r.label()).unwrap_or_default();
            (name, role)
        })
    };

    let on_logout = move |_| {
        auth.logout();
        notify(toasts, ToastKind::Info, "Signed out.");
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"Fleet Console"</div>
            <ul class="sidebar__items">
                <For each=items key=|item| item.path let:item>
                    <li>
                        <a
                            class="sidebar__link"
                            class:sidebar__link--active=move || pathname.get() == item.path
                            href=item.path
                        >
                            {item.label}
                        </a>
                    </li>
                </For>
            </ul>
            <div class="sidebar__footer">
                <span class="sidebar__name">{move || identity().0}</span>
                <span class="sidebar__role">{move || identity().1}</span>
                <button class="btn sidebar__logout" on:click=on_logout>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
