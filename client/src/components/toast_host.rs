//! Corner stack rendering the shared toast queue.

use leptos::prelude::*;

use crate::state::toast::use_toasts;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For each=move || toasts.get().items key=|toast| toast.id let:toast>
                <div class=format!("toast {}", toast.kind.css_modifier())>
                    <span class="toast__message">{toast.message.clone()}</span>
                    <button
                        class="toast__close"
                        aria-label="Dismiss"
                        on:click=move |_| toasts.update(|t| t.dismiss(toast.id))
                    >
                        "✕"
                    </button>
                </div>
            </For>
        </div>
    }
}
