//! Prev/next controls shared by the paginated tables.

use leptos::prelude::*;

use crate::util::pagination::Page;

#[component]
pub fn Paginator(page: Signal<Page>, on_change: Callback<usize>) -> impl IntoView {
    view! {
        <div class="paginator">
            <span class="paginator__label">{move || page.get().label()}</span>
            <button
                class="btn paginator__prev"
                disabled=move || !page.get().has_prev()
                on:click=move |_| on_change.run(page.get_untracked().index.saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="paginator__position">
                {move || format!("Page {} of {}", page.get().index + 1, page.get().count)}
            </span>
            <button
                class="btn paginator__next"
                disabled=move || !page.get().has_next()
                on:click=move |_| on_change.run(page.get_untracked().index + 1)
            >
                "Next"
            </button>
        </div>
    }
}
