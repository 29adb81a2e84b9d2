//! Paginated payment receipts with a running page total.

#[cfg(test)]
#[path = "receipts_test.rs"]
mod receipts_test;

use leptos::prelude::*;

use crate::components::paginator::Paginator;
use crate::net::api;
use crate::net::types::Receipt;
use crate::state::auth::use_auth;
use crate::state::toast::{notify_api_error, use_toasts};
use crate::util::fetch::{spawn_fetch, use_liveness};
use crate::util::format::{money, or_dash, timestamp};
use crate::util::pagination::{PAGE_SIZE, Page};

fn page_total(rows: &[Receipt]) -> f64 {
    rows.iter().map(|r| r.amount).sum()
}

#[component]
pub fn ReceiptsPage() -> impl IntoView {
    let http = use_auth().http().clone();
    let toasts = use_toasts();
    let liveness = use_liveness();
    let receipts = RwSignal::new(Vec::<Receipt>::new());
    let loading = RwSignal::new(true);
    let page_index = RwSignal::new(0_usize);

    let request = async move { api::fetch_receipts(&http).await };
    spawn_fetch(&liveness, request, move |result| {
        match result {
            Ok(rows) => {
                receipts.set(rows);
                page_index.set(0);
            }
            Err(e) => notify_api_error(toasts, "receipts: fetch", &e),
        }
        loading.set(false);
    });

    let page = Signal::derive(move || Page::new(receipts.with(Vec::len), page_index.get(), PAGE_SIZE));
    let on_page = Callback::new(move |index: usize| page_index.set(index));
    let current_total = move || {
        let current = page.get();
        receipts.with(|rows| money(page_total(current.slice(rows))))
    };

    view! {
        <section class="page receipts-page">
            <header class="page__header">
                <h1>"Receipts"</h1>
            </header>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading receipts..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Receipt"</th>
                            <th>"Trip"</th>
                            <th>"Rider"</th>
                            <th>"Method"</th>
                            <th>"Issued"</th>
                            <th class="data-table__num">"Amount"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let current = page.get();
                            receipts.with(|rows| {
                                current
                                    .slice(rows)
                                    .iter()
                                    .map(|receipt| {
                                        view! {
                                            <tr>
                                                <td>{receipt.id.clone()}</td>
                                                <td>{or_dash(Some(receipt.trip_id.as_str())).to_owned()}</td>
                                                <td>{or_dash(Some(receipt.user_name.as_str())).to_owned()}</td>
                                                <td>{or_dash(Some(receipt.payment_method.as_str())).to_owned()}</td>
                                                <td>{timestamp(&receipt.issued_at)}</td>
                                                <td class="data-table__num">{money(receipt.amount)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="5">"Page total"</td>
                            <td class="data-table__num">{current_total}</td>
                        </tr>
                    </tfoot>
                </table>
                <Paginator page=page on_change=on_page />
            </Show>
        </section>
    }
}
