//! Revenue dashboard for administrators.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route for superadmin and admin. Fetches `GET /revenue/summary` on
//! mount and on demand; results are applied only while the page is mounted.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::{RevenueSummary, StationRevenue};
use crate::state::auth::use_auth;
use crate::state::toast::{ToastState, notify_api_error, use_toasts};
use crate::util::fetch::{Liveness, spawn_fetch, use_liveness};
use crate::util::format::money;

/// Card captions and values, in display order.
fn revenue_cards(summary: &RevenueSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Today", money(summary.today)),
        ("This week", money(summary.week)),
        ("This month", money(summary.month)),
        ("All time", money(summary.total)),
        ("Trips today", summary.trips_today.to_string()),
    ]
}

/// Each station's share of the breakdown total, in percent.
fn station_share(row: &StationRevenue, rows: &[StationRevenue]) -> f64 {
    let total: f64 = rows.iter().map(|r| r.amount).sum();
    if total <= 0.0 { 0.0 } else { row.amount / total * 100.0 }
}

fn load_summary(
    liveness: &Liveness,
    http: ApiClient,
    summary: RwSignal<Option<RevenueSummary>>,
    loading: RwSignal<bool>,
    toasts: RwSignal<ToastState>,
) {
    loading.set(true);
    let request = async move { api::fetch_revenue_summary(&http).await };
    spawn_fetch(liveness, request, move |result| {
        match result {
            Ok(data) => summary.set(Some(data)),
            Err(e) => notify_api_error(toasts, "dashboard: revenue summary", &e),
        }
        loading.set(false);
    });
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let http = use_auth().http().clone();
    let liveness = use_liveness();
    let summary = RwSignal::new(None::<RevenueSummary>);
    let loading = RwSignal::new(false);
    let toasts = use_toasts();

    load_summary(&liveness, http.clone(), summary, loading, toasts);

    let on_refresh = move |_| {
        if !loading.get_untracked() {
            load_summary(&liveness, http.clone(), summary, loading, toasts);
        }
    };

    view! {
        <section class="page dashboard-page">
            <header class="page__header">
                <h1>"Revenue"</h1>
                <button class="btn" on:click=on_refresh disabled=move || loading.get()>
                    "Refresh"
                </button>
            </header>
            <Show
                when=move || summary.with(Option::is_some)
                fallback=move || {
                    view! {
                        <p class="page__status">
                            {move || if loading.get() { "Loading revenue..." } else { "No revenue data." }}
                        </p>
                    }
                }
            >
                <div class="revenue-cards">
                    {move || {
                        summary
                            .get()
                            .map(|s| revenue_cards(&s))
                            .unwrap_or_default()
                            .into_iter()
                            .map(|(caption, value)| {
                                view! {
                                    <div class="revenue-card">
                                        <span class="revenue-card__caption">{caption}</span>
                                        <span class="revenue-card__value">{value}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <h2>"By station"</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Station"</th>
                            <th class="data-table__num">"Revenue"</th>
                            <th class="data-table__num">"Share"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = summary.get().map(|s| s.ranked_stations()).unwrap_or_default();
                            rows.iter()
                                .map(|row| {
                                    let share = format!("{:.1}%", station_share(row, &rows));
                                    view! {
                                        <tr>
                                            <td>{row.station_name.clone()}</td>
                                            <td class="data-table__num">{money(row.amount)}</td>
                                            <td class="data-table__num">{share}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
