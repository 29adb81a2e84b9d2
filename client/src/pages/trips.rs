//! Paginated trip history.

use leptos::prelude::*;

use crate::components::paginator::Paginator;
use crate::net::api;
use crate::net::types::Trip;
use crate::state::auth::use_auth;
use crate::state::toast::{notify_api_error, use_toasts};
use crate::util::fetch::{spawn_fetch, use_liveness};
use crate::util::format::{distance_km, money, optional_timestamp, or_dash, timestamp};
use crate::util::pagination::{PAGE_SIZE, Page};

#[component]
pub fn TripsPage() -> impl IntoView {
    let http = use_auth().http().clone();
    let toasts = use_toasts();
    let liveness = use_liveness();
    let trips = RwSignal::new(Vec::<Trip>::new());
    let loading = RwSignal::new(true);
    let page_index = RwSignal::new(0_usize);

    let request = async move { api::fetch_trips(&http).await };
    spawn_fetch(&liveness, request, move |result| {
        match result {
            Ok(rows) => {
                trips.set(rows);
                page_index.set(0);
            }
            Err(e) => notify_api_error(toasts, "trips: fetch", &e),
        }
        loading.set(false);
    });

    let page = Signal::derive(move || Page::new(trips.with(Vec::len), page_index.get(), PAGE_SIZE));
    let on_page = Callback::new(move |index: usize| page_index.set(index));

    view! {
        <section class="page trips-page">
            <header class="page__header">
                <h1>"Trips"</h1>
            </header>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading trips..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Trip"</th>
                            <th>"Bike"</th>
                            <th>"Rider"</th>
                            <th>"From"</th>
                            <th>"To"</th>
                            <th>"Started"</th>
                            <th>"Ended"</th>
                            <th class="data-table__num">"Distance"</th>
                            <th class="data-table__num">"Cost"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let current = page.get();
                            trips.with(|rows| {
                                current
                                    .slice(rows)
                                    .iter()
                                    .map(|trip| {
                                        view! {
                                            <tr>
                                                <td>{trip.id.clone()}</td>
                                                <td>{trip.bike_id.clone()}</td>
                                                <td>{or_dash(Some(trip.user_name.as_str())).to_owned()}</td>
                                                <td>{or_dash(trip.start_station_id.as_deref()).to_owned()}</td>
                                                <td>{or_dash(trip.end_station_id.as_deref()).to_owned()}</td>
                                                <td>{timestamp(&trip.started_at)}</td>
                                                <td>{optional_timestamp(trip.ended_at.as_deref())}</td>
                                                <td class="data-table__num">{distance_km(trip.distance_km)}</td>
                                                <td class="data-table__num">{money(trip.cost)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </tbody>
                </table>
                <Paginator page=page on_change=on_page />
            </Show>
        </section>
    }
}
