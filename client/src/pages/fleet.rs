//! Fleet map page: station and bike lists beside the live map.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stations are fetched once on mount; bikes are fetched on mount and then
//! every [`BIKE_POLL_MS`] until the page unmounts, skipping a tick while the
//! previous bike fetch is still outstanding. Selecting an entry in
//! either list, or clicking its marker, focuses the map on it.

use leptos::prelude::*;

use crate::components::fleet_map::FleetMap;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::state::auth::use_auth;
use crate::state::fleet::FleetState;
use crate::state::toast::{ToastState, notify_api_error, use_toasts};
use crate::util::fetch::{InFlight, Liveness, spawn_fetch, spawn_poll, use_liveness};
use crate::util::format::{EMPTY_CELL, battery};

pub const BIKE_POLL_MS: u64 = 15_000;

fn load_bikes(
    liveness: &Liveness,
    in_flight: &InFlight,
    http: ApiClient,
    fleet: RwSignal<FleetState>,
    toasts: RwSignal<ToastState>,
) {
    if !in_flight.try_begin() {
        log::debug!("fleet: previous bike fetch still pending, skipping tick");
        return;
    }
    let slot = in_flight.clone();
    let request = async move {
        let result = api::fetch_bikes(&http).await;
        slot.finish();
        result
    };
    spawn_fetch(liveness, request, move |result| match result {
        Ok(bikes) => fleet.update(|f| f.apply_bikes(bikes)),
        Err(e) => notify_api_error(toasts, "fleet: bikes", &e),
    });
}

fn load_stations(liveness: &Liveness, http: ApiClient, fleet: RwSignal<FleetState>, toasts: RwSignal<ToastState>) {
    let request = async move { api::fetch_stations(&http).await };
    spawn_fetch(liveness, request, move |result| match result {
        Ok(stations) => fleet.update(|f| f.apply_stations(stations)),
        Err(e) => notify_api_error(toasts, "fleet: stations", &e),
    });
}

#[component]
pub fn FleetPage() -> impl IntoView {
    let http = use_auth().http().clone();
    let toasts = use_toasts();
    let liveness = use_liveness();
    let fleet = RwSignal::new(FleetState::default());

    load_stations(&liveness, http.clone(), fleet, toasts);
    let bikes_in_flight = InFlight::default();
    load_bikes(&liveness, &bikes_in_flight, http.clone(), fleet, toasts);
    {
        let poll_liveness = liveness.clone();
        spawn_poll(&liveness, BIKE_POLL_MS, move || {
            load_bikes(&poll_liveness, &bikes_in_flight, http.clone(), fleet, toasts);
        });
    }

    let unlocated = move || fleet.with(FleetState::unlocated_bike_count);

    view! {
        <section class="page fleet-page">
            <aside class="fleet-page__lists">
                <h2>"Stations"</h2>
                <Show when=move || fleet.with(|f| f.stations_loaded) fallback=|| view! { <p class="page__status">"Loading stations..."</p> }>
                    <ul class="entity-list">
                        <For each=move || fleet.get().stations key=|s| s.id.clone() let:station>
                            {
                                let id = station.id.clone();
                                let id_for_class = id.clone();
                                view! {
                                    <li
                                        class="entity-list__item"
                                        class:entity-list__item--selected=move || {
                                            fleet.with(|f| f.selected_station.as_deref() == Some(id_for_class.as_str()))
                                        }
                                        on:click=move |_| fleet.update(|f| f.select_station(&id))
                                    >
                                        <span class="entity-list__name">{station.name.clone()}</span>
                                        <span class="entity-list__meta">
                                            {format!("{}/{} bikes", station.available_bikes, station.capacity)}
                                        </span>
                                    </li>
                                }
                            }
                        </For>
                    </ul>
                </Show>

                <h2>"Bikes"</h2>
                <Show when=move || { unlocated() > 0 }>
                    <p class="fleet-page__note">{move || format!("{} bike(s) have no reported location", unlocated())}</p>
                </Show>
                <Show when=move || fleet.with(|f| f.bikes_loaded) fallback=|| view! { <p class="page__status">"Loading bikes..."</p> }>
                    <ul class="entity-list">
                        <For each=move || fleet.get().bikes key=|b| b.id.clone() let:bike>
                            {
                                let id = bike.id.clone();
                                let id_for_class = id.clone();
                                view! {
                                    <li
                                        class="entity-list__item"
                                        class:entity-list__item--selected=move || {
                                            fleet.with(|f| f.selected_bike.as_deref() == Some(id_for_class.as_str()))
                                        }
                                        class:entity-list__item--unlocated=bike.location.is_none()
                                        on:click=move |_| fleet.update(|f| f.select_bike(&id))
                                    >
                                        <span class="entity-list__name">{bike.display_name().to_owned()}</span>
                                        <span class="entity-list__meta">
                                            {format!("{} · {}", bike.status.label(), battery(bike.battery_pct))}
                                        </span>
                                    </li>
                                }
                            }
                        </For>
                    </ul>
                </Show>
            </aside>

            <div class="fleet-page__map">
                <FleetMap fleet=fleet />
                <SelectionPanel fleet=fleet />
            </div>
        </section>
    }
}

/// Details for the current selection, overlaid on the map.
#[component]
fn SelectionPanel(fleet: RwSignal<FleetState>) -> impl IntoView {
    let details = move || {
        fleet.with(|f| {
            if let Some(bike) = f.selected_bike() {
                let station = bike.station_id.as_deref().unwrap_or(EMPTY_CELL).to_owned();
                return Some((
                    bike.display_name().to_owned(),
                    vec![
                        ("Status", bike.status.label().to_owned()),
                        ("Battery", battery(bike.battery_pct)),
                        ("Station", station),
                    ],
                ));
            }
            f.selected_station().map(|station| {
                let docked = f.bikes_at(&station.id).len();
                (
                    station.name.clone(),
                    vec![
                        ("Address", station.address.clone()),
                        ("Capacity", station.capacity.to_string()),
                        ("Available", station.available_bikes.to_string()),
                        ("Docked now", docked.to_string()),
                    ],
                )
            })
        })
    };

    view! {
        {move || {
            details()
                .map(|(title, rows)| {
                    view! {
                        <div class="selection-panel">
                            <header class="selection-panel__header">
                                <span>{title}</span>
                                <button
                                    class="selection-panel__close"
                                    aria-label="Clear selection"
                                    on:click=move |_| fleet.update(FleetState::clear_selection)
                                >
                                    "✕"
                                </button>
                            </header>
                            <dl>
                                {rows
                                    .into_iter()
                                    .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                    .collect_view()}
                            </dl>
                        </div>
                    }
                })
        }}
    }
}
