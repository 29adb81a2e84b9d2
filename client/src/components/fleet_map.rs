//! Bridge component between fleet state and the imperative `map::MapView`.
//!
//! ARCHITECTURE
//! ============
//! The map crate owns projection, reconciliation, and drawing. This host feeds
//! it the station and bike lists, forwards pointer and wheel input, turns
//! marker clicks into selection changes, and schedules frames.
//!
//! Station markers are rebuilt whenever the station list or station selection
//! changes; bike markers are reconciled whenever the bike list or bike
//! selection changes. Focus runs as its own reaction keyed on `focus_seq`.

use leptos::prelude::*;

use crate::state::fleet::FleetState;

#[cfg(feature = "hydrate")]
use crate::net::types::Location;
#[cfg(feature = "hydrate")]
use map::camera::{LatLng, Point};
#[cfg(feature = "hydrate")]
use map::engine::{Action, MapCore, MapView};
#[cfg(feature = "hydrate")]
use map::layers::MarkerInput;
#[cfg(feature = "hydrate")]
use map::marker::MarkerKind;
#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::rc::{Rc, Weak};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Opening view before any station has loaded.
#[cfg(feature = "hydrate")]
const DEFAULT_CENTER: LatLng = LatLng { lat: 40.7128, lng: -74.0060 };
#[cfg(feature = "hydrate")]
const DEFAULT_ZOOM: f64 = 13.0;

#[cfg(feature = "hydrate")]
type ViewSlot = Rc<RefCell<Option<MapView>>>;

#[cfg(feature = "hydrate")]
fn to_lat_lng(location: Option<Location>) -> Option<LatLng> {
    location.map(|l| LatLng::new(l.lat, l.lng))
}

#[cfg(feature = "hydrate")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(feature = "hydrate")]
fn render(view: &mut MapView) {
    if let Err(e) = view.render() {
        log::warn!("map: render failed: {e:?}");
    }
}

/// Schedule one animation frame. The frame advances any running fly-to and
/// re-schedules itself until the flight finishes.
#[cfg(feature = "hydrate")]
fn request_frame(slot: &ViewSlot, pending: &Rc<Cell<bool>>) {
    if pending.get() {
        return;
    }
    let Some(window) = web_sys::window() else {
        if let Some(view) = slot.borrow_mut().as_mut() {
            render(view);
        }
        return;
    };
    pending.set(true);

    let slot_for_cb = Rc::clone(slot);
    let pending_for_cb = Rc::clone(pending);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        pending_for_cb.set(false);
        let animating = match slot_for_cb.borrow_mut().as_mut() {
            Some(view) => {
                let animating = view.core.tick(now_ms());
                render(view);
                animating
            }
            None => false,
        };
        if animating {
            request_frame(&slot_for_cb, &pending_for_cb);
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        pending.set(false);
        if let Some(view) = slot.borrow_mut().as_mut() {
            render(view);
        }
    }
}

/// JS callback for tile image loads. Holds the view weakly so the tile cache
/// does not keep its own owner alive.
#[cfg(feature = "hydrate")]
fn tile_load_callback(slot: &ViewSlot, pending: &Rc<Cell<bool>>) -> js_sys::Function {
    let weak: Weak<RefCell<Option<MapView>>> = Rc::downgrade(slot);
    let pending = Rc::clone(pending);
    let cb = Closure::<dyn FnMut()>::new(move || {
        if let Some(slot) = weak.upgrade() {
            request_frame(&slot, &pending);
        }
    });
    cb.into_js_value().unchecked_into()
}

#[cfg(feature = "hydrate")]
fn sync_viewport(view: &mut MapView, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = canvas_ref.get_untracked() else {
        return;
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    view.set_viewport(width, height, window.device_pixel_ratio().max(1.0));
}

#[cfg(feature = "hydrate")]
fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
fn apply_action(action: Action, fleet: RwSignal<FleetState>) -> bool {
    match action {
        Action::None => false,
        Action::RenderNeeded => true,
        Action::MarkerClicked(hit) => {
            match hit.kind {
                MarkerKind::Station => fleet.update(|f| f.select_station(&hit.id)),
                MarkerKind::Bike => fleet.update(|f| f.select_bike(&hit.id)),
            }
            true
        }
    }
}

/// Canvas map of stations and bikes.
#[component]
pub fn FleetMap(fleet: RwSignal<FleetState>) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    let slot: ViewSlot = Rc::new(RefCell::new(None));
    #[cfg(feature = "hydrate")]
    let frame_pending = Rc::new(Cell::new(false));
    #[cfg(feature = "hydrate")]
    let mounted = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let centered = Rc::new(Cell::new(false));

    #[cfg(feature = "hydrate")]
    let stations = Memo::new(move |_| fleet.with(|f| f.stations.clone()));
    #[cfg(feature = "hydrate")]
    let selected_station = Memo::new(move |_| fleet.with(|f| f.selected_station.clone()));
    #[cfg(feature = "hydrate")]
    let bikes = Memo::new(move |_| fleet.with(|f| f.bikes.clone()));
    #[cfg(feature = "hydrate")]
    let selected_bike = Memo::new(move |_| fleet.with(|f| f.selected_bike.clone()));
    #[cfg(feature = "hydrate")]
    let focus_seq = Memo::new(move |_| fleet.with(|f| f.focus_seq));

    // Mount: create the view once the canvas exists.
    #[cfg(feature = "hydrate")]
    {
        let slot = Rc::clone(&slot);
        let frame_pending = Rc::clone(&frame_pending);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if slot.borrow().is_some() {
                return;
            }
            let on_tile_load = tile_load_callback(&slot, &frame_pending);
            let mut view = MapView::new(canvas, MapCore::new(DEFAULT_CENTER, DEFAULT_ZOOM), Some(on_tile_load));
            sync_viewport(&mut view, &canvas_ref);
            *slot.borrow_mut() = Some(view);
            mounted.set(true);
            request_frame(&slot, &frame_pending);
        });
    }

    // Stations: full rebuild.
    #[cfg(feature = "hydrate")]
    {
        let slot = Rc::clone(&slot);
        let frame_pending = Rc::clone(&frame_pending);
        let centered = Rc::clone(&centered);
        Effect::new(move || {
            if !mounted.get() {
                return;
            }
            let inputs: Vec<MarkerInput> = stations.with(|list| {
                list.iter()
                    .map(|s| MarkerInput::new(s.id.clone(), to_lat_lng(s.location)))
                    .collect()
            });
            let selected = selected_station.get();
            let opening_center = if centered.get() {
                None
            } else {
                fleet.with_untracked(FleetState::station_centroid)
            };
            if let Some(view) = slot.borrow_mut().as_mut() {
                let report = view.core.set_stations(&inputs, selected.as_deref());
                if report.skipped > 0 {
                    log::warn!("map: {} station(s) without a location were not drawn", report.skipped);
                }
                if let Some(center) = opening_center {
                    view.core.camera.center = LatLng::new(center.lat, center.lng);
                    centered.set(true);
                }
            }
            request_frame(&slot, &frame_pending);
        });
    }

    // Bikes: incremental reconcile.
    #[cfg(feature = "hydrate")]
    {
        let slot = Rc::clone(&slot);
        let frame_pending = Rc::clone(&frame_pending);
        Effect::new(move || {
            if !mounted.get() {
                return;
            }
            let inputs: Vec<MarkerInput> = bikes.with(|list| {
                list.iter()
                    .map(|b| MarkerInput::new(b.id.clone(), to_lat_lng(b.location)))
                    .collect()
            });
            let selected = selected_bike.get();
            if let Some(view) = slot.borrow_mut().as_mut() {
                let report = view.core.set_bikes(&inputs, selected.as_deref());
                if report.skipped > 0 {
                    log::warn!("map: {} bike(s) without a location were not drawn", report.skipped);
                }
                log::debug!(
                    "map: bikes created={} moved={} unchanged={} removed={}",
                    report.created,
                    report.moved,
                    report.unchanged,
                    report.removed
                );
            }
            request_frame(&slot, &frame_pending);
        });
    }

    // Focus: fly to the selection when it is outside the padded viewport.
    #[cfg(feature = "hydrate")]
    {
        let slot = Rc::clone(&slot);
        let frame_pending = Rc::clone(&frame_pending);
        Effect::new(move || {
            if !mounted.get() {
                return;
            }
            if focus_seq.get() == 0 {
                return;
            }
            let target = fleet.with_untracked(|f| to_lat_lng(f.focus_location()));
            let started = slot
                .borrow_mut()
                .as_mut()
                .is_some_and(|view| view.core.focus_on(target, now_ms()));
            if started {
                request_frame(&slot, &frame_pending);
            }
        });
    }

    #[cfg(feature = "hydrate")]
    {
        let slot = Rc::clone(&slot);
        let frame_pending = Rc::clone(&frame_pending);
        let handle = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(view) = slot.borrow_mut().as_mut() {
                sync_viewport(view, &canvas_ref);
            }
            request_frame(&slot, &frame_pending);
        });
        on_cleanup(move || handle.remove());
    }

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            let slot = Rc::clone(&slot);
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if let Err(e) = canvas.set_pointer_capture(ev.pointer_id()) {
                        log::debug!("map: pointer capture failed: {e:?}");
                    }
                }
                if let Some(view) = slot.borrow_mut().as_mut() {
                    view.core.on_pointer_down(pointer_point(&ev));
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            let slot = Rc::clone(&slot);
            let frame_pending = Rc::clone(&frame_pending);
            move |ev: leptos::ev::PointerEvent| {
                let action = match slot.borrow_mut().as_mut() {
                    Some(view) => view.core.on_pointer_move(pointer_point(&ev)),
                    None => Action::None,
                };
                if apply_action(action, fleet) {
                    request_frame(&slot, &frame_pending);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            let slot = Rc::clone(&slot);
            let frame_pending = Rc::clone(&frame_pending);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if let Err(e) = canvas.release_pointer_capture(ev.pointer_id()) {
                        log::debug!("map: pointer release failed: {e:?}");
                    }
                }
                // Release the borrow before selection effects run.
                let action = match slot.borrow_mut().as_mut() {
                    Some(view) => view.core.on_pointer_up(pointer_point(&ev)),
                    None => Action::None,
                };
                if apply_action(action, fleet) {
                    request_frame(&slot, &frame_pending);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = {
        #[cfg(feature = "hydrate")]
        {
            let slot = Rc::clone(&slot);
            move |_ev: leptos::ev::PointerEvent| {
                if let Some(view) = slot.borrow_mut().as_mut() {
                    view.core.on_pointer_cancel();
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "hydrate")]
        {
            let slot = Rc::clone(&slot);
            let frame_pending = Rc::clone(&frame_pending);
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                let point = Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()));
                let action = match slot.borrow_mut().as_mut() {
                    Some(view) => view.core.on_wheel(point, ev.delta_y()),
                    None => Action::None,
                };
                if apply_action(action, fleet) {
                    request_frame(&slot, &frame_pending);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = fleet;
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    view! {
        <div class="fleet-map">
            <canvas
                class="fleet-map__canvas"
                node_ref=canvas_ref
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointerleave=on_pointer_leave
                on:wheel=on_wheel
            ></canvas>
            <span class="fleet-map__attribution">"© OpenStreetMap contributors"</span>
        </div>
    }
}
