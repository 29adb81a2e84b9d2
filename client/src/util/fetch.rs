//! Fetch lifetime helpers for page-scoped requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page takes a [`Liveness`] token with [`use_liveness`]; the token is
//! cancelled in the page's cleanup, and completions that land afterwards are
//! dropped instead of writing into disposed signals.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

/// Shared "is the owning view still mounted" flag.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// At-most-one-outstanding flag for repeating requests, so a slow response
/// can never land after a newer one.
#[derive(Clone, Debug, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Claim the slot. Returns `false` if a request is already outstanding.
    #[must_use]
    pub fn try_begin(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn finish(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A token cancelled when the current reactive owner is cleaned up.
pub fn use_liveness() -> Liveness {
    let liveness = Liveness::new();
    let on_drop = liveness.clone();
    on_cleanup(move || on_drop.cancel());
    liveness
}

/// Await `request` and hand its output to `apply` only if still alive.
/// Returns whether `apply` ran.
pub async fn complete<T, Fut, F>(liveness: Liveness, request: Fut, apply: F) -> bool
where
    Fut: Future<Output = T>,
    F: FnOnce(T),
{
    let value = request.await;
    if !liveness.is_alive() {
        log::debug!("fetch: view gone, dropping result");
        return false;
    }
    apply(value);
    true
}

/// Run [`complete`] on the browser task queue.
pub fn spawn_fetch<T, Fut, F>(liveness: &Liveness, request: Fut, apply: F)
where
    T: 'static,
    Fut: Future<Output = T> + 'static,
    F: FnOnce(T) + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            complete(liveness, request, apply).await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (liveness, request, apply);
    }
}

/// Call `tick` every `period_ms` until the liveness token is cancelled.
pub fn spawn_poll<F>(liveness: &Liveness, period_ms: u64, tick: F)
where
    F: Fn() + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(period_ms)).await;
                if !liveness.is_alive() {
                    break;
                }
                tick();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (liveness, period_ms, tick);
    }
}
