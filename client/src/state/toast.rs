//! Transient notifications shown in the corner of every page.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

use crate::net::http::ApiError;

/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE: usize = 4;
/// Auto-dismiss delay.
pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Info => "toast--info",
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, message: message.into() });
        if self.items.len() > MAX_VISIBLE {
            let excess = self.items.len() - MAX_VISIBLE;
            self.items.drain(..excess);
        }
        id
    }

    /// Remove toast `id`; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Show a toast and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let mut id = 0;
    toasts.update(|state| id = state.push(kind, message));
    #[cfg(feature = "hydrate")]
    gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
        toasts.try_update(|state| state.dismiss(id));
    })
    .forget();
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

/// Show the user-facing message for an API failure.
pub fn notify_api_error(toasts: RwSignal<ToastState>, context: &str, err: &ApiError) {
    log::warn!("{context}: {err}");
    notify(toasts, ToastKind::Error, err.user_message());
}

/// Fetch the toast queue provided by the root component.
#[must_use]
pub fn use_toasts() -> RwSignal<ToastState> {
    expect_context::<RwSignal<ToastState>>()
}
