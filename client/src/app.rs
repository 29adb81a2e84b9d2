//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected::Protected;
use crate::components::sidebar::Sidebar;
use crate::components::toast_host::ToastHost;
use crate::net::http::ApiClient;
use crate::pages::{
    dashboard::DashboardPage, fleet::FleetPage, login::LoginPage, profile::ProfilePage, receipts::ReceiptsPage,
    trips::TripsPage, unauthorized::UnauthorizedPage,
};
use crate::state::auth::AuthContext;
use crate::state::toast::ToastState;
use crate::util::nav::allowed_roles;
use crate::util::storage::{KeyValueStore, LocalStorage, MemoryStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Browser `localStorage` when hydrated; a throwaway map while rendering on
/// the server, where no session can exist.
fn session_store() -> Arc<dyn KeyValueStore> {
    if cfg!(feature = "hydrate") { Arc::new(LocalStorage) } else { Arc::new(MemoryStore::new()) }
}

/// Sidebar + page body for authenticated routes.
#[component]
fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-shell">
            <Sidebar/>
            <main class="app-shell__main">{children()}</main>
        </div>
    }
}

/// Root application component.
///
/// Provides the auth context and toast queue and sets up client-side routing.
/// Each guarded route reads its allow-list from the same table the sidebar
/// uses.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(AuthContext::new(session_store(), ApiClient::default()));
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/fleet-console.css"/>
        <Title text="Fleet Console"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <Protected roles=allowed_roles("/")><Shell><DashboardPage/></Shell></Protected> }
                />
                <Route
                    path=StaticSegment("map")
                    view=|| view! { <Protected roles=allowed_roles("/map")><Shell><FleetPage/></Shell></Protected> }
                />
                <Route
                    path=StaticSegment("trips")
                    view=|| view! { <Protected roles=allowed_roles("/trips")><Shell><TripsPage/></Shell></Protected> }
                />
                <Route
                    path=StaticSegment("receipts")
                    view=|| view! { <Protected roles=allowed_roles("/receipts")><Shell><ReceiptsPage/></Shell></Protected> }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| view! { <Protected roles=allowed_roles("/profile")><Shell><ProfilePage/></Shell></Protected> }
                />
            </Routes>
        </Router>
        <ToastHost/>
    }
}
