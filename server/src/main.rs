mod config;
mod error;
mod routes;
mod state;

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, ".env present but unreadable"),
    }

    let config = config::ServerConfig::from_env()?;
    let state = state::AppState::new(&config)?;
    tracing::info!(upstream = %state.upstream, "fleet API proxy configured");

    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, "fleet console listening");
    axum::serve(listener, app).await?;
    Ok(())
}
