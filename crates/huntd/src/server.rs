//! HTTP routes and outcome mapping
//!
//! Maps resolver outcomes to pages. No resolution logic lives here; every
//! handler is a thin shim over `hunt_core::ChallengeResolver`.
//!
//! ## Routes
//!
//! - `GET /` — landing page
//! - `GET /next/{id}` — team-selection form for the challenge just completed
//! - `POST /next/{id}` — resolve and render redirect / finished / error

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use hunt_core::{ChallengeResolver, Error, Resolution};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::pages;

/// Shared application state for all request handlers
#[derive(Clone)]
struct AppState {
    resolver: Arc<ChallengeResolver>,
}

/// Bind and serve the hunt routes until a shutdown signal arrives
pub async fn serve(resolver: ChallengeResolver, listen_addr: &str) -> anyhow::Result<()> {
    let state = AppState {
        resolver: Arc::new(resolver),
    };

    let app = Router::new()
        .route("/", get(home))
        .route("/next/{id}", get(challenge_form).post(next_challenge))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("huntd listening on http://{}", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Landing page
async fn home() -> Html<String> {
    Html(pages::home())
}

/// Team-selection form for the challenge just completed
///
/// The dropdown is fed from the team collection on every render; there is
/// no caching between requests.
async fn challenge_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.resolver.list_team_names().await {
        Ok(teams) => Html(pages::team_form(&id, &teams)).into_response(),
        Err(e) => {
            error!("Failed to load team list: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page("Failed to load the team list")),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
struct NextForm {
    team: String,
}

/// Resolve the next challenge for the submitted team
async fn next_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NextForm>,
) -> Response {
    if form.team.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Html(pages::error_page("Team name is required")),
        )
            .into_response();
    }

    info!("Resolving team '{}' after challenge id '{}'", form.team, id);

    match state.resolver.resolve_next(&form.team, &id).await {
        Ok(Resolution::Redirect { url, .. }) => Html(pages::redirect(&form.team, &url)).into_response(),
        Ok(Resolution::Finished) => Html(pages::finished(&form.team)).into_response(),
        Err(Error::TeamNotFound(name)) => {
            warn!("Team not found: {}", name);
            (
                StatusCode::NOT_FOUND,
                Html(pages::error_page("Team not found")),
            )
                .into_response()
        }
        Err(e) => {
            error!("Resolution failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::error_page("Failed to resolve the next challenge")),
            )
                .into_response()
        }
    }
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to setup SIGTERM handler: {}", e);
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to setup SIGINT handler: {}", e);
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT"),
    }
}

/// Wait for CTRL-C (fallback for non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for CTRL-C: {}", e);
    }
}
