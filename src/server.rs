//! HTTP server receiving Telegram updates.
//!
//! The webhook path serves two methods:
//! - `POST` - one Telegram update, dispatched before answering
//!   `200 {"ok": true}`, or `500 {"ok": false}` when the body is not an update
//! - `GET` - status probe with the bot name and the loaded commands

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use log::{debug, error, info};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    commands::{CommandRegistry, DispatchOutcome, Dispatcher},
    telegram::Update,
};

/// Shared state of the webhook handlers.
#[derive(Clone)]
pub struct AppState {
    /// Name reported by the status probe
    pub bot_name: Arc<str>,
    /// Loaded commands
    pub registry: Arc<CommandRegistry>,
    /// Message router
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the router serving the webhook on `path`.
pub fn router(path: &str, state: AppState) -> Router {
    Router::new()
        .route(path, post(update_handler).get(status_handler))
        .with_state(state)
}

/// Serves `app` on `listen` until Ctrl-C or SIGTERM.
pub async fn serve(listen: SocketAddr, app: Router) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(&listen).await?;
    info!("webhook server listening on http://{}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("webhook server stopped");
    Ok(())
}

/// Handler for `POST`: decodes and dispatches one update.
///
/// The body is decoded by hand so that an invalid update gets the documented
/// 500 instead of axum's extractor rejection.
async fn update_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!("error processing update: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false })));
        }
    };

    match update.message {
        Some(message) => {
            match state.dispatcher.dispatch(&message).await {
                DispatchOutcome::Ignored => debug!("update {}: not a command", update.update_id),
                DispatchOutcome::NotFound(token) => {
                    debug!("update {}: unknown command {:?}", update.update_id, token)
                }
                DispatchOutcome::Denied(name) => {
                    debug!("update {}: {} denied", update.update_id, name)
                }
                DispatchOutcome::Executed(name) => {
                    debug!("update {}: {} executed", update.update_id, name)
                }
                DispatchOutcome::Failed(name) => {
                    debug!("update {}: {} failed", update.update_id, name)
                }
            }
        }
        None => debug!("update {} has no message, ignoring", update.update_id),
    }

    (StatusCode::OK, Json(json!({ "ok": true })))
}

/// Handler for `GET`: liveness and introspection probe.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let commands = state.registry.command_names();

    (
        StatusCode::OK,
        Json(json!({
            "bot": &*state.bot_name,
            "status": "running",
            "totalCommands": commands.len(),
            "commands": commands,
        })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
