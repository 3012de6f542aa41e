//! HTTP trigger for the latency harness.
//!
//! One route, `/`. Container and platform deployments answer GET with the
//! default count and read `n` from POST bodies; function deployments accept
//! any method and always read the body.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde::Serialize;
use tracing::Instrument;

use crate::error::{HarnessError, RequestError};
use crate::harness::LatencyHarness;
use crate::report::{render, LatencyLog};
use crate::request::count_from_body;
use crate::variant::Variant;

#[derive(Clone)]
pub struct AppState {
    pub variant: Variant,
    pub default_count: u32,
    pub harness: Arc<LatencyHarness>,
    pub log: Arc<dyn LatencyLog>,
}

pub fn build_router(state: AppState) -> Router {
    let route = if state.variant.hosting.accepts_get_default() {
        get(publish_default).post(publish_from_body)
    } else {
        any(publish_from_body)
    };
    Router::new().route("/", route).with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        tracing::warn!(error = %err, "rejected request");
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                code: "invalid_parameter",
                message: err.to_string(),
            },
        }
    }
}

impl From<HarnessError> for ApiError {
    fn from(err: HarnessError) -> Self {
        tracing::error!(error = %err, "publish run failed");
        ApiError {
            status: StatusCode::BAD_GATEWAY,
            body: ErrorBody {
                code: "publish_failed",
                message: err.to_string(),
            },
        }
    }
}

async fn publish_default(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    let count = state.default_count;
    publish(&state, count).await
}

async fn publish_from_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let count = count_from_body(&body, state.default_count)?;
    publish(&state, count).await
}

async fn publish(state: &AppState, count: u32) -> Result<&'static str, ApiError> {
    let span = tracing::info_span!("publish_run", variant = %state.variant, count);
    let series = state.harness.run(count).instrument(span).await?;
    state.log.log_text(&render(&series));
    Ok(state.variant.acknowledgement())
}

/// Serves `router` until Ctrl-C or SIGTERM.
pub async fn serve(router: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
