use std::{net::SocketAddr, time::Duration};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::state::AppState;
use crate::{kundali, places};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Calculation backends in the order they are tried.
    pub calculation_backends: Vec<&'static str>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        calculation_backends: state
            .config
            .calculation_urls()
            .into_iter()
            .map(|(label, _)| label)
            .collect(),
    })
}

fn request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "kundali_request",
        method = %req.method(),
        path = %req.uri().path(),
        status = tracing::field::Empty,
    )
}

fn record_response(res: &Response<Body>, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", status.as_u16());
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%status, latency_ms, "request failed");
    } else {
        tracing::info!(%status, latency_ms, "request served");
    }
}

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(places::router())
        .merge(kundali::router())
        .route("/health", get(health));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(record_response),
        )
}

/// Binds `APP_HOST:APP_PORT` (default `0.0.0.0:8080`).
pub async fn serve(app: Router) -> anyhow::Result<()> {
    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = match std::env::var("APP_PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("APP_PORT {raw:?} is not a port: {e}"))?,
        Err(_) => 8080,
    };
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "kundali service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
