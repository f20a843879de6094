use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    dto::{DashaResponse, KundaliResponse},
    services,
};
use crate::{
    birth::BirthForm,
    error::{AppError, Notification},
    export::MARKDOWN_CONTENT_TYPE,
    state::AppState,
};

pub fn kundali_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/kundali",
            get(get_kundali).post(create_kundali).delete(clear_kundali),
        )
        .route("/kundali/export", get(export_kundali))
        .route("/kundali/dasha", get(get_dasha))
}

#[instrument(skip(state, body))]
pub async fn create_kundali(
    State(state): State<AppState>,
    body: Result<Json<BirthForm>, JsonRejection>,
) -> Result<Json<KundaliResponse>, AppError> {
    let Json(form) = body?;
    let response = services::generate(&state, form).await?;
    info!("kundali generated");
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn get_kundali(State(state): State<AppState>) -> Result<Json<KundaliResponse>, AppError> {
    Ok(Json(services::current(&state).await?))
}

#[instrument(skip(state))]
pub async fn clear_kundali(State(state): State<AppState>) -> Json<Notification> {
    Json(services::clear(&state).await)
}

/// Markdown attachment, or a 404 notification when nothing was generated.
#[instrument(skip(state))]
pub async fn export_kundali(State(state): State<AppState>) -> Result<Response, AppError> {
    let (filename, body) = services::export(&state, OffsetDateTime::now_utc()).await?;
    info!(%filename, "report exported");
    Ok((
        [
            (CONTENT_TYPE, MARKDOWN_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

#[instrument(skip(state))]
pub async fn get_dasha(State(state): State<AppState>) -> Result<Json<DashaResponse>, AppError> {
    Ok(Json(services::dasha(&state).await?))
}
