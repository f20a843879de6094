use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{PlaceCandidate, SearchQuery, SearchResponse};
use crate::{
    error::{AppError, Notification},
    session::SearchOutcome,
    state::AppState,
};

pub fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(search_places))
        .route("/places/select", post(select_place))
}

#[instrument(skip(state))]
pub async fn search_places(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.q.trim().to_string();
    let outcome = state
        .session
        .search_places(state.geocoder.as_ref(), &query)
        .await?;
    let response = match outcome {
        SearchOutcome::Fresh(candidates) => SearchResponse {
            query,
            superseded: false,
            candidates,
        },
        SearchOutcome::Superseded => SearchResponse {
            query,
            superseded: true,
            candidates: Vec::new(),
        },
    };
    Ok(Json(response))
}

#[instrument(skip(state, body))]
pub async fn select_place(
    State(state): State<AppState>,
    body: Result<Json<PlaceCandidate>, JsonRejection>,
) -> Result<Json<Notification>, AppError> {
    let Json(candidate) = body?;
    if !(-90.0..=90.0).contains(&candidate.latitude)
        || !(-180.0..=180.0).contains(&candidate.longitude)
    {
        return Err(AppError::BadRequest(
            "Selected place has invalid coordinates".into(),
        ));
    }
    info!(place = %candidate.display_name, "place selected");
    let message = format!("Selected {}", candidate.display_name);
    state.session.select_place(candidate).await;
    Ok(Json(Notification::success(message)))
}
