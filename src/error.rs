use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{backend::BackendError, birth::ValidationError, places::services::GeocodeError};

/// Every toast auto-dismisses after this delay.
pub const DISMISS_AFTER_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
    Success,
}

/// Transient user-facing message, the single shape for all feedback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub dismiss_after_ms: u64,
    /// Tells the form to reveal the manual latitude/longitude fields.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_manual_coordinates: bool,
}

impl Notification {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            dismiss_after_ms: DISMISS_AFTER_MS,
            show_manual_coordinates: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn with_manual_coordinates(mut self) -> Self {
        self.show_manual_coordinates = true;
        self
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error("Generate a Kundali before exporting or viewing results")]
    NoResult,
    #[error("A calculation is already in progress")]
    Busy,
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Backend(_) | Self::Geocode(_) => StatusCode::BAD_GATEWAY,
            Self::NoResult => StatusCode::NOT_FOUND,
            Self::Busy => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn notification(&self) -> Notification {
        let message = self.to_string();
        match self {
            Self::Geocode(_) => Notification::error(message).with_manual_coordinates(),
            Self::NoResult | Self::Busy => Notification::info(message),
            _ => Notification::error(message),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Backend(e) => error!(error = ?e, "calculation failed"),
            Self::Geocode(e) => warn!(error = ?e, "geocoding failed"),
            Self::Validation(e) => warn!(error = %e, "invalid birth data"),
            other => info!(%status, message = %other, "request rejected"),
        }
        (status, Json(self.notification())).into_response()
    }
}
