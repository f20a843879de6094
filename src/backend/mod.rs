pub mod http;
pub mod wire;

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::birth::BirthRecord;
use wire::{AshtakavargaWire, CompleteData, KundaliData, Payload};

/// Shown when a non-2xx response carries no usable `detail`.
pub const GENERIC_FAILURE: &str = "Calculation failed";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Could not reach the calculation service")]
    Transport(#[source] reqwest::Error),
    #[error("The calculation service returned an unreadable response")]
    Decode(#[source] reqwest::Error),
    #[error("No calculation service is configured")]
    NotConfigured,
}

/// One PyJHora deployment (the local service or the remote fallback).
#[async_trait]
pub trait CalculationBackend: Send + Sync {
    fn label(&self) -> &str;
    /// `POST /api/complete`
    async fn complete(&self, record: &BirthRecord) -> Result<CompleteData, BackendError>;
    /// `POST /api/kundali`
    async fn birth_chart(&self, record: &BirthRecord) -> Result<KundaliData, BackendError>;
    /// `POST /api/ashtakavarga`
    async fn ashtakavarga(&self, record: &BirthRecord) -> Result<AshtakavargaWire, BackendError>;
    /// `POST /api/dasha`
    async fn dasha(
        &self,
        record: &BirthRecord,
    ) -> Result<BTreeMap<String, serde_json::Value>, BackendError>;
}

/// Keeps the most useful error seen across attempts: the first backend
/// `detail` wins over later transport failures.
#[derive(Default)]
struct Failures {
    rejection: Option<BackendError>,
    last: Option<BackendError>,
}

impl Failures {
    fn record(&mut self, err: BackendError) {
        if matches!(err, BackendError::Rejected { .. }) && self.rejection.is_none() {
            self.rejection = Some(err);
        } else {
            self.last = Some(err);
        }
    }

    fn into_error(self) -> BackendError {
        self.rejection
            .or(self.last)
            .unwrap_or(BackendError::NotConfigured)
    }
}

/// Tries each backend in order: the combined endpoint first, then the
/// narrow birth-chart endpoint (with ashtakavarga as a best-effort extra).
pub async fn fetch_payload(
    backends: &[Arc<dyn CalculationBackend>],
    record: &BirthRecord,
) -> Result<Payload, BackendError> {
    let mut failures = Failures::default();
    for backend in backends {
        match backend.complete(record).await {
            Ok(data) => {
                info!(backend = backend.label(), "combined payload received");
                return Ok(Payload::Complete(data));
            }
            Err(e) => {
                warn!(backend = backend.label(), error = %e, "combined endpoint failed");
                failures.record(e);
            }
        }

        match backend.birth_chart(record).await {
            Ok(chart) => {
                let ashtakavarga = match backend.ashtakavarga(record).await {
                    Ok(a) => Some(a),
                    Err(e) => {
                        warn!(backend = backend.label(), error = %e, "ashtakavarga endpoint failed");
                        None
                    }
                };
                info!(backend = backend.label(), "narrow payload received");
                return Ok(Payload::Narrow {
                    chart,
                    ashtakavarga,
                });
            }
            Err(e) => {
                warn!(backend = backend.label(), error = %e, "birth chart endpoint failed");
                failures.record(e);
            }
        }
    }
    Err(failures.into_error())
}

/// Dasha periods from the first backend that answers.
pub async fn fetch_dasha(
    backends: &[Arc<dyn CalculationBackend>],
    record: &BirthRecord,
) -> Result<BTreeMap<String, serde_json::Value>, BackendError> {
    let mut failures = Failures::default();
    for backend in backends {
        match backend.dasha(record).await {
            Ok(dasha) => return Ok(dasha),
            Err(e) => {
                warn!(backend = backend.label(), error = %e, "dasha endpoint failed");
                failures.record(e);
            }
        }
    }
    Err(failures.into_error())
}
