use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{
    wire::{AshtakavargaEnvelope, AshtakavargaWire, CompleteData, DashaEnvelope, Envelope, ErrorBody, KundaliData},
    BackendError, CalculationBackend, GENERIC_FAILURE,
};
use crate::birth::BirthRecord;

/// JSON-over-HTTP client for one PyJHora API server.
#[derive(Clone)]
pub struct HttpCalculationClient {
    http: reqwest::Client,
    base_url: String,
    label: String,
}

impl HttpCalculationClient {
    pub fn new(http: reqwest::Client, base_url: &str, label: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            label: label.to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, record), fields(backend = %self.label))]
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        record: &BirthRecord,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path);
        debug!(%url, "calculation request");
        let res = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let detail = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        res.json::<T>().await.map_err(BackendError::Decode)
    }
}

#[async_trait]
impl CalculationBackend for HttpCalculationClient {
    fn label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, record: &BirthRecord) -> Result<CompleteData, BackendError> {
        let env: Envelope<CompleteData> = self.post("/api/complete", record).await?;
        Ok(env.data)
    }

    async fn birth_chart(&self, record: &BirthRecord) -> Result<KundaliData, BackendError> {
        let env: Envelope<KundaliData> = self.post("/api/kundali", record).await?;
        Ok(env.data)
    }

    async fn ashtakavarga(&self, record: &BirthRecord) -> Result<AshtakavargaWire, BackendError> {
        let env: AshtakavargaEnvelope = self.post("/api/ashtakavarga", record).await?;
        Ok(env.ashtakavarga)
    }

    async fn dasha(
        &self,
        record: &BirthRecord,
    ) -> Result<BTreeMap<String, serde_json::Value>, BackendError> {
        let env: DashaEnvelope = self.post("/api/dasha", record).await?;
        Ok(env.dasha)
    }
}
