use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::dto::PlaceCandidate;
use crate::birth::LooseNumber;

/// Candidates requested per query.
pub const RESULT_LIMIT: &str = "5";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Place search failed. Please enter latitude and longitude manually")]
    Transport(#[source] reqwest::Error),
    #[error("Place search is unavailable (HTTP {0}). Please enter latitude and longitude manually")]
    Status(u16),
    #[error("Place search returned an unreadable response. Please enter latitude and longitude manually")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Ranked candidates, best match first.
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodeError>;
}

/// Nominatim-compatible search endpoint.
#[derive(Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    url: String,
}

impl NominatimClient {
    /// `http` should already carry the User-Agent Nominatim requires.
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    lat: Option<LooseNumber>,
    #[serde(default)]
    lon: Option<LooseNumber>,
}

impl NominatimPlace {
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let latitude = self.lat.as_ref()?.value()?;
        let longitude = self.lon.as_ref()?.value()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(PlaceCandidate {
            display_name: self.display_name.unwrap_or_default(),
            latitude,
            longitude,
        })
    }
}

fn candidates(places: Vec<NominatimPlace>) -> Vec<PlaceCandidate> {
    let total = places.len();
    let kept: Vec<PlaceCandidate> = places
        .into_iter()
        .filter_map(NominatimPlace::into_candidate)
        .collect();
    if kept.len() < total {
        debug!(dropped = total - kept.len(), "dropped places without usable coordinates");
    }
    kept
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodeError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", RESULT_LIMIT),
                ("addressdetails", "1"),
            ])
            .header(ACCEPT_LANGUAGE, "en")
            .send()
            .await
            .map_err(GeocodeError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }
        let places: Vec<NominatimPlace> = res.json().await.map_err(GeocodeError::Decode)?;
        Ok(candidates(places))
    }
}
