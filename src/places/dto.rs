use serde::{Deserialize, Serialize};

/// One geocoder hit. Also the body of `POST /places/select`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// A newer query replaced this one; `candidates` is empty and the
    /// visible list should be left alone.
    pub superseded: bool,
    pub candidates: Vec<PlaceCandidate>,
}
