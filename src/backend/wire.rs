//! Response shapes of the PyJHora calculation service.
//!
//! Every section a backend may omit or get wrong is decoded through
//! [`lenient`], so a malformed sub-object turns into `None` (and a log line)
//! instead of failing the whole payload.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::warn;

pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match serde_json::from_value::<T>(v) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!(error = %e, expected = std::any::type_name::<T>(), "discarding malformed field");
                None
            }
        },
    })
}

/// `{"status": "success", "data": {...}}`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
}

/// Payload of `POST /api/complete`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteData {
    #[serde(default, deserialize_with = "lenient")]
    pub charts: Option<ChartsWire>,
    #[serde(default, deserialize_with = "lenient")]
    pub ashtakavarga: Option<AshtakavargaWire>,
    #[serde(default, deserialize_with = "lenient")]
    pub shadbala: Option<BTreeMap<String, ShadbalaWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub bhava_bala: Option<BTreeMap<String, BhavaBalaWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dignity: Option<BTreeMap<String, DignityWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub chara_karakas: Option<BTreeMap<String, PointWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub special_lagnas: Option<BTreeMap<String, PointWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub sphutas: Option<BTreeMap<String, PointWire>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartsWire {
    #[serde(default, deserialize_with = "lenient")]
    pub rasi: Option<Vec<ChartRowWire>>,
    #[serde(default, rename = "bhavaChalit", deserialize_with = "lenient")]
    pub bhava_chalit: Option<Vec<HouseRowWire>>,
    #[serde(default, rename = "d3_drekkana", deserialize_with = "lenient")]
    pub d3: Option<Vec<ChartRowWire>>,
    #[serde(default, rename = "d9_navamsa", deserialize_with = "lenient")]
    pub d9: Option<Vec<ChartRowWire>>,
    #[serde(default, rename = "d12_dwadashamsha", deserialize_with = "lenient")]
    pub d12: Option<Vec<ChartRowWire>>,
    #[serde(default, rename = "d45_akshavedamsha", deserialize_with = "lenient")]
    pub d45: Option<Vec<ChartRowWire>>,
    #[serde(default, rename = "d60_shashtiamsha", deserialize_with = "lenient")]
    pub d60: Option<Vec<ChartRowWire>>,
}

/// One planet row. The combined endpoint sends `planet`, `signIndex` and a
/// within-sign `degree`; the narrow `/api/kundali` endpoint sends `name`,
/// integer `degree`/`minute`/`second` and `totalDegree`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRowWire {
    #[serde(default, alias = "name", deserialize_with = "lenient")]
    pub planet: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sign: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sign_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub minute: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub second: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub nakshatra: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pada: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub house: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_retrograde: Option<bool>,
}

/// A bhava chalit row, or a plain house row from `/api/kundali`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRowWire {
    #[serde(default, deserialize_with = "lenient")]
    pub house: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub mid_degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_degree: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub sign: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub lord: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub planets: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AshtakavargaWire {
    #[serde(default, deserialize_with = "lenient")]
    pub bhinnashtakavarga: Option<BTreeMap<String, PointsWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub sarvashtakavarga: Option<PointsWire>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsWire {
    #[serde(default, deserialize_with = "lenient")]
    pub points: Option<Vec<u32>>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShadbalaWire {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BhavaBalaWire {
    #[serde(default, deserialize_with = "lenient")]
    pub strength: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratio: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DignityWire {
    #[serde(default, deserialize_with = "lenient")]
    pub dignity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_combust: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub sun_distance: Option<f64>,
}

/// Chara karaka, special lagna or sphuta placement.
#[derive(Debug, Default, Deserialize)]
pub struct PointWire {
    #[serde(default, deserialize_with = "lenient")]
    pub house: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub abbreviation: Option<String>,
}

/// Payload of `POST /api/kundali`.
#[derive(Debug, Default, Deserialize)]
pub struct KundaliData {
    #[serde(default, deserialize_with = "lenient")]
    pub planets: Option<Vec<ChartRowWire>>,
    #[serde(default, deserialize_with = "lenient")]
    pub houses: Option<Vec<HouseRowWire>>,
}

/// `POST /api/ashtakavarga` keeps its table beside `status`, not under `data`.
#[derive(Debug, Deserialize)]
pub struct AshtakavargaEnvelope {
    #[serde(default)]
    pub ashtakavarga: AshtakavargaWire,
}

/// `POST /api/dasha`
#[derive(Debug, Deserialize)]
pub struct DashaEnvelope {
    #[serde(default)]
    pub dasha: BTreeMap<String, serde_json::Value>,
}

/// Error body of a non-2xx response. FastAPI sends a string for handler
/// errors and a list of `{msg, ...}` objects for request validation errors.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|i| i.get("msg"))
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

/// What one backend round-trip produced.
#[derive(Debug)]
pub enum Payload {
    Complete(CompleteData),
    Narrow {
        chart: KundaliData,
        ashtakavarga: Option<AshtakavargaWire>,
    },
}
