//! Fixtures and fake clients shared by the unit tests.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;

use crate::{
    adapter::adapt,
    backend::{
        wire::{AshtakavargaWire, CompleteData, Envelope, KundaliData, Payload},
        BackendError, CalculationBackend,
    },
    birth::{BirthForm, BirthRecord, ChartStyleChoice, LooseNumber, NormalizedBirth},
    places::{
        dto::PlaceCandidate,
        services::{GeocodeError, PlaceSearch},
    },
    region::ChartStyle,
    vedic::Ayanamsa,
    view::ViewModel,
};

const COMPLETE_JSON: &str = include_str!("testdata/complete.json");

pub fn sample_record() -> BirthRecord {
    BirthRecord {
        name: "Asha Rao".into(),
        year: 1990,
        month: 4,
        day: 15,
        hour: 6,
        minute: 30,
        second: 0,
        latitude: 13.08,
        longitude: 80.27,
        timezone_offset_hours: 5.5,
        ayanamsa: Ayanamsa::Lahiri,
    }
}

pub fn sample_birth() -> NormalizedBirth {
    NormalizedBirth {
        record: sample_record(),
        place: "Chennai, Tamil Nadu, India".into(),
        chart_style: ChartStyle::South,
    }
}

pub fn sample_form() -> BirthForm {
    BirthForm {
        name: "Asha Rao".into(),
        date: "1990-04-15".into(),
        time: "06:30".into(),
        timezone: Some(LooseNumber::Text("+05:30".into())),
        ayanamsa: Ayanamsa::Lahiri,
        place: Some("Chennai, Tamil Nadu, India".into()),
        latitude: Some(LooseNumber::Number(13.08)),
        longitude: Some(LooseNumber::Number(80.27)),
        chart_style: ChartStyleChoice::Auto,
    }
}

pub fn complete_data() -> CompleteData {
    let env: Envelope<CompleteData> =
        serde_json::from_str(COMPLETE_JSON).expect("complete fixture decodes");
    env.data
}

pub fn sample_model() -> ViewModel {
    adapt(Payload::Complete(complete_data()), &sample_birth())
}

/// `/api/kundali` rows: glyph-decorated labels, integer degree parts and
/// no nakshatra.
pub fn narrow_chart() -> KundaliData {
    let planet = |name: &str, sign: &str, deg: u32, min: u32, retro: bool| {
        json!({
            "name": name,
            "sign": sign,
            "degree": deg,
            "minute": min,
            "second": 0,
            "totalDegree": deg as f64 + min as f64 / 60.0,
            "isRetrograde": retro,
        })
    };
    let value = json!({
        "planets": [
            planet("Ascendantℒ", "Leo", 12, 30, false),
            planet("Sun☉", "Aries", 0, 45, false),
            planet("Moon☾", "Taurus", 23, 30, false),
            planet("Mars♂", "Capricorn", 10, 15, false),
            planet("Mercury☿", "Pisces", 27, 6, true),
            planet("Jupiter♃", "Cancer", 5, 0, false),
            planet("Venus♀", "Aries", 8, 24, false),
            planet("Saturn♄", "Aquarius", 14, 12, true),
            planet("Raagu☊", "Gemini", 19, 54, true),
            planet("Kethu☋", "Sagittarius", 19, 54, true),
        ],
        "houses": [
            {"house": 1, "planets": ["Lagnaℒ"]},
            {"house": 2, "planets": []},
            {"house": 3, "planets": []},
            {"house": 4, "planets": []},
            {"house": 5, "planets": ["Kethu☋"]},
            {"house": 6, "planets": ["Mars♂"]},
            {"house": 7, "planets": ["Saturn♄"]},
            {"house": 8, "planets": ["Mercury☿"]},
            {"house": 9, "planets": ["Sun☉", "Venus♀"]},
            {"house": 10, "planets": ["Moon☾"]},
            {"house": 11, "planets": ["Raagu☊"]},
            {"house": 12, "planets": ["Jupiter♃"]},
        ],
    });
    serde_json::from_value(value).expect("narrow fixture decodes")
}

/// The fixture's ashtakavarga with the extra Ascendant row `/api/ashtakavarga`
/// sends.
pub fn narrow_ashtakavarga() -> AshtakavargaWire {
    let mut value: serde_json::Value =
        serde_json::from_str(COMPLETE_JSON).expect("complete fixture parses");
    let mut table = value["data"]["ashtakavarga"].take();
    table["bhinnashtakavarga"]["Ascendant"] =
        json!({"points": [4, 3, 5, 4, 2, 6, 3, 5, 4, 4, 3, 6], "total": 49});
    serde_json::from_value(table).expect("ashtakavarga fixture decodes")
}

pub fn narrow_payload() -> Payload {
    Payload::Narrow {
        chart: narrow_chart(),
        ashtakavarga: Some(narrow_ashtakavarga()),
    }
}

fn transport_error() -> BackendError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("invalid url");
    BackendError::Transport(err)
}

enum Behaviour {
    Complete,
    NarrowOnly,
    Unreachable,
    Rejecting(String),
}

/// In-memory calculation backend.
pub struct FakeCalculation {
    behaviour: Behaviour,
}

impl FakeCalculation {
    pub fn complete() -> Self {
        Self {
            behaviour: Behaviour::Complete,
        }
    }

    /// `/api/complete` is missing (older deployments).
    pub fn narrow_only() -> Self {
        Self {
            behaviour: Behaviour::NarrowOnly,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            behaviour: Behaviour::Unreachable,
        }
    }

    pub fn rejecting(detail: &str) -> Self {
        Self {
            behaviour: Behaviour::Rejecting(detail.to_string()),
        }
    }

    fn fail(&self) -> Option<BackendError> {
        match &self.behaviour {
            Behaviour::Complete | Behaviour::NarrowOnly => None,
            Behaviour::Unreachable => Some(transport_error()),
            Behaviour::Rejecting(detail) => Some(BackendError::Rejected {
                status: 500,
                detail: detail.clone(),
            }),
        }
    }
}

#[async_trait]
impl CalculationBackend for FakeCalculation {
    fn label(&self) -> &str {
        "fake"
    }

    async fn complete(&self, _record: &BirthRecord) -> Result<CompleteData, BackendError> {
        if let Behaviour::NarrowOnly = self.behaviour {
            return Err(BackendError::Rejected {
                status: 404,
                detail: "Not Found".into(),
            });
        }
        match self.fail() {
            Some(e) => Err(e),
            None => Ok(complete_data()),
        }
    }

    async fn birth_chart(&self, _record: &BirthRecord) -> Result<KundaliData, BackendError> {
        match self.fail() {
            Some(e) => Err(e),
            None => Ok(narrow_chart()),
        }
    }

    async fn ashtakavarga(&self, _record: &BirthRecord) -> Result<AshtakavargaWire, BackendError> {
        match self.fail() {
            Some(e) => Err(e),
            None => Ok(narrow_ashtakavarga()),
        }
    }

    async fn dasha(
        &self,
        _record: &BirthRecord,
    ) -> Result<BTreeMap<String, serde_json::Value>, BackendError> {
        if let Some(e) = self.fail() {
            return Err(e);
        }
        Ok(BTreeMap::from([
            (
                "Vimsottari Dhasa".to_string(),
                json!("Jupiter (1988-02-11 to 2004-02-11)"),
            ),
            ("dhasa_level".to_string(), json!(3)),
        ]))
    }
}

/// In-memory geocoder counting its calls.
pub struct FakeGeocoder {
    results: Result<Vec<PlaceCandidate>, u16>,
    latency: Duration,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn chennai() -> PlaceCandidate {
        PlaceCandidate {
            display_name: "Chennai, Tamil Nadu, India".into(),
            latitude: 13.0827,
            longitude: 80.2707,
        }
    }

    pub fn with_results(results: Vec<PlaceCandidate>) -> Self {
        Self {
            results: Ok(results),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every search answers HTTP 503.
    pub fn failing() -> Self {
        Self {
            results: Err(503),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceSearch for FakeGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<PlaceCandidate>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.results.clone().map_err(GeocodeError::Status)
    }
}
