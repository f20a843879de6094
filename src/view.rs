//! The display model shared by the table renderers, the chart renderer and
//! the Markdown exporter.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    birth::BirthRecord,
    region::ChartStyle,
    vedic::{Planet, Sign},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Varga {
    D1,
    D3,
    D9,
    D12,
    D45,
    D60,
}

impl Varga {
    pub const fn title(self) -> &'static str {
        match self {
            Self::D1 => "D1 Rasi Chart",
            Self::D3 => "D3 Drekkana Chart",
            Self::D9 => "D9 Navamsa Chart",
            Self::D12 => "D12 Dwadashamsha Chart",
            Self::D45 => "D45 Akshavedamsha Chart",
            Self::D60 => "D60 Shashtiamsha Chart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: Planet,
    pub sign: Option<Sign>,
    /// Sidereal longitude, 0-360.
    pub absolute_degree: Option<f64>,
    /// Degree within the sign as the backend reported it.
    pub sign_degree: Option<f64>,
    pub nakshatra: Option<String>,
    pub pada: Option<u8>,
    pub house: Option<u8>,
    pub is_retrograde: bool,
}

impl PlanetPosition {
    pub fn degree_in_sign(&self) -> Option<f64> {
        self.sign_degree
    }
}

/// Occupants of houses 1..=12, each in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HouseMap([Vec<Planet>; 12]);

impl HouseMap {
    /// Ignores house numbers outside 1..=12.
    pub fn push(&mut self, house: u8, planet: Planet) {
        if (1..=12).contains(&house) {
            self.0[house as usize - 1].push(planet);
        }
    }

    pub fn occupants(&self, house: u8) -> &[Planet] {
        match house {
            1..=12 => &self.0[house as usize - 1],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionalChart {
    pub varga: Varga,
    /// Canonical planet order.
    pub positions: Vec<PlanetPosition>,
    pub houses: HouseMap,
}

impl DivisionalChart {
    pub fn position(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseEntry {
    pub house: u8,
    pub occupants: Vec<Planet>,
    pub start_degree: Option<f64>,
    pub mid_degree: Option<f64>,
    pub end_degree: Option<f64>,
    pub sign: Option<Sign>,
    pub lord: Option<Planet>,
}

impl HouseEntry {
    pub fn placeholder(house: u8) -> Self {
        Self {
            house,
            occupants: Vec::new(),
            start_degree: None,
            mid_degree: None,
            end_degree: None,
            sign: None,
            lord: None,
        }
    }

    pub fn degree_in_sign(&self) -> Option<f64> {
        self.mid_degree.map(|d| d.rem_euclid(30.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointTier {
    Favorable,
    Neutral,
    Weak,
}

impl PointTier {
    /// Bhinnashtakavarga: 4+ favorable, 2 or less weak.
    pub fn bhinna(points: u32) -> Self {
        match points {
            p if p >= 4 => Self::Favorable,
            p if p <= 2 => Self::Weak,
            _ => Self::Neutral,
        }
    }

    /// Sarvashtakavarga: 28+ favorable, 22 or less weak.
    pub fn sarva(points: u32) -> Self {
        match points {
            p if p >= 28 => Self::Favorable,
            p if p <= 22 => Self::Weak,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AshtakaPoint {
    pub value: Option<u32>,
    pub tier: Option<PointTier>,
}

/// Twelve sign points, Aries first, with their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AshtakaRow {
    pub points: Vec<AshtakaPoint>,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BhinnaRow {
    pub planet: Planet,
    #[serde(flatten)]
    pub row: AshtakaRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AshtakavargaTable {
    pub bhinna: Vec<BhinnaRow>,
    pub sarva: Option<AshtakaRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadbalaEntry {
    pub planet: Planet,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    Friend,
    Neutral,
    Enemy,
    Debilitated,
    Other(String),
}

impl Dignity {
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let key: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();
        let dignity = match key.as_str() {
            "" => return None,
            "exalted" | "exaltation" => Self::Exalted,
            "moolatrikona" | "mulatrikona" => Self::Moolatrikona,
            "own" | "ownsign" | "ownhouse" => Self::OwnSign,
            "friend" | "friendly" | "friendsign" => Self::Friend,
            "neutral" => Self::Neutral,
            "enemy" | "enemysign" => Self::Enemy,
            "debilitated" | "debilitation" => Self::Debilitated,
            _ => Self::Other(trimmed.to_string()),
        };
        Some(dignity)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Exalted => "Exalted",
            Self::Moolatrikona => "Moolatrikona",
            Self::OwnSign => "Own Sign",
            Self::Friend => "Friend",
            Self::Neutral => "Neutral",
            Self::Enemy => "Enemy",
            Self::Debilitated => "Debilitated",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Dignity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Dignity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DignityEntry {
    pub planet: Planet,
    pub dignity: Option<Dignity>,
    /// Always `None` for the Sun.
    pub sun_distance: Option<f64>,
    /// Always `false` for the Sun.
    pub is_combust: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthTier {
    Strong,
    Average,
    Weak,
}

impl StrengthTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.1 {
            Self::Strong
        } else if ratio >= 0.9 {
            Self::Average
        } else {
            Self::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Average => "Average",
            Self::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BhavaBalaEntry {
    pub house: u8,
    pub strength: Option<f64>,
    pub ratio: Option<f64>,
    pub tier: Option<StrengthTier>,
}

/// A chara karaka, special lagna or sphuta and the house it falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialPoint {
    pub name: String,
    pub abbreviation: Option<String>,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonInfo {
    #[serde(flatten)]
    pub record: BirthRecord,
    pub place: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimaryRashis {
    pub lagna: Option<Sign>,
    pub chandra: Option<Sign>,
    pub surya: Option<Sign>,
}

/// Everything shown for one successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub person: PersonInfo,
    pub chart_style: ChartStyle,
    pub primary_rashis: PrimaryRashis,
    pub rasi: Option<DivisionalChart>,
    pub navamsa: Option<DivisionalChart>,
    pub drekkana: Option<DivisionalChart>,
    pub dwadashamsha: Option<DivisionalChart>,
    pub akshavedamsha: Option<DivisionalChart>,
    pub shashtiamsha: Option<DivisionalChart>,
    pub bhava_chalit: Option<Vec<HouseEntry>>,
    pub ashtakavarga: Option<AshtakavargaTable>,
    pub shadbala: Option<Vec<ShadbalaEntry>>,
    pub dignity: Option<Vec<DignityEntry>>,
    pub bhava_bala: Option<Vec<BhavaBalaEntry>>,
    pub chara_karakas: Option<Vec<SpecialPoint>>,
    pub special_lagnas: Option<Vec<SpecialPoint>>,
    pub sphutas: Option<Vec<SpecialPoint>>,
}

impl ViewModel {
    /// D3, D12, D45 and D60, skipping the ones the backend did not send.
    pub fn extra_vargas(&self) -> impl Iterator<Item = &DivisionalChart> {
        [
            &self.drekkana,
            &self.dwadashamsha,
            &self.akshavedamsha,
            &self.shashtiamsha,
        ]
        .into_iter()
        .filter_map(Option::as_ref)
    }
}
