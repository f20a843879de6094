//! Raw form input to a dispatchable `BirthRecord`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{macros::format_description, Date, Time};
use tracing::debug;

use crate::{
    places::dto::PlaceCandidate,
    region::{classify_region, ChartStyle},
    vedic::Ayanamsa,
};

/// Indian Standard Time, used whenever the timezone field cannot be read.
pub const DEFAULT_TIMEZONE_HOURS: f64 = 5.5;

/// Request body for every calculation backend endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub name: String,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "timezone")]
    pub timezone_offset_hours: f64,
    pub ayanamsa: Ayanamsa,
}

impl BirthRecord {
    pub fn date_label(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A form value that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|v| v.is_finite())
    }
}

/// Style selector on the form; `Auto` defers to the region classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ChartStyleChoice {
    #[default]
    #[serde(alias = "auto")]
    Auto,
    #[serde(alias = "north")]
    North,
    #[serde(alias = "south")]
    South,
    #[serde(alias = "east")]
    East,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthForm {
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Clock time, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    #[serde(default)]
    pub timezone: Option<LooseNumber>,
    #[serde(default)]
    pub ayanamsa: Ayanamsa,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub latitude: Option<LooseNumber>,
    #[serde(default)]
    pub longitude: Option<LooseNumber>,
    #[serde(default)]
    pub chart_style: ChartStyleChoice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBirth {
    pub record: BirthRecord,
    pub place: String,
    pub chart_style: ChartStyle,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a name")]
    MissingName,
    #[error("Invalid birth date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid birth time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Please select a place or enter latitude and longitude")]
    MissingCoordinates,
}

lazy_static! {
    static ref OFFSET_RE: Regex = Regex::new(r"^([+-])?(\d{1,2}):(\d{2})$").unwrap();
}

/// Numeric values pass through; `[+-]HH:MM` becomes signed hours; anything
/// else silently falls back to IST.
pub fn parse_timezone(input: Option<&LooseNumber>) -> f64 {
    let parsed = match input {
        Some(LooseNumber::Number(n)) if n.is_finite() => Some(*n),
        Some(LooseNumber::Text(s)) => parse_offset_text(s.trim()),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        debug!(?input, "unreadable timezone, using IST");
        DEFAULT_TIMEZONE_HOURS
    })
}

fn parse_offset_text(s: &str) -> Option<f64> {
    if let Ok(n) = s.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    let caps = OFFSET_RE.captures(s)?;
    let hours: f64 = caps[2].parse().ok()?;
    let minutes: f64 = caps[3].parse().ok()?;
    if minutes >= 60.0 {
        return None;
    }
    let sign = if caps.get(1).map(|m| m.as_str()) == Some("-") {
        -1.0
    } else {
        1.0
    };
    Some(sign * (hours + minutes / 60.0))
}

fn parse_date(s: &str) -> Result<Date, ValidationError> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

fn parse_time(s: &str) -> Result<Time, ValidationError> {
    let s = s.trim();
    Time::parse(s, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(s, format_description!("[hour]:[minute]")))
        .map_err(|_| ValidationError::InvalidTime(s.to_string()))
}

fn explicit_coordinates(form: &BirthForm) -> Option<(f64, f64)> {
    let lat = form.latitude.as_ref()?.value()?;
    let lon = form.longitude.as_ref()?.value()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then_some((lat, lon))
}

/// Builds the record the calculation backend expects.
///
/// Explicit coordinates on the form win over `selected`, the last place the
/// user picked from the geocoder.
pub fn normalize(
    form: &BirthForm,
    selected: Option<&PlaceCandidate>,
) -> Result<NormalizedBirth, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let date = parse_date(&form.date)?;
    let time = parse_time(&form.time)?;

    let (latitude, longitude) = explicit_coordinates(form)
        .or_else(|| selected.map(|p| (p.latitude, p.longitude)))
        .ok_or(ValidationError::MissingCoordinates)?;

    let place = form
        .place
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| selected.map(|p| p.display_name.clone()))
        .unwrap_or_default();

    let chart_style = match form.chart_style {
        ChartStyleChoice::Auto => classify_region(latitude, &place),
        ChartStyleChoice::North => ChartStyle::North,
        ChartStyleChoice::South => ChartStyle::South,
        ChartStyleChoice::East => ChartStyle::East,
    };

    let record = BirthRecord {
        name: name.to_string(),
        year: date.year(),
        month: u8::from(date.month()),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
        latitude,
        longitude,
        timezone_offset_hours: parse_timezone(form.timezone.as_ref()),
        ayanamsa: form.ayanamsa,
    };

    Ok(NormalizedBirth {
        record,
        place,
        chart_style,
    })
}
