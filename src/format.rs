use std::fmt;

use serde::Serialize;

/// Shown for any display field the backend did not supply.
pub const PLACEHOLDER: &str = "-";
/// Shown in place of a whole section that failed to decode or was absent.
pub const NO_DATA: &str = "No data";

/// Slack, in arc-seconds, for binary error just under a whole second.
const ARCSEC_EPSILON: f64 = 1e-6;

/// Degree value split into degrees, arc-minutes and arc-seconds.
///
/// Floors to whole arc-seconds, so the result never rounds up:
/// `10.999999` stays `10° 59′ 59″`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dms {
    pub degrees: i64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    pub fn from_degrees(value: f64) -> Self {
        let total = (value * 3600.0 + ARCSEC_EPSILON).floor() as i64;
        let within = total.rem_euclid(3600);
        Self {
            degrees: total.div_euclid(3600),
            minutes: (within / 60) as u8,
            seconds: (within % 60) as u8,
        }
    }

}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}′ {}″", self.degrees, self.minutes, self.seconds)
    }
}

pub fn dms_or_placeholder(value: Option<f64>) -> String {
    value
        .map(|v| Dms::from_degrees(v).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn decimal_or_placeholder(value: Option<f64>, places: usize) -> String {
    value
        .map(|v| format!("{:.*}", places, v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn text_or_placeholder<S: AsRef<str>>(value: Option<S>) -> String {
    match value {
        Some(s) if !s.as_ref().trim().is_empty() => s.as_ref().to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `5.5` -> `+05:30`, `-3.0` -> `-03:00`.
pub fn utc_offset(hours: f64) -> String {
    let sign = if hours < 0.0 { '-' } else { '+' };
    let total_minutes = (hours.abs() * 60.0).round() as i64;
    format!("{}{:02}:{:02}", sign, total_minutes / 60, total_minutes % 60)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
