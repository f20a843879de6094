//! Regional chart style from a place name and latitude.

use serde::{Deserialize, Serialize};

/// Chart layout tradition used to draw a kundali.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartStyle {
    North,
    South,
    East,
}

impl ChartStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "North Indian",
            Self::South => "South Indian",
            Self::East => "East Indian",
        }
    }
}

/// Latitude below which an unrecognised place is treated as South India.
pub const SOUTH_LATITUDE_THRESHOLD: f64 = 16.0;

// Full state names only: a bare "Bengal" would also match "Bengaluru".
const EAST_STATES: &[&str] = &[
    "west bengal",
    "odisha",
    "orissa",
    "bihar",
    "jharkhand",
    "assam",
    "sikkim",
    "tripura",
    "manipur",
    "meghalaya",
    "mizoram",
    "nagaland",
    "arunachal pradesh",
];

const SOUTH_STATES: &[&str] = &[
    "tamil nadu",
    "kerala",
    "karnataka",
    "andhra pradesh",
    "telangana",
    "puducherry",
    "pondicherry",
    "lakshadweep",
    "andaman",
];

/// East name match, then South name match, then the latitude fallback.
pub fn classify_region(latitude: f64, place_name: &str) -> ChartStyle {
    let place = place_name.to_lowercase();
    if EAST_STATES.iter().any(|s| place.contains(s)) {
        ChartStyle::East
    } else if SOUTH_STATES.iter().any(|s| place.contains(s)) {
        ChartStyle::South
    } else if latitude < SOUTH_LATITUDE_THRESHOLD {
        ChartStyle::South
    } else {
        ChartStyle::North
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_decides_when_no_state_is_named() {
        assert_eq!(classify_region(12.9, "Bengaluru, India"), ChartStyle::South);
        assert_eq!(classify_region(15.99, "Somewhere"), ChartStyle::South);
        assert_eq!(classify_region(16.0, "Somewhere"), ChartStyle::North);
        assert_eq!(classify_region(28.6, "New Delhi, India"), ChartStyle::North);
    }

    #[test]
    fn east_name_overrides_latitude() {
        assert_eq!(classify_region(25.0, "Patna, Bihar, India"), ChartStyle::East);
        assert_eq!(classify_region(10.0, "Kolkata, West Bengal"), ChartStyle::East);
    }

    #[test]
    fn south_name_overrides_latitude() {
        assert_eq!(
            classify_region(17.4, "Hyderabad, Telangana, India"),
            ChartStyle::South
        );
        assert_eq!(classify_region(30.0, "KERALA"), ChartStyle::South);
    }

    #[test]
    fn east_is_checked_before_south() {
        assert_eq!(
            classify_region(12.0, "Odisha border, Andhra Pradesh"),
            ChartStyle::East
        );
    }
}
