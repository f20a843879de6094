use serde::{Deserialize, Serialize};

/// The nine grahas plus the Ascendant, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Ascendant,
}

/// Row order for every planet table and the exported report.
pub const CANONICAL_ORDER: [Planet; 10] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
    Planet::Ascendant,
];

/// Planets that carry ashtakavarga, shadbala and dignity rows.
pub const CLASSICAL: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
];

impl Planet {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
            Self::Ascendant => "Ascendant",
        }
    }

    /// Two-letter label used inside chart cells.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sun => "Su",
            Self::Moon => "Mo",
            Self::Mars => "Ma",
            Self::Mercury => "Me",
            Self::Jupiter => "Ju",
            Self::Venus => "Ve",
            Self::Saturn => "Sa",
            Self::Rahu => "Ra",
            Self::Ketu => "Ke",
            Self::Ascendant => "As",
        }
    }

    /// Resolves a backend label such as `"Raagu☊"`, `"Sun℞"` or `"L"`.
    ///
    /// Glyphs, retrograde marks and whitespace are ignored; PyJHora's
    /// transliterations and the usual lagna spellings are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();
        let planet = match key.as_str() {
            "sun" | "surya" | "su" => Self::Sun,
            "moon" | "chandra" | "mo" => Self::Moon,
            "mars" | "mangal" | "ma" => Self::Mars,
            "mercury" | "budha" | "buddh" | "me" => Self::Mercury,
            "jupiter" | "guru" | "ju" => Self::Jupiter,
            "venus" | "shukra" | "ve" => Self::Venus,
            "saturn" | "shani" | "sa" => Self::Saturn,
            "rahu" | "raagu" | "ra" => Self::Rahu,
            "ketu" | "kethu" | "ke" => Self::Ketu,
            "ascendant" | "lagna" | "asc" | "as" | "l" => Self::Ascendant,
            _ => return None,
        };
        Some(planet)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Zero-based index, wrapping any integer into the zodiac.
    pub fn from_index(index: i64) -> Self {
        SIGNS[index.rem_euclid(12) as usize]
    }

    /// Sign containing an absolute sidereal longitude.
    pub fn from_longitude(degrees: f64) -> Self {
        Self::from_index((degrees / 30.0).floor() as i64)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based sign number, 1 = Aries.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Short column header for ashtakavarga tables.
    pub fn short(self) -> &'static str {
        &self.name()[..3]
    }

    pub const fn lord(self) -> Planet {
        match self {
            Self::Aries | Self::Scorpio => Planet::Mars,
            Self::Taurus | Self::Libra => Planet::Venus,
            Self::Gemini | Self::Virgo => Planet::Mercury,
            Self::Cancer => Planet::Moon,
            Self::Leo => Planet::Sun,
            Self::Sagittarius | Self::Pisces => Planet::Jupiter,
            Self::Capricorn | Self::Aquarius => Planet::Saturn,
        }
    }

    /// Accepts `"Libra"`, `"♎︎Libra"` or `"libra 5° 0'"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_ascii_lowercase();
        SIGNS
            .iter()
            .copied()
            .find(|s| lower.contains(&s.name().to_ascii_lowercase()))
    }
}

pub const NAKSHATRAS: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Nakshatra name and pada (1-4) of an absolute longitude.
pub fn nakshatra_pada(longitude: f64) -> (&'static str, u8) {
    let lon = longitude.rem_euclid(360.0);
    let index = (lon / NAKSHATRA_SPAN).floor() as usize % 27;
    let within = lon % NAKSHATRA_SPAN;
    let pada = ((within / (NAKSHATRA_SPAN / 4.0)).floor() as u8).min(3) + 1;
    (NAKSHATRAS[index], pada)
}

/// Sidereal correction modes understood by the calculation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ayanamsa {
    #[default]
    #[serde(alias = "lahiri", alias = "Lahiri")]
    Lahiri,
    #[serde(alias = "raman", alias = "Raman")]
    Raman,
    #[serde(alias = "kp")]
    Kp,
    #[serde(alias = "fagan", alias = "Fagan")]
    Fagan,
    #[serde(alias = "yukteshwar", alias = "Yukteshwar")]
    Yukteshwar,
    #[serde(alias = "true_citra")]
    TrueCitra,
    #[serde(alias = "true_revati")]
    TrueRevati,
    #[serde(alias = "true_pushya")]
    TruePushya,
    #[serde(alias = "suryasiddhanta")]
    Suryasiddhanta,
}

impl Ayanamsa {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Lahiri => "LAHIRI",
            Self::Raman => "RAMAN",
            Self::Kp => "KP",
            Self::Fagan => "FAGAN",
            Self::Yukteshwar => "YUKTESHWAR",
            Self::TrueCitra => "TRUE_CITRA",
            Self::TrueRevati => "TRUE_REVATI",
            Self::TruePushya => "TRUE_PUSHYA",
            Self::Suryasiddhanta => "SURYASIDDHANTA",
        }
    }
}
