//! House occupancy laid out for the regional chart styles.

use std::fmt;

use serde::Serialize;

use crate::{region::ChartStyle, view::HouseMap};

/// House numbers of the South Indian square; the centre 2x2 is empty.
const SOUTH_TEMPLATE: [[Option<u8>; 4]; 4] = [
    [Some(12), Some(1), Some(2), Some(3)],
    [Some(11), None, None, Some(4)],
    [Some(10), None, None, Some(5)],
    [Some(9), Some(8), Some(7), Some(6)],
];

const MIN_CELL_WIDTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartCell {
    pub house: u8,
    /// Space-joined abbreviations, e.g. `"Su Ve"`.
    pub planets: String,
}

impl ChartCell {
    fn new(houses: &HouseMap, house: u8) -> Self {
        let planets = houses
            .occupants(house)
            .iter()
            .map(|p| p.abbreviation())
            .collect::<Vec<_>>()
            .join(" ");
        Self { house, planets }
    }

    fn label(&self) -> String {
        if self.planets.is_empty() {
            self.house.to_string()
        } else {
            format!("{} {}", self.house, self.planets)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum ChartGrid {
    /// 4x4 South Indian square, row-major.
    Square { rows: Vec<Vec<Option<ChartCell>>> },
    /// Houses 1..=12 in order. North and East Indian charts use this.
    List { cells: Vec<ChartCell> },
}

pub fn render_chart(houses: &HouseMap, style: ChartStyle) -> ChartGrid {
    match style {
        ChartStyle::South => ChartGrid::Square {
            rows: SOUTH_TEMPLATE
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|slot| slot.map(|h| ChartCell::new(houses, h)))
                        .collect()
                })
                .collect(),
        },
        ChartStyle::North | ChartStyle::East => ChartGrid::List {
            cells: (1..=12).map(|h| ChartCell::new(houses, h)).collect(),
        },
    }
}

impl fmt::Display for ChartGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square { rows } => {
                let width = rows
                    .iter()
                    .flatten()
                    .flatten()
                    .map(|c| c.label().chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(MIN_CELL_WIDTH);
                let border = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(4));
                writeln!(f, "{border}")?;
                for row in rows {
                    write!(f, "|")?;
                    for cell in row {
                        let label = cell.as_ref().map(ChartCell::label).unwrap_or_default();
                        write!(f, " {label:<width$} |")?;
                    }
                    writeln!(f)?;
                    writeln!(f, "{border}")?;
                }
                Ok(())
            }
            Self::List { cells } => {
                for cell in cells {
                    let planets = if cell.planets.is_empty() {
                        "-"
                    } else {
                        cell.planets.as_str()
                    };
                    writeln!(f, "House {:>2}: {}", cell.house, planets)?;
                }
                Ok(())
            }
        }
    }
}
