//! Display tables built from the view model. The same tables back the JSON
//! response and the Markdown report.

use serde::Serialize;

use crate::{
    format::{
        decimal_or_placeholder, dms_or_placeholder, text_or_placeholder, utc_offset, yes_no,
        NO_DATA, PLACEHOLDER,
    },
    vedic::{Sign, SIGNS},
    view::{
        AshtakaRow, AshtakavargaTable, BhavaBalaEntry, DignityEntry, DivisionalChart, HouseEntry,
        PersonInfo, PrimaryRashis, ShadbalaEntry, SpecialPoint, ViewModel,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Free text shown under the table, e.g. the SAV grand total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The section was missing or unreadable in the backend response.
    pub no_data: bool,
}

impl Table {
    fn new(title: impl Into<String>, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            note: None,
            no_data: false,
        }
    }

    pub fn no_data(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: Vec::new(),
            rows: Vec::new(),
            note: None,
            no_data: true,
        }
    }

    pub fn to_markdown(&self) -> String {
        if self.no_data {
            return format!("_{NO_DATA}_\n");
        }
        let mut out = String::new();
        push_row(&mut out, &self.headers);
        out.push('|');
        for _ in &self.headers {
            out.push_str(" --- |");
        }
        out.push('\n');
        for row in &self.rows {
            push_row(&mut out, row);
        }
        if let Some(note) = &self.note {
            out.push('\n');
            out.push_str(note);
            out.push('\n');
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&cell.replace('|', "\\|"));
        out.push_str(" |");
    }
    out.push('\n');
}

fn or_no_data<T>(title: &str, section: Option<&T>, build: impl FnOnce(&T) -> Table) -> Table {
    section.map(build).unwrap_or_else(|| Table::no_data(title))
}

pub fn birth_details_table(person: &PersonInfo) -> Table {
    let r = &person.record;
    let rows = vec![
        vec!["Name".into(), r.name.clone()],
        vec!["Date of Birth".into(), r.date_label()],
        vec!["Time of Birth".into(), r.time_label()],
        vec!["Place".into(), text_or_placeholder(Some(&person.place))],
        vec!["Latitude".into(), format!("{:.4}", r.latitude)],
        vec!["Longitude".into(), format!("{:.4}", r.longitude)],
        vec![
            "Timezone".into(),
            format!("UTC{}", utc_offset(r.timezone_offset_hours)),
        ],
        vec!["Ayanamsa".into(), r.ayanamsa.tag().to_string()],
    ];
    Table::new("Birth Details", &["Field", "Value"], rows)
}

pub fn primary_rashis_table(rashis: &PrimaryRashis) -> Table {
    let sign = |s: Option<Sign>| text_or_placeholder(s.map(|s| s.name()));
    let rows = vec![
        vec!["Lagna Rashi".into(), sign(rashis.lagna)],
        vec!["Chandra Rashi".into(), sign(rashis.chandra)],
        vec!["Surya Rashi".into(), sign(rashis.surya)],
    ];
    Table::new("Primary Rashis", &["Rashi", "Sign"], rows)
}

pub fn planet_table(chart: &DivisionalChart) -> Table {
    let rows = chart
        .positions
        .iter()
        .map(|p| {
            vec![
                p.planet.name().to_string(),
                text_or_placeholder(p.sign.map(|s| s.name())),
                dms_or_placeholder(p.degree_in_sign()),
                text_or_placeholder(p.nakshatra.as_deref()),
                p.pada.map_or_else(|| PLACEHOLDER.to_string(), |p| p.to_string()),
                p.house.map_or_else(|| PLACEHOLDER.to_string(), |h| h.to_string()),
                yes_no(p.is_retrograde).to_string(),
            ]
        })
        .collect();
    Table::new(
        chart.varga.title(),
        &["Planet", "Sign", "Degree", "Nakshatra", "Pada", "House", "Retrograde"],
        rows,
    )
}

pub fn bhava_chalit_table(houses: &[HouseEntry]) -> Table {
    let rows = houses
        .iter()
        .map(|h| {
            let occupants = h
                .occupants
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                h.house.to_string(),
                text_or_placeholder(h.sign.map(|s| s.name())),
                text_or_placeholder(h.lord.map(|l| l.name())),
                dms_or_placeholder(h.degree_in_sign()),
                decimal_or_placeholder(h.start_degree, 2),
                decimal_or_placeholder(h.end_degree, 2),
                text_or_placeholder(Some(occupants)),
            ]
        })
        .collect();
    Table::new(
        "Bhava Chalit",
        &["House", "Sign", "Lord", "Mid Degree", "Start", "End", "Planets"],
        rows,
    )
}

fn ashtaka_cells(label: &str, row: &AshtakaRow) -> Vec<String> {
    let mut cells = Vec::with_capacity(14);
    cells.push(label.to_string());
    cells.extend(
        row.points
            .iter()
            .map(|p| p.value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())),
    );
    cells.push(
        row.total
            .map_or_else(|| PLACEHOLDER.to_string(), |t| t.to_string()),
    );
    cells
}

pub fn ashtakavarga_table(table: &AshtakavargaTable) -> Table {
    let mut headers = vec!["Planet"];
    headers.extend(SIGNS.iter().map(|s| s.short()));
    headers.push("Total");

    let mut rows: Vec<Vec<String>> = table
        .bhinna
        .iter()
        .map(|r| ashtaka_cells(r.planet.name(), &r.row))
        .collect();
    if let Some(sarva) = &table.sarva {
        rows.push(ashtaka_cells("SAV", sarva));
    }

    let mut out = Table::new("Ashtakavarga", &headers, rows);
    out.note = table
        .sarva
        .as_ref()
        .and_then(|s| s.total)
        .map(|t| format!("**Total SAV: {t}**"));
    out
}

pub fn shadbala_table(entries: &[ShadbalaEntry]) -> Table {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.planet.name().to_string(),
                decimal_or_placeholder(e.total, 2),
            ]
        })
        .collect();
    Table::new("Shadbala", &["Planet", "Total (Rupas)"], rows)
}

pub fn dignity_table(entries: &[DignityEntry]) -> Table {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.planet.name().to_string(),
                text_or_placeholder(e.dignity.as_ref().map(|d| d.label())),
                decimal_or_placeholder(e.sun_distance, 2),
                yes_no(e.is_combust).to_string(),
            ]
        })
        .collect();
    Table::new(
        "Dignity & Combustion",
        &["Planet", "Dignity", "Distance from Sun", "Combust"],
        rows,
    )
}

pub fn bhava_bala_table(entries: &[BhavaBalaEntry]) -> Table {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.house.to_string(),
                decimal_or_placeholder(e.strength, 2),
                decimal_or_placeholder(e.ratio, 2),
                text_or_placeholder(e.tier.map(|t| t.label())),
            ]
        })
        .collect();
    Table::new("Bhava Bala", &["House", "Strength", "Ratio", "Status"], rows)
}

pub fn points_table(title: &str, points: &[SpecialPoint]) -> Table {
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                text_or_placeholder(p.abbreviation.as_deref()),
                p.house.map_or_else(|| PLACEHOLDER.to_string(), |h| h.to_string()),
            ]
        })
        .collect();
    Table::new(title, &["Name", "Abbreviation", "House"], rows)
}

/// Every section in report order. Optional vargas appear only when present;
/// other missing sections become "No data" tables.
pub fn report_tables(model: &ViewModel) -> Vec<Table> {
    let mut tables = vec![
        birth_details_table(&model.person),
        primary_rashis_table(&model.primary_rashis),
        or_no_data("D1 Rasi Chart", model.rasi.as_ref(), planet_table),
        or_no_data("D9 Navamsa Chart", model.navamsa.as_ref(), planet_table),
        or_no_data("Bhava Chalit", model.bhava_chalit.as_ref(), |h| {
            bhava_chalit_table(h)
        }),
        or_no_data("Ashtakavarga", model.ashtakavarga.as_ref(), ashtakavarga_table),
        or_no_data("Shadbala", model.shadbala.as_ref(), |s| shadbala_table(s)),
    ];
    tables.extend(model.extra_vargas().map(planet_table));
    tables.extend([
        or_no_data("Dignity & Combustion", model.dignity.as_ref(), |d| {
            dignity_table(d)
        }),
        or_no_data("Bhava Bala", model.bhava_bala.as_ref(), |b| {
            bhava_bala_table(b)
        }),
        or_no_data("Chara Karakas", model.chara_karakas.as_ref(), |p| {
            points_table("Chara Karakas", p)
        }),
        or_no_data("Special Lagnas", model.special_lagnas.as_ref(), |p| {
            points_table("Special Lagnas", p)
        }),
        or_no_data("Sphutas", model.sphutas.as_ref(), |p| {
            points_table("Sphutas", p)
        }),
    ]);
    tables
}
