//! Markdown report download.

use lazy_static::lazy_static;
use regex::Regex;
use time::{macros::format_description, Date, OffsetDateTime, UtcOffset};

use crate::{tables::report_tables, view::ViewModel};

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

lazy_static! {
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// `"Asha  Rao!"` -> `"asha-rao"`; an empty result becomes `"report"`.
pub fn slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "report".to_string()
    } else {
        slug.to_string()
    }
}

fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Calendar date at `now` in the given UTC offset; UTC if the offset is
/// out of range.
pub fn local_date(now: OffsetDateTime, offset_hours: f64) -> Date {
    match UtcOffset::from_whole_seconds((offset_hours * 3600.0).round() as i32) {
        Ok(offset) => now.to_offset(offset).date(),
        Err(_) => now.date(),
    }
}

pub fn export_filename(name: &str, today: Date) -> String {
    format!("kundali-{}-{}.md", slug(name), iso_date(today))
}

pub fn render_markdown(model: &ViewModel, today: Date) -> String {
    let mut out = format!(
        "# Kundali Report: {}\n\n_Generated on {} · {} chart style_\n",
        model.person.record.name,
        iso_date(today),
        model.chart_style.label()
    );
    for table in report_tables(model) {
        out.push_str(&format!("\n## {}\n\n", table.title));
        out.push_str(&table.to_markdown());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_model;
    use time::macros::{date, datetime};

    #[test]
    fn filename_uses_slug_and_date() {
        assert_eq!(
            export_filename("Asha  Rao!", date!(2024 - 03 - 09)),
            "kundali-asha-rao-2024-03-09.md"
        );
        assert_eq!(
            export_filename("   ", date!(2024 - 12 - 31)),
            "kundali-report-2024-12-31.md"
        );
    }

    #[test]
    fn sections_appear_in_report_order() {
        let md = render_markdown(&sample_model(), date!(2024 - 03 - 09));
        assert!(md.starts_with("# Kundali Report: Asha Rao\n"));
        let order = [
            "## Birth Details",
            "## Primary Rashis",
            "## D1 Rasi Chart",
            "## D9 Navamsa Chart",
            "## Bhava Chalit",
            "## Ashtakavarga",
            "## Shadbala",
            "## D3 Drekkana Chart",
            "## D12 Dwadashamsha Chart",
            "## Dignity & Combustion",
            "## Bhava Bala",
            "## Chara Karakas",
            "## Special Lagnas",
            "## Sphutas",
        ];
        let positions: Vec<usize> = order.iter().map(|h| md.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!md.contains("D45"));
        assert!(md.contains("**Total SAV: 337**"));
        assert!(md.contains("| Lagna Rashi | Leo |"));
    }

    #[test]
    fn missing_section_renders_no_data() {
        let mut model = sample_model();
        model.sphutas = None;
        let md = render_markdown(&model, date!(2024 - 03 - 09));
        assert!(md.ends_with("## Sphutas\n\n_No data_\n"));
    }

    #[test]
    fn local_date_follows_the_offset() {
        let now = datetime!(2024-03-08 20:00 UTC);
        assert_eq!(local_date(now, 5.5), date!(2024 - 03 - 09));
        assert_eq!(local_date(now, 0.0), date!(2024 - 03 - 08));
        assert_eq!(local_date(now, -5.0), date!(2024 - 03 - 08));
        assert_eq!(local_date(now, 99.0), date!(2024 - 03 - 08));
    }
}
