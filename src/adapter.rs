//! Folds either backend payload shape into one [`ViewModel`].
//!
//! Nothing here fails: unresolvable rows are skipped, missing fields stay
//! `None` and render as placeholders downstream.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    backend::wire::{
        AshtakavargaWire, BhavaBalaWire, ChartRowWire, CompleteData, DignityWire, HouseRowWire,
        KundaliData, Payload, PointWire, PointsWire, ShadbalaWire,
    },
    birth::NormalizedBirth,
    vedic::{nakshatra_pada, Planet, Sign, CLASSICAL},
    view::{
        AshtakaPoint, AshtakaRow, AshtakavargaTable, BhavaBalaEntry, BhinnaRow, Dignity,
        DignityEntry, DivisionalChart, HouseEntry, HouseMap, PersonInfo, PlanetPosition,
        PointTier, PrimaryRashis, ShadbalaEntry, SpecialPoint, StrengthTier, Varga, ViewModel,
    },
};

/// Grand sarvashtakavarga total of every valid chart.
pub const EXPECTED_SAV_TOTAL: u32 = 337;

const KARAKA_ORDER: [&str; 8] = ["AK", "AmK", "BK", "MK", "PiK", "PuK", "GK", "DK"];
const LAGNA_ORDER: [&str; 9] = ["BL", "HL", "GL", "VL", "SL", "PL", "IL", "KL", "BB"];

pub fn adapt(payload: Payload, birth: &NormalizedBirth) -> ViewModel {
    let mut model = ViewModel {
        person: PersonInfo {
            record: birth.record.clone(),
            place: birth.place.clone(),
        },
        chart_style: birth.chart_style,
        primary_rashis: PrimaryRashis::default(),
        rasi: None,
        navamsa: None,
        drekkana: None,
        dwadashamsha: None,
        akshavedamsha: None,
        shashtiamsha: None,
        bhava_chalit: None,
        ashtakavarga: None,
        shadbala: None,
        dignity: None,
        bhava_bala: None,
        chara_karakas: None,
        special_lagnas: None,
        sphutas: None,
    };

    match payload {
        Payload::Complete(data) => fill_complete(&mut model, data),
        Payload::Narrow {
            chart,
            ashtakavarga,
        } => {
            model.rasi = narrow_chart(chart);
            model.ashtakavarga = ashtakavarga.map(ashtakavarga_table);
        }
    }

    if let Some(rasi) = &model.rasi {
        let sign_of = |p| rasi.position(p).and_then(|pos| pos.sign);
        model.primary_rashis = PrimaryRashis {
            lagna: sign_of(Planet::Ascendant),
            chandra: sign_of(Planet::Moon),
            surya: sign_of(Planet::Sun),
        };
    }
    model
}

fn fill_complete(model: &mut ViewModel, data: CompleteData) {
    let charts = data.charts.unwrap_or_default();
    model.rasi = charts.rasi.map(|rows| divisional_chart(Varga::D1, rows));
    model.navamsa = charts.d9.map(|rows| divisional_chart(Varga::D9, rows));
    model.drekkana = charts.d3.map(|rows| divisional_chart(Varga::D3, rows));
    model.dwadashamsha = charts.d12.map(|rows| divisional_chart(Varga::D12, rows));
    model.akshavedamsha = charts.d45.map(|rows| divisional_chart(Varga::D45, rows));
    model.shashtiamsha = charts.d60.map(|rows| divisional_chart(Varga::D60, rows));
    model.bhava_chalit = charts.bhava_chalit.map(bhava_chalit);

    model.ashtakavarga = data.ashtakavarga.map(ashtakavarga_table);
    model.shadbala = data.shadbala.map(shadbala);
    model.dignity = data.dignity.map(dignity);
    model.bhava_bala = data.bhava_bala.map(bhava_bala);
    model.chara_karakas = data
        .chara_karakas
        .map(|m| ranked_points(m, &KARAKA_ORDER));
    model.special_lagnas = data
        .special_lagnas
        .map(|m| ranked_points(m, &LAGNA_ORDER));
    model.sphutas = data.sphutas.map(sphutas);
}

/// Degree of a row. Separate minute/second parts win over `totalDegree`,
/// which the narrow endpoint rounds to four decimals.
fn row_degree(row: &ChartRowWire) -> Option<f64> {
    match (row.degree, row.minute.is_some() || row.second.is_some()) {
        (Some(d), true) => Some(
            d + row.minute.unwrap_or_default() / 60.0 + row.second.unwrap_or_default() / 3600.0,
        ),
        _ => row.total_degree.or(row.degree),
    }
}

fn resolve_position(planet: Planet, row: &ChartRowWire) -> PlanetPosition {
    let named_sign = row
        .sign_index
        .map(Sign::from_index)
        .or_else(|| row.sign.as_deref().and_then(Sign::from_label));

    // A degree of 30 or more can only be an absolute longitude.
    let (sign, absolute_degree, sign_degree) = match (row_degree(row), named_sign) {
        (Some(d), _) if d >= 30.0 => {
            let abs = d.rem_euclid(360.0);
            (Some(Sign::from_longitude(abs)), Some(abs), Some(abs.rem_euclid(30.0)))
        }
        (Some(d), Some(s)) => {
            let d = d.max(0.0);
            (Some(s), Some(s.index() as f64 * 30.0 + d), Some(d))
        }
        (_, s) => (s, None, None),
    };

    let derived = absolute_degree.map(nakshatra_pada);
    PlanetPosition {
        planet,
        sign,
        absolute_degree,
        sign_degree,
        nakshatra: row
            .nakshatra
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| derived.map(|(n, _)| n.to_string())),
        pada: row
            .pada
            .filter(|p| (1..=4).contains(p))
            .or(derived.map(|(_, p)| p)),
        house: row.house.filter(|h| (1..=12).contains(h)),
        is_retrograde: planet != Planet::Ascendant && row.is_retrograde.unwrap_or(false),
    }
}

/// Resolved positions (first row wins on duplicates) and the planets in
/// backend row order.
fn positions_from_rows(rows: &[ChartRowWire]) -> (Vec<PlanetPosition>, Vec<Planet>) {
    let mut positions: Vec<PlanetPosition> = Vec::with_capacity(rows.len());
    let mut backend_order = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(planet) = row.planet.as_deref().and_then(Planet::from_label) else {
            debug!(label = ?row.planet, "skipping unrecognised planet row");
            continue;
        };
        if positions.iter().any(|p| p.planet == planet) {
            debug!(?planet, "skipping duplicate planet row");
            continue;
        }
        positions.push(resolve_position(planet, row));
        backend_order.push(planet);
    }
    (positions, backend_order)
}

/// Whole-sign house counted from the lagna, or the sign number when the
/// lagna is unknown.
fn fallback_house(sign: Sign, lagna: Option<Sign>) -> u8 {
    match lagna {
        Some(l) => ((sign.index() + 12 - l.index()) % 12) as u8 + 1,
        None => sign.number(),
    }
}

fn divisional_chart(varga: Varga, rows: Vec<ChartRowWire>) -> DivisionalChart {
    let (mut positions, backend_order) = positions_from_rows(&rows);
    let lagna = positions
        .iter()
        .find(|p| p.planet == Planet::Ascendant)
        .and_then(|p| p.sign);

    let mut houses = HouseMap::default();
    for planet in backend_order {
        if let Some(pos) = positions.iter_mut().find(|p| p.planet == planet) {
            if pos.house.is_none() {
                pos.house = pos.sign.map(|s| fallback_house(s, lagna));
            }
            if let Some(h) = pos.house {
                houses.push(h, planet);
            }
        }
    }

    positions.sort_by_key(|p| p.planet);
    DivisionalChart {
        varga,
        positions,
        houses,
    }
}

/// `/api/kundali`: house occupancy comes from the labelled house list,
/// positions from the planet rows.
fn narrow_chart(data: KundaliData) -> Option<DivisionalChart> {
    let Some(rows) = data.planets else {
        return data.houses.map(|h| DivisionalChart {
            varga: Varga::D1,
            positions: Vec::new(),
            houses: labelled_houses(&h),
        });
    };
    let mut chart = divisional_chart(Varga::D1, rows);
    if let Some(house_rows) = data.houses {
        let mut houses = labelled_houses(&house_rows);
        for pos in &mut chart.positions {
            match (1..=12u8).find(|h| houses.occupants(*h).contains(&pos.planet)) {
                Some(h) => pos.house = Some(h),
                // Not in any labelled house: keep the fallback in both views.
                None => {
                    if let Some(h) = pos.house {
                        houses.push(h, pos.planet);
                    }
                }
            }
        }
        chart.houses = houses;
    }
    Some(chart)
}

fn labelled_houses(rows: &[HouseRowWire]) -> HouseMap {
    let mut map = HouseMap::default();
    for row in rows {
        let Some(house) = row.house.filter(|h| (1..=12).contains(h)) else {
            continue;
        };
        for planet in row
            .planets
            .iter()
            .flatten()
            .filter_map(|label| Planet::from_label(label))
        {
            map.push(house, planet);
        }
    }
    map
}

fn bhava_chalit(rows: Vec<HouseRowWire>) -> Vec<HouseEntry> {
    let mut entries: Vec<HouseEntry> = (1..=12).map(HouseEntry::placeholder).collect();
    for row in rows {
        let Some(house) = row.house.filter(|h| (1..=12).contains(h)) else {
            debug!(house = ?row.house, "skipping bhava row without a valid house");
            continue;
        };
        let sign = row
            .mid_degree
            .map(Sign::from_longitude)
            .or_else(|| row.sign.as_deref().and_then(Sign::from_label));
        entries[house as usize - 1] = HouseEntry {
            house,
            occupants: row
                .planets
                .iter()
                .flatten()
                .filter_map(|label| Planet::from_label(label))
                .collect(),
            start_degree: row.start_degree,
            mid_degree: row.mid_degree,
            end_degree: row.end_degree,
            sign,
            lord: sign
                .map(Sign::lord)
                .or_else(|| row.lord.as_deref().and_then(Planet::from_label)),
        };
    }
    entries
}

/// Resolves planet-keyed sections to canonical order, dropping unknown keys.
fn by_planet<T>(map: BTreeMap<String, T>) -> Vec<(Planet, T)> {
    let mut resolved: Vec<(Planet, T)> = Vec::with_capacity(map.len());
    for (label, value) in map {
        match Planet::from_label(&label) {
            Some(p) if !resolved.iter().any(|(q, _)| *q == p) => resolved.push((p, value)),
            Some(_) => {}
            None => debug!(%label, "skipping unrecognised planet key"),
        }
    }
    resolved.sort_by_key(|(p, _)| *p);
    resolved
}

fn ashtaka_row(wire: &PointsWire, tier: fn(u32) -> PointTier) -> AshtakaRow {
    let points: Vec<AshtakaPoint> = (0..12)
        .map(|i| {
            let value = wire.points.as_ref().and_then(|p| p.get(i).copied());
            AshtakaPoint {
                value,
                tier: value.map(tier),
            }
        })
        .collect();
    let total = wire
        .points
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(|p| p.iter().take(12).sum::<u32>());
    if let (Some(sum), Some(sent)) = (total, wire.total) {
        if sum != sent {
            debug!(sum, sent, "ashtakavarga total differs from the sum of its points");
        }
    }
    AshtakaRow { points, total }
}

fn ashtakavarga_table(wire: AshtakavargaWire) -> AshtakavargaTable {
    let bhinna = wire
        .bhinnashtakavarga
        .map(by_planet)
        .unwrap_or_default()
        .into_iter()
        .filter(|(p, _)| CLASSICAL.contains(p))
        .map(|(planet, points)| BhinnaRow {
            planet,
            row: ashtaka_row(&points, PointTier::bhinna),
        })
        .collect();
    let sarva = wire
        .sarvashtakavarga
        .as_ref()
        .map(|p| ashtaka_row(p, PointTier::sarva));
    if let Some(total) = sarva.as_ref().and_then(|s| s.total) {
        if total != EXPECTED_SAV_TOTAL {
            warn!(total, expected = EXPECTED_SAV_TOTAL, "unexpected sarvashtakavarga total");
        }
    }
    AshtakavargaTable { bhinna, sarva }
}

fn shadbala(map: BTreeMap<String, ShadbalaWire>) -> Vec<ShadbalaEntry> {
    by_planet(map)
        .into_iter()
        .map(|(planet, s)| ShadbalaEntry {
            planet,
            total: s.total,
        })
        .collect()
}

fn dignity(map: BTreeMap<String, DignityWire>) -> Vec<DignityEntry> {
    by_planet(map)
        .into_iter()
        .map(|(planet, d)| {
            let is_sun = planet == Planet::Sun;
            DignityEntry {
                planet,
                dignity: d.dignity.as_deref().and_then(Dignity::from_label),
                sun_distance: if is_sun { None } else { d.sun_distance },
                is_combust: !is_sun && d.is_combust.unwrap_or(false),
            }
        })
        .collect()
}

/// `"House 7"` -> 7
fn house_number(key: &str) -> Option<u8> {
    let digits: String = key.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok().filter(|h| (1..=12).contains(h))
}

fn bhava_bala(map: BTreeMap<String, BhavaBalaWire>) -> Vec<BhavaBalaEntry> {
    let mut entries: Vec<BhavaBalaEntry> = (1..=12)
        .map(|house| BhavaBalaEntry {
            house,
            strength: None,
            ratio: None,
            tier: None,
        })
        .collect();
    for (key, wire) in map {
        let Some(house) = house_number(&key) else {
            debug!(%key, "skipping unrecognised bhava bala key");
            continue;
        };
        let entry = &mut entries[house as usize - 1];
        entry.strength = wire.strength;
        entry.ratio = wire.ratio;
        entry.tier = wire.ratio.map(StrengthTier::from_ratio);
    }
    entries
}

/// Known abbreviations first in traditional order, the rest by name.
fn ranked_points(map: BTreeMap<String, PointWire>, order: &[&str]) -> Vec<SpecialPoint> {
    let mut points: Vec<SpecialPoint> = map
        .into_iter()
        .map(|(name, wire)| SpecialPoint {
            name,
            abbreviation: wire.abbreviation.filter(|a| !a.trim().is_empty()),
            house: wire.house.filter(|h| (1..=12).contains(h)),
        })
        .collect();
    let rank = |p: &SpecialPoint| {
        p.abbreviation
            .as_deref()
            .and_then(|a| order.iter().position(|o| *o == a))
            .unwrap_or(order.len())
    };
    points.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name)));
    points
}

fn sphutas(map: BTreeMap<String, PointWire>) -> Vec<SpecialPoint> {
    let mut points: Vec<SpecialPoint> = map
        .into_iter()
        .map(|(name, wire)| SpecialPoint {
            name,
            abbreviation: wire.abbreviation,
            house: wire.house.filter(|h| (1..=12).contains(h)),
        })
        .collect();
    points.sort_by(|a, b| {
        let key = |p: &SpecialPoint| p.house.unwrap_or(u8::MAX);
        key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
    });
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::wire::Envelope,
        format::Dms,
        testing::{narrow_payload, sample_birth},
        vedic::CANONICAL_ORDER,
    };
    use serde_json::json;

    fn complete_model() -> ViewModel {
        let env: Envelope<CompleteData> =
            serde_json::from_str(include_str!("testdata/complete.json")).unwrap();
        adapt(Payload::Complete(env.data), &sample_birth())
    }

    #[test]
    fn planets_come_out_in_canonical_order() {
        let model = complete_model();
        let order: Vec<Planet> = model.rasi.unwrap().positions.iter().map(|p| p.planet).collect();
        assert_eq!(order, CANONICAL_ORDER);
        let navamsa: Vec<Planet> = model
            .navamsa
            .unwrap()
            .positions
            .iter()
            .map(|p| p.planet)
            .collect();
        assert_eq!(navamsa, CANONICAL_ORDER);
    }

    #[test]
    fn house_occupants_keep_backend_order() {
        let model = complete_model();
        assert_eq!(
            model.rasi.unwrap().houses.occupants(9),
            &[Planet::Sun, Planet::Venus]
        );
        assert_eq!(
            model.navamsa.unwrap().houses.occupants(1),
            &[Planet::Ascendant, Planet::Sun, Planet::Ketu]
        );
    }

    #[test]
    fn within_sign_degrees_become_absolute() {
        let model = complete_model();
        let rasi = model.rasi.unwrap();
        let moon = rasi.position(Planet::Moon).unwrap();
        assert_eq!(moon.sign, Some(Sign::Taurus));
        assert_eq!(moon.absolute_degree, Some(53.5));
        assert_eq!(moon.degree_in_sign(), Some(23.5));
        assert!(rasi.position(Planet::Saturn).unwrap().is_retrograde);
        assert!(!rasi.position(Planet::Ascendant).unwrap().is_retrograde);
    }

    #[test]
    fn absent_and_null_vargas_stay_empty() {
        let model = complete_model();
        assert!(model.drekkana.is_some());
        assert!(model.dwadashamsha.is_some());
        assert!(model.akshavedamsha.is_none());
        assert!(model.shashtiamsha.is_none());
        assert_eq!(model.extra_vargas().count(), 2);
    }

    #[test]
    fn primary_rashis_from_rasi() {
        let rashis = complete_model().primary_rashis;
        assert_eq!(rashis.lagna, Some(Sign::Leo));
        assert_eq!(rashis.chandra, Some(Sign::Taurus));
        assert_eq!(rashis.surya, Some(Sign::Aries));
    }

    #[test]
    fn bhava_chalit_signs_and_lords_from_mid_degree() {
        let houses = complete_model().bhava_chalit.unwrap();
        assert_eq!(houses.len(), 12);
        assert_eq!(houses[0].sign, Some(Sign::Leo));
        assert_eq!(houses[0].lord, Some(Planet::Sun));
        assert_eq!(houses[0].occupants, vec![Planet::Ascendant]);
        // mid 192.5
        assert_eq!(houses[2].sign, Some(Sign::Libra));
        assert_eq!(houses[2].lord, Some(Planet::Venus));
    }

    #[test]
    fn missing_bhava_rows_become_placeholders() {
        let rows = vec![HouseRowWire {
            house: Some(3),
            mid_degree: Some(185.0),
            ..Default::default()
        }];
        let houses = bhava_chalit(rows);
        assert_eq!(houses.len(), 12);
        assert_eq!(houses[2].sign, Some(Sign::Libra));
        assert_eq!(houses[2].degree_in_sign(), Some(5.0));
        assert_eq!(houses[0], HouseEntry::placeholder(1));
    }

    #[test]
    fn ashtakavarga_totals_are_recomputed() {
        let table = complete_model().ashtakavarga.unwrap();
        let planets: Vec<Planet> = table.bhinna.iter().map(|r| r.planet).collect();
        assert_eq!(planets, CLASSICAL);
        let sun = &table.bhinna[0].row;
        assert_eq!(sun.total, Some(48));
        assert_eq!(sun.points[0].tier, Some(PointTier::Favorable));
        assert_eq!(sun.points[3].tier, Some(PointTier::Weak));
        assert_eq!(sun.points[6].tier, Some(PointTier::Favorable));
        let sarva = table.sarva.unwrap();
        assert_eq!(sarva.total, Some(EXPECTED_SAV_TOTAL));
        assert_eq!(sarva.points[3].tier, Some(PointTier::Favorable));
        assert_eq!(sarva.points[5].tier, Some(PointTier::Weak));
    }

    #[test]
    fn reported_total_is_ignored_in_favour_of_the_sum() {
        let wire = PointsWire {
            points: Some(vec![1, 2, 3]),
            total: Some(99),
        };
        let row = ashtaka_row(&wire, PointTier::bhinna);
        assert_eq!(row.total, Some(6));
        assert_eq!(row.points.len(), 12);
        assert_eq!(row.points[11].value, None);
    }

    #[test]
    fn sun_has_no_combustion_data() {
        let dignity = complete_model().dignity.unwrap();
        let sun = &dignity[0];
        assert_eq!(sun.planet, Planet::Sun);
        assert_eq!(sun.sun_distance, None);
        assert!(!sun.is_combust);
        let venus = dignity.iter().find(|d| d.planet == Planet::Venus).unwrap();
        assert!(venus.is_combust);
        assert_eq!(
            dignity.iter().find(|d| d.planet == Planet::Saturn).unwrap().dignity,
            Some(Dignity::OwnSign)
        );
    }

    #[test]
    fn bhava_bala_is_keyed_by_house_number() {
        let bala = complete_model().bhava_bala.unwrap();
        assert_eq!(bala.len(), 12);
        assert_eq!(bala[0].tier, Some(StrengthTier::Strong));
        assert_eq!(bala[1].tier, Some(StrengthTier::Average));
        assert_eq!(bala[5].tier, Some(StrengthTier::Weak));
        assert_eq!(bala[9].house, 10);
        assert_eq!(house_number("House 12"), Some(12));
        assert_eq!(house_number("House 13"), None);
    }

    #[test]
    fn special_points_are_ranked() {
        let model = complete_model();
        let karakas: Vec<String> = model
            .chara_karakas
            .unwrap()
            .into_iter()
            .filter_map(|k| k.abbreviation)
            .collect();
        assert_eq!(karakas, KARAKA_ORDER);
        let lagnas: Vec<String> = model
            .special_lagnas
            .unwrap()
            .into_iter()
            .filter_map(|l| l.abbreviation)
            .collect();
        assert_eq!(lagnas, ["BL", "HL", "GL", "SL"]);
        let sphutas: Vec<String> = model.sphutas.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(sphutas, ["Beeja Sphuta", "Yogi Sphuta", "Tri Sphuta"]);
    }

    #[test]
    fn narrow_payload_uses_labelled_houses() {
        let model = adapt(narrow_payload(), &sample_birth());
        let rasi = model.rasi.unwrap();
        assert_eq!(rasi.positions.len(), 10);
        assert_eq!(rasi.houses.occupants(1), &[Planet::Ascendant]);
        assert_eq!(rasi.houses.occupants(9), &[Planet::Sun, Planet::Venus]);
        assert_eq!(rasi.houses.occupants(11), &[Planet::Rahu]);
        assert_eq!(rasi.position(Planet::Ketu).unwrap().house, Some(5));
        assert!(rasi.position(Planet::Rahu).unwrap().is_retrograde);

        let sun = rasi.position(Planet::Sun).unwrap();
        assert_eq!(sun.sign, Some(Sign::Aries));
        assert_eq!(sun.degree_in_sign(), Some(0.75));
        assert_eq!(sun.nakshatra.as_deref(), Some("Ashwini"));
        assert_eq!(sun.pada, Some(1));

        assert!(model.bhava_chalit.is_none());
        assert!(model.shadbala.is_none());
        assert!(model.navamsa.is_none());
        assert_eq!(model.ashtakavarga.unwrap().bhinna.len(), 7);
    }

    #[test]
    fn unknown_rows_are_skipped_and_absolute_degrees_accepted() {
        let rows = vec![
            ChartRowWire {
                planet: Some("Pluto".into()),
                degree: Some(10.0),
                ..Default::default()
            },
            ChartRowWire {
                planet: Some("Moon".into()),
                degree: Some(53.5),
                ..Default::default()
            },
        ];
        let chart = divisional_chart(Varga::D1, rows);
        assert_eq!(chart.positions.len(), 1);
        let moon = &chart.positions[0];
        assert_eq!(moon.sign, Some(Sign::Taurus));
        assert_eq!(moon.nakshatra.as_deref(), Some("Mrigashira"));
        // no lagna row: sign number stands in for the house
        assert_eq!(moon.house, Some(2));
        assert_eq!(chart.houses.occupants(2), &[Planet::Moon]);
    }

    #[test]
    fn narrow_seconds_display_as_sent() {
        for minute in 0..60u32 {
            for second in 0..60u32 {
                let exact = 1.0 + minute as f64 / 60.0 + second as f64 / 3600.0;
                let row: ChartRowWire = serde_json::from_value(json!({
                    "name": "Mars♂",
                    "sign": "Capricorn",
                    "degree": 1,
                    "minute": minute,
                    "second": second,
                    "totalDegree": (exact * 10_000.0).round() / 10_000.0,
                }))
                .unwrap();
                let pos = resolve_position(Planet::Mars, &row);
                assert_eq!(pos.sign, Some(Sign::Capricorn));
                assert_eq!(
                    Dms::from_degrees(pos.degree_in_sign().unwrap()).to_string(),
                    format!("1° {}′ {}″", minute, second)
                );
            }
        }
    }

    #[test]
    fn combined_within_sign_degrees_display_as_sent() {
        for k in (0..300_000i64).step_by(7) {
            let row = ChartRowWire {
                planet: Some("Moon".into()),
                sign_index: Some(k % 12),
                degree: Some(k as f64 / 10_000.0),
                ..Default::default()
            };
            let pos = resolve_position(Planet::Moon, &row);
            let seconds = k * 9 / 25;
            let expected = Dms {
                degrees: seconds / 3600,
                minutes: (seconds % 3600 / 60) as u8,
                seconds: (seconds % 60) as u8,
            };
            assert_eq!(
                Dms::from_degrees(pos.degree_in_sign().unwrap()),
                expected,
                "degree {}",
                k as f64 / 10_000.0
            );
        }
    }

    #[test]
    fn unlabelled_planet_keeps_fallback_house_in_chart() {
        let data: KundaliData = serde_json::from_value(json!({
            "planets": [
                {"name": "Ascendant", "sign": "Leo", "degree": 12},
                {"name": "Sun", "sign": "Aries", "degree": 0},
                {"name": "Jupiter", "sign": "Cancer", "degree": 5},
            ],
            "houses": [
                {"house": 1, "planets": ["Lagna"]},
                {"house": 9, "planets": ["Sun"]},
            ],
        }))
        .unwrap();
        let chart = narrow_chart(data).unwrap();
        let jupiter = chart.position(Planet::Jupiter).unwrap();
        assert_eq!(jupiter.house, Some(12));
        assert_eq!(chart.houses.occupants(12), &[Planet::Jupiter]);
        assert_eq!(chart.position(Planet::Sun).unwrap().house, Some(9));
        assert_eq!(chart.houses.occupants(9), &[Planet::Sun]);
    }
}
