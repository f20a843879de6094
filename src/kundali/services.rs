use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, instrument};

use super::dto::{DashaResponse, DashaRow, KundaliResponse, RenderedChart, RenderedCharts};
use crate::{
    adapter::adapt,
    backend::{fetch_dasha, fetch_payload},
    birth::{normalize, BirthForm},
    chart::render_chart,
    error::{AppError, Notification},
    export::{export_filename, local_date, render_markdown},
    region::ChartStyle,
    state::AppState,
    tables::report_tables,
    view::{DivisionalChart, ViewModel},
};

fn rendered(chart: &DivisionalChart, style: ChartStyle) -> RenderedChart {
    let grid = render_chart(&chart.houses, style);
    RenderedChart {
        title: chart.varga.title().to_string(),
        text: grid.to_string(),
        grid,
    }
}

pub fn present(model: Arc<ViewModel>, notification: Notification) -> KundaliResponse {
    let style = model.chart_style;
    KundaliResponse {
        notification,
        chart_style: style,
        chart_style_label: style.label(),
        charts: RenderedCharts {
            rasi: model.rasi.as_ref().map(|c| rendered(c, style)),
            navamsa: model.navamsa.as_ref().map(|c| rendered(c, style)),
        },
        tables: report_tables(&model),
        result: model,
    }
}

/// Normalize, calculate, adapt and store. Nothing is stored on failure.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn generate(state: &AppState, form: BirthForm) -> Result<KundaliResponse, AppError> {
    let _guard = state.session.begin_calculation().ok_or(AppError::Busy)?;

    let selected = state.session.selected_place().await;
    let birth = normalize(&form, selected.as_ref())?;
    info!(
        latitude = birth.record.latitude,
        longitude = birth.record.longitude,
        timezone = birth.record.timezone_offset_hours,
        style = ?birth.chart_style,
        "calculating kundali"
    );

    let payload = fetch_payload(&state.backends, &birth.record).await?;
    let model = state.session.store_result(adapt(payload, &birth)).await;
    Ok(present(
        model,
        Notification::success("Kundali generated successfully"),
    ))
}

pub async fn current(state: &AppState) -> Result<KundaliResponse, AppError> {
    let model = state
        .session
        .current_result()
        .await
        .ok_or(AppError::NoResult)?;
    Ok(present(model, Notification::info("Showing the current Kundali")))
}

pub async fn clear(state: &AppState) -> Notification {
    if state.session.clear_result().await {
        Notification::info("Kundali cleared")
    } else {
        Notification::info("Nothing to clear")
    }
}

/// `(filename, markdown)` for the current result, dated in the birth
/// record's timezone.
pub async fn export(state: &AppState, now: OffsetDateTime) -> Result<(String, String), AppError> {
    let model = state
        .session
        .current_result()
        .await
        .ok_or(AppError::NoResult)?;
    let today = local_date(now, model.person.record.timezone_offset_hours);
    Ok((
        export_filename(&model.person.record.name, today),
        render_markdown(&model, today),
    ))
}

#[instrument(skip(state))]
pub async fn dasha(state: &AppState) -> Result<DashaResponse, AppError> {
    let model = state
        .session
        .current_result()
        .await
        .ok_or(AppError::NoResult)?;
    let periods = fetch_dasha(&state.backends, &model.person.record)
        .await?
        .into_iter()
        .map(|(name, value)| DashaRow {
            name,
            value: match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            },
        })
        .collect();
    Ok(DashaResponse {
        name: model.person.record.name.clone(),
        periods,
    })
}
