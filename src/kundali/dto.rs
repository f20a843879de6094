use std::sync::Arc;

use serde::Serialize;

use crate::{
    chart::ChartGrid, error::Notification, region::ChartStyle, tables::Table, view::ViewModel,
};

#[derive(Debug, Serialize)]
pub struct RenderedChart {
    pub title: String,
    pub grid: ChartGrid,
    /// Plain-text drawing of `grid`.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RenderedCharts {
    pub rasi: Option<RenderedChart>,
    pub navamsa: Option<RenderedChart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KundaliResponse {
    pub notification: Notification,
    pub chart_style: ChartStyle,
    pub chart_style_label: &'static str,
    pub result: Arc<ViewModel>,
    pub charts: RenderedCharts,
    pub tables: Vec<Table>,
}

#[derive(Debug, Serialize)]
pub struct DashaRow {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DashaResponse {
    pub name: String,
    pub periods: Vec<DashaRow>,
}
