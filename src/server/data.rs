//! Raw data endpoints.
//!
//! Each endpoint answers straight from the dataset store, without going
//! through the agent, and attaches a ready-made chart where one makes
//! sense for the shape of the data.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::{AuthorMetric, TrendMetric};
use crate::viz::builder::field_title;
use crate::viz::{author_chart, chart_spec};

use super::error::ApiError;
use super::ServerState;

fn default_start_year() -> i32 {
    2014
}

fn default_end_year() -> i32 {
    2024
}

fn default_top_n() -> usize {
    10
}

fn default_trend_metric() -> String {
    "papers".to_string()
}

fn to_values<T: Serialize>(rows: &[T]) -> Result<Vec<Value>, ApiError> {
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(ApiError::from))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct YearRangeQuery {
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
}

pub async fn papers_by_year(
    State(state): State<Arc<ServerState>>,
    Query(range): Query<YearRangeQuery>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.store.papers_by_year(range.start_year, range.end_year)?;
    let values = to_values(&rows)?;
    let chart = chart_spec(
        values.clone(),
        "bar",
        "year",
        "paper_count",
        "UMD CS Papers by Year",
    );
    Ok(Json(json!({ "data": values, "visualization": chart })))
}

#[derive(Debug, Deserialize)]
pub struct TopAuthorsQuery {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub metric: AuthorMetric,
}

pub async fn top_authors(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TopAuthorsQuery>,
) -> Result<Json<Value>, ApiError> {
    let rows = state.store.top_authors(query.top_n, query.metric)?;
    let values = to_values(&rows)?;
    let chart = author_chart(values.clone(), query.metric.as_str(), query.top_n);
    Ok(Json(json!({ "data": values, "visualization": chart })))
}

pub async fn citation_stats(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Value>, ApiError> {
    let stats = state.store.citation_stats()?;
    Ok(Json(json!({ "data": stats })))
}

pub async fn collaboration_stats(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Value>, ApiError> {
    let stats = state.store.collaboration_stats()?;
    Ok(Json(json!({ "data": stats })))
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default = "default_trend_metric")]
    pub metric: String,
}

pub async fn yearly_trend(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Value>, ApiError> {
    // Unrecognized metrics fall back to paper counts; the chart title uses
    // the canonical metric name, not the raw query string.
    let metric = TrendMetric::parse_lossy(&query.metric);
    let rows = state.store.yearly_trend(metric)?;
    let values = to_values(&rows)?;
    let chart = chart_spec(
        values.clone(),
        "line",
        "year",
        "value",
        &format!("Yearly Trend: {}", field_title(metric.as_str())),
    );
    Ok(Json(json!({ "data": values, "visualization": chart })))
}
