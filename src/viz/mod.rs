//! Vega-Lite 可视化 — 从回复文本提取图表规范，以及数据端点的图表构建
//!
//! Visualization support: pull Vega-Lite specs out of fenced code blocks in
//! model replies, and build specs for the raw data endpoints.

pub mod builder;
pub mod extract;

pub use builder::{author_chart, chart_spec};
pub use extract::extract_visualization;
