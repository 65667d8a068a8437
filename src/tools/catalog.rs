//! The built-in dataset tools exposed to the reasoning service.
//!
//! Six read-only queries over the SciSciNet extract. Argument structs
//! mirror the declared defaults, so a reply that omits a parameter gets
//! the same behavior the descriptor advertises.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::dataset::{AuthorMetric, DatasetStore, TrendMetric};
use crate::tools::{ParamSpec, ToolDescriptor, ToolError, ToolRegistry};

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PapersByYearArgs {
    start_year: i32,
    end_year: i32,
}

impl Default for PapersByYearArgs {
    fn default() -> Self {
        Self {
            start_year: 2014,
            end_year: 2024,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TopAuthorsArgs {
    top_n: usize,
    metric: AuthorMetric,
}

impl Default for TopAuthorsArgs {
    fn default() -> Self {
        Self {
            top_n: 10,
            metric: AuthorMetric::PaperCount,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PapersWithFiltersArgs {
    year: Option<i32>,
    min_citations: Option<u64>,
    has_patents: Option<bool>,
    limit: usize,
}

impl Default for PapersWithFiltersArgs {
    fn default() -> Self {
        Self {
            year: None,
            min_citations: None,
            has_patents: None,
            limit: 20,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct YearlyTrendArgs {
    metric: String,
}

impl Default for YearlyTrendArgs {
    fn default() -> Self {
        Self {
            metric: "papers".to_string(),
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T, ToolError> {
    serde_json::from_value(args.clone()).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Build the registry of the six dataset tools over a shared store.
pub fn dataset_registry(store: Arc<DatasetStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let s = store.clone();
    registry.register(
        ToolDescriptor::new(
            "papers-by-year",
            "Paper counts, total citations, and total patents per year for a year range",
        )
        .param(ParamSpec::new("start_year", "int", "Start year of the range").with_default(2014))
        .param(
            ParamSpec::new("end_year", "int", "End year of the range (inclusive)")
                .with_default(2024),
        ),
        Box::new(move |args| {
            let args: PapersByYearArgs = parse_args(args)?;
            let rows = s.papers_by_year(args.start_year, args.end_year)?;
            Ok(serde_json::to_value(rows)?)
        }),
    );

    let s = store.clone();
    registry.register(
        ToolDescriptor::new(
            "top-authors",
            "Top authors ranked by paper count, h-index, or productivity",
        )
        .param(ParamSpec::new("top_n", "int", "Number of authors to return").with_default(10))
        .param(
            ParamSpec::new(
                "metric",
                "str",
                "Ranking metric: paper_count, h_index, or productivity",
            )
            .with_default("paper_count"),
        ),
        Box::new(move |args| {
            let args: TopAuthorsArgs = parse_args(args)?;
            let rows = s.top_authors(args.top_n, args.metric)?;
            Ok(serde_json::to_value(rows)?)
        }),
    );

    let s = store.clone();
    registry.register(
        ToolDescriptor::new(
            "citation-stats",
            "Overall citation statistics: totals, averages, and patent counts",
        ),
        Box::new(move |_args| {
            let stats = s.citation_stats()?;
            Ok(serde_json::to_value(stats)?)
        }),
    );

    let s = store.clone();
    registry.register(
        ToolDescriptor::new(
            "papers-with-filters",
            "Search papers filtered by year, minimum citations, and patent citations",
        )
        .param(ParamSpec::new("year", "int", "Filter to a specific year").optional())
        .param(ParamSpec::new("min_citations", "int", "Minimum citation count").optional())
        .param(
            ParamSpec::new("has_patents", "bool", "Only papers with patent citations").optional(),
        )
        .param(ParamSpec::new("limit", "int", "Maximum number of papers to return").with_default(20)),
        Box::new(move |args| {
            let args: PapersWithFiltersArgs = parse_args(args)?;
            let rows = s.papers_with_filters(
                args.year,
                args.min_citations,
                args.has_patents,
                args.limit,
            )?;
            Ok(serde_json::to_value(rows)?)
        }),
    );

    let s = store.clone();
    registry.register(
        ToolDescriptor::new(
            "collaboration-stats",
            "Collaboration statistics: author counts and co-authorship rates",
        ),
        Box::new(move |_args| {
            let stats = s.collaboration_stats()?;
            Ok(serde_json::to_value(stats)?)
        }),
    );

    let s = store;
    registry.register(
        ToolDescriptor::new("yearly-trend", "Yearly trend of papers, citations, or patents")
            .param(
                ParamSpec::new("metric", "str", "Trend metric: papers, citations, or patents")
                    .with_default("papers"),
            ),
        Box::new(move |args| {
            let args: YearlyTrendArgs = parse_args(args)?;
            let rows = s.yearly_trend(TrendMetric::parse_lossy(&args.metric))?;
            Ok(serde_json::to_value(rows)?)
        }),
    );

    registry
}
