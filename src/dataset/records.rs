//! Row types for the exported dataset tables.
//!
//! The export step materializes paper counts as zeros, so the count fields
//! are plain integers here. Author metadata is joined from a separate
//! upstream table and can genuinely be absent, hence the options.

use serde::{Deserialize, Serialize};

/// One row of `papers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: u64,
    pub year: i32,
    #[serde(default)]
    pub cited_by_count: u64,
    #[serde(default)]
    pub patent_count: u64,
}

/// One row of `authors.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub author_id: u64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub h_index: Option<f64>,
    #[serde(default)]
    pub productivity: Option<f64>,
}

/// One row of `paper_authors.json`, linking a paper to one of its authors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Authorship {
    pub paper_id: u64,
    pub author_id: u64,
}

/// One row of `paper_refs.json`: a citation between two papers inside the
/// extract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CitationLink {
    pub citing_paper_id: u64,
    pub cited_paper_id: u64,
}
