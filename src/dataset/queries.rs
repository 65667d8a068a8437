//! The six aggregate queries the agent's tools are built on.
//!
//! Each query is a pure function over the loaded tables: filter, group,
//! rank. Output rows serialize directly into tool results and HTTP
//! responses.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{DatasetError, DatasetStore};

/// Ranking metric for [`DatasetStore::top_authors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorMetric {
    #[default]
    PaperCount,
    HIndex,
    Productivity,
}

impl AuthorMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorMetric::PaperCount => "paper_count",
            AuthorMetric::HIndex => "h_index",
            AuthorMetric::Productivity => "productivity",
        }
    }
}

/// Series selector for [`DatasetStore::yearly_trend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMetric {
    #[default]
    Papers,
    Citations,
    Patents,
}

impl TrendMetric {
    /// Parse a metric name, falling back to paper counts for anything
    /// unrecognized. Matches the permissive behavior the trend query has
    /// always had toward exploratory inputs.
    pub fn parse_lossy(name: &str) -> Self {
        match name {
            "citations" => TrendMetric::Citations,
            "patents" => TrendMetric::Patents,
            _ => TrendMetric::Papers,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendMetric::Papers => "papers",
            TrendMetric::Citations => "citations",
            TrendMetric::Patents => "patents",
        }
    }
}

/// Per-year aggregate for a year range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub paper_count: u64,
    pub total_citations: u64,
    pub total_patents: u64,
}

/// One ranked author. Ids are rendered as strings so downstream JSON
/// consumers never round them through floating point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRanking {
    pub author_id: String,
    pub display_name: String,
    pub paper_count: u64,
    pub h_index: f64,
    pub productivity: f64,
}

/// Dataset-wide citation aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationStats {
    pub total_papers: u64,
    pub total_internal_citations: u64,
    pub avg_citations_per_paper: f64,
    pub max_citations: u64,
    pub papers_with_patents: u64,
    pub total_patent_citations: u64,
}

/// One paper row from a filtered search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSummary {
    pub paper_id: u64,
    pub year: i32,
    pub cited_by_count: u64,
    pub patent_count: u64,
}

/// Co-authorship aggregate over the authorship links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationStats {
    pub total_authors: u64,
    pub avg_authors_per_paper: f64,
    pub max_authors_on_paper: u64,
    pub single_author_papers: u64,
    pub multi_author_papers: u64,
}

/// One point of a yearly trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: u64,
    pub metric: TrendMetric,
}

impl DatasetStore {
    /// Paper counts, total citations, and total patents per year for the
    /// inclusive `start_year..=end_year` range. Years with no papers are
    /// absent from the result; rows are ascending by year.
    pub fn papers_by_year(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearSummary>, DatasetError> {
        let tables = self.tables()?;
        let mut by_year: BTreeMap<i32, (u64, u64, u64)> = BTreeMap::new();
        for paper in &tables.papers {
            if paper.year < start_year || paper.year > end_year {
                continue;
            }
            let entry = by_year.entry(paper.year).or_default();
            entry.0 += 1;
            entry.1 += paper.cited_by_count;
            entry.2 += paper.patent_count;
        }
        Ok(by_year
            .into_iter()
            .map(|(year, (papers, citations, patents))| YearSummary {
                year,
                paper_count: papers,
                total_citations: citations,
                total_patents: patents,
            })
            .collect())
    }

    /// The `top_n` authors with the highest value of `metric`, descending.
    /// Authors appear here when they hold at least one authorship link;
    /// missing profile metadata defaults to zero / an empty name. Ties
    /// break on ascending author id so rankings are stable across runs.
    pub fn top_authors(
        &self,
        top_n: usize,
        metric: AuthorMetric,
    ) -> Result<Vec<AuthorRanking>, DatasetError> {
        let tables = self.tables()?;

        let mut paper_counts: HashMap<u64, u64> = HashMap::new();
        for link in &tables.authorship {
            *paper_counts.entry(link.author_id).or_default() += 1;
        }

        let profiles: HashMap<u64, &super::Author> = tables
            .authors
            .iter()
            .map(|a| (a.author_id, a))
            .collect();

        let mut ranked: Vec<(u64, AuthorRanking)> = paper_counts
            .into_iter()
            .map(|(author_id, paper_count)| {
                let profile = profiles.get(&author_id);
                let row = AuthorRanking {
                    author_id: author_id.to_string(),
                    display_name: profile
                        .and_then(|p| p.display_name.clone())
                        .unwrap_or_default(),
                    paper_count,
                    h_index: profile.and_then(|p| p.h_index).unwrap_or(0.0),
                    productivity: profile.and_then(|p| p.productivity).unwrap_or(0.0),
                };
                (author_id, row)
            })
            .collect();

        let key = |row: &AuthorRanking| -> f64 {
            match metric {
                AuthorMetric::PaperCount => row.paper_count as f64,
                AuthorMetric::HIndex => row.h_index,
                AuthorMetric::Productivity => row.productivity,
            }
        };
        ranked.sort_by(|(id_a, a), (id_b, b)| {
            key(b)
                .partial_cmp(&key(a))
                .unwrap_or(Ordering::Equal)
                .then(id_a.cmp(id_b))
        });
        ranked.truncate(top_n);

        Ok(ranked.into_iter().map(|(_, row)| row).collect())
    }

    /// Dataset-wide citation statistics.
    pub fn citation_stats(&self) -> Result<CitationStats, DatasetError> {
        let tables = self.tables()?;
        let total_papers = tables.papers.len() as u64;
        let total_citations: u64 = tables.papers.iter().map(|p| p.cited_by_count).sum();
        let avg = if total_papers == 0 {
            0.0
        } else {
            total_citations as f64 / total_papers as f64
        };
        Ok(CitationStats {
            total_papers,
            total_internal_citations: tables.references.len() as u64,
            avg_citations_per_paper: avg,
            max_citations: tables
                .papers
                .iter()
                .map(|p| p.cited_by_count)
                .max()
                .unwrap_or(0),
            papers_with_patents: tables
                .papers
                .iter()
                .filter(|p| p.patent_count > 0)
                .count() as u64,
            total_patent_citations: tables.papers.iter().map(|p| p.patent_count).sum(),
        })
    }

    /// Papers matching the given filters, most-cited first, truncated to
    /// `limit`. `has_patents` restricts the result only when `Some(true)`.
    pub fn papers_with_filters(
        &self,
        year: Option<i32>,
        min_citations: Option<u64>,
        has_patents: Option<bool>,
        limit: usize,
    ) -> Result<Vec<PaperSummary>, DatasetError> {
        let tables = self.tables()?;
        let mut matches: Vec<&super::Paper> = tables
            .papers
            .iter()
            .filter(|p| year.map_or(true, |y| p.year == y))
            .filter(|p| min_citations.map_or(true, |m| p.cited_by_count >= m))
            .filter(|p| {
                if has_patents == Some(true) {
                    p.patent_count > 0
                } else {
                    true
                }
            })
            .collect();
        matches.sort_by(|a, b| b.cited_by_count.cmp(&a.cited_by_count));
        matches.truncate(limit);
        Ok(matches
            .into_iter()
            .map(|p| PaperSummary {
                paper_id: p.paper_id,
                year: p.year,
                cited_by_count: p.cited_by_count,
                patent_count: p.patent_count,
            })
            .collect())
    }

    /// Co-authorship statistics over the authorship links.
    pub fn collaboration_stats(&self) -> Result<CollaborationStats, DatasetError> {
        let tables = self.tables()?;

        let mut authors_per_paper: HashMap<u64, u64> = HashMap::new();
        let mut distinct_authors: HashSet<u64> = HashSet::new();
        for link in &tables.authorship {
            *authors_per_paper.entry(link.paper_id).or_default() += 1;
            distinct_authors.insert(link.author_id);
        }

        let linked_papers = authors_per_paper.len() as u64;
        let avg = if linked_papers == 0 {
            0.0
        } else {
            tables.authorship.len() as f64 / linked_papers as f64
        };
        Ok(CollaborationStats {
            total_authors: distinct_authors.len() as u64,
            avg_authors_per_paper: avg,
            max_authors_on_paper: authors_per_paper.values().copied().max().unwrap_or(0),
            single_author_papers: authors_per_paper.values().filter(|&&n| n == 1).count() as u64,
            multi_author_papers: authors_per_paper.values().filter(|&&n| n > 1).count() as u64,
        })
    }

    /// Yearly series of the chosen metric for years 2000 and later,
    /// ascending by year.
    pub fn yearly_trend(&self, metric: TrendMetric) -> Result<Vec<TrendPoint>, DatasetError> {
        let tables = self.tables()?;
        let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
        for paper in &tables.papers {
            if paper.year < 2000 {
                continue;
            }
            let value = match metric {
                TrendMetric::Papers => 1,
                TrendMetric::Citations => paper.cited_by_count,
                TrendMetric::Patents => paper.patent_count,
            };
            *by_year.entry(paper.year).or_default() += value;
        }
        Ok(by_year
            .into_iter()
            .map(|(year, value)| TrendPoint {
                year,
                value,
                metric,
            })
            .collect())
    }
}
