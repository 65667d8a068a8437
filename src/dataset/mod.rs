//! Read-only access to the UMD SciSciNet extract.
//!
//! The store serves six aggregate queries over four JSON tables exported by
//! the offline ingestion step: `papers.json`, `authors.json`,
//! `paper_authors.json`, and `paper_refs.json`, each a flat array of records
//! (see [`records`]). Tables are parsed once per process on first use and
//! treated as immutable afterwards, so concurrent conversations can query
//! the same store without coordination.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

mod queries;
mod records;

pub use queries::{
    AuthorMetric, AuthorRanking, CitationStats, CollaborationStats, PaperSummary, TrendMetric,
    TrendPoint, YearSummary,
};
pub use records::{Author, Authorship, CitationLink, Paper};

/// Errors raised while materializing the dataset tables.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) papers: Vec<Paper>,
    pub(crate) authors: Vec<Author>,
    pub(crate) authorship: Vec<Authorship>,
    pub(crate) references: Vec<CitationLink>,
}

impl Tables {
    fn load(data_dir: &Path) -> Result<Self, DatasetError> {
        let tables = Self {
            papers: load_table(data_dir, "papers.json")?,
            authors: load_table(data_dir, "authors.json")?,
            authorship: load_table(data_dir, "paper_authors.json")?,
            references: load_table(data_dir, "paper_refs.json")?,
        };
        info!(
            papers = tables.papers.len(),
            authors = tables.authors.len(),
            authorship_links = tables.authorship.len(),
            citation_links = tables.references.len(),
            "dataset tables loaded"
        );
        Ok(tables)
    }
}

fn load_table<T: DeserializeOwned>(data_dir: &Path, file: &str) -> Result<Vec<T>, DatasetError> {
    let path = data_dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| DatasetError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DatasetError::Parse { path, source })
}

/// Lazily-loaded, process-lifetime view of the dataset.
#[derive(Debug)]
pub struct DatasetStore {
    data_dir: PathBuf,
    tables: OnceCell<Tables>,
}

impl DatasetStore {
    /// Point the store at a directory containing the four table files.
    /// Nothing is read until the first query.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: OnceCell::new(),
        }
    }

    /// Build a store from in-memory tables, bypassing the filesystem.
    /// Primarily for tests and benchmarks.
    pub fn from_tables(
        papers: Vec<Paper>,
        authors: Vec<Author>,
        authorship: Vec<Authorship>,
        references: Vec<CitationLink>,
    ) -> Self {
        let tables = OnceCell::new();
        let _ = tables.set(Tables {
            papers,
            authors,
            authorship,
            references,
        });
        Self {
            data_dir: PathBuf::new(),
            tables,
        }
    }

    /// Directory the tables are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Force the tables to load now. Useful at startup to surface a bad
    /// data directory before the first conversation does.
    pub fn preload(&self) -> Result<(), DatasetError> {
        self.tables().map(|_| ())
    }

    pub(crate) fn tables(&self) -> Result<&Tables, DatasetError> {
        self.tables.get_or_try_init(|| Tables::load(&self.data_dir))
    }
}
