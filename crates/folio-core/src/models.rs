//! Shared data types for the backfill pipeline.
//!
//! `Book` and `BookAsset` mirror the catalog store's tables; the pipeline
//! reads books and only ever writes `toc`, `cover_source_url`, and asset
//! rows. `BatchOutcome` and `MigrationSummary` are transient per-run values
//! and are never persisted.

use serde::{Deserialize, Serialize};

/// A catalog record as the pipeline sees it.
///
/// `toc` doubles as the processed marker: any non-null, non-empty value
/// (the placeholder included) excludes the book from future enrichment
/// candidate selection. `cover_source_url` plays the same role for cover
/// migration; it is nulled once the cover has been relocated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub toc: Option<String>,
    pub cover_source_url: Option<String>,
}

/// Kind of relocated asset attached to a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Cover,
}

impl AssetKind {
    /// Stable string form used in the database `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Cover => "cover",
        }
    }

    /// Parse the database string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cover" => Some(AssetKind::Cover),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durably stored asset reference for a book.
///
/// At most one active row exists per `(book_id, kind)`; the migration
/// commit replaces rather than updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAsset {
    pub id: i64,
    pub book_id: i64,
    pub kind: AssetKind,
    pub url: String,
}

/// An image buffered fully in memory after download.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Content type as reported by the origin, if any.
    pub content_type: Option<String>,
}

/// Terminal state of one record within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Real content was written.
    Updated,
    /// The confirmed-absent placeholder was written.
    UpdatedWithPlaceholder,
    /// Nothing to do for this record (no-op, not a failure).
    Skipped,
    /// Processing failed; the record is left eligible for the next run.
    Failed,
}

/// Per-record result of one processing attempt. Transient, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub book_id: i64,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn updated(book_id: i64) -> Self {
        Self {
            book_id,
            status: OutcomeStatus::Updated,
            error: None,
        }
    }

    pub fn placeholder(book_id: i64) -> Self {
        Self {
            book_id,
            status: OutcomeStatus::UpdatedWithPlaceholder,
            error: None,
        }
    }

    pub fn skipped(book_id: i64) -> Self {
        Self {
            book_id,
            status: OutcomeStatus::Skipped,
            error: None,
        }
    }

    pub fn failed(book_id: i64, error: impl Into<String>) -> Self {
        Self {
            book_id,
            status: OutcomeStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// Aggregate tally of a migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl MigrationSummary {
    /// Total records that reached a terminal state this run.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}
