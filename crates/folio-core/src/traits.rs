//! Core traits for folio abstractions.
//!
//! These traits define the seams between the pipeline and its
//! collaborators (the catalog store, the lookup service, the image host,
//! the object store), enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AssetKind, Book, BookAsset, FetchedImage};

// =============================================================================
// CATALOG STORE
// =============================================================================

/// Read/update access to the book table.
///
/// Candidate selection is deterministic (primary key ascending) and free of
/// side effects, so it is safe to call repeatedly across runs; the result
/// set shrinks naturally as records are processed.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Books whose table of contents is still missing (`NULL` or empty),
    /// ordered by id ascending, at most `limit` rows (`None` = unbounded).
    async fn toc_candidates(&self, limit: Option<i64>) -> Result<Vec<Book>>;

    /// Books whose cover still points at the external host
    /// (`cover_source_url IS NOT NULL`), ordered by id ascending. Full set;
    /// migration deliberately runs unpaginated.
    async fn cover_candidates(&self) -> Result<Vec<Book>>;

    /// Write the table of contents column. Last write wins.
    async fn set_toc(&self, id: i64, toc: &str) -> Result<()>;
}

/// Asset rows plus the migration commit.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Commit one relocation in a single transaction scoped to this call:
    /// delete any existing `(book_id, kind)` rows, insert the new row, and
    /// null out the book's `cover_source_url`. Each invocation commits or
    /// rolls back independently of every other in-flight record.
    async fn commit_relocation(&self, book_id: i64, kind: AssetKind, url: &str) -> Result<()>;

    /// Fetch the active asset row for `(book_id, kind)`, if any.
    async fn find(&self, book_id: i64, kind: AssetKind) -> Result<Option<BookAsset>>;
}

// =============================================================================
// EXTERNAL SERVICES
// =============================================================================

/// Source of table-of-contents text for an ISBN.
///
/// Implementations return `Ok(None)` for a confirmed absence (the service
/// answered, but has no usable contents) and `Err` for transport or parse
/// failures; callers decide what each means for the record.
#[async_trait]
pub trait TocSource: Send + Sync {
    async fn fetch_toc(&self, isbn: &str) -> Result<Option<String>>;
}

/// Downloader for externally hosted cover images.
#[async_trait]
pub trait CoverFetcher: Send + Sync {
    /// Download the resource at `url`, buffering the body in memory.
    /// Non-2xx and timeouts are errors.
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

/// Durable object storage: put bytes under a key, address them by URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` with the given content type.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Externally visible URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}
