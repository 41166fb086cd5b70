//! Sequential table-of-contents enrichment.
//!
//! Driven externally at a configurable page size: callers invoke
//! [`TocEnricher::run_batch`] repeatedly until it reports zero candidates.
//! Parallelism comes from repeated invocation, not internal fan-out, so
//! iteration here is deliberately sequential.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use folio_core::defaults::TOC_PLACEHOLDER;
use folio_core::{clean_markup, BookRepository, Result, TocSource};

/// Batch enricher that backfills missing table-of-contents text.
pub struct TocEnricher {
    books: Arc<dyn BookRepository>,
    source: Arc<dyn TocSource>,
}

impl TocEnricher {
    /// Create a new enricher over the given store and lookup source.
    pub fn new(books: Arc<dyn BookRepository>, source: Arc<dyn TocSource>) -> Self {
        Self { books, source }
    }

    /// Run one enrichment batch over at most `page_size` candidates.
    ///
    /// Returns the number of candidates **considered** in this invocation,
    /// not the number actually updated with real content: a zero return
    /// means the batch is exhausted, independent of how many records needed
    /// a value change. The updated count is logged, never returned.
    ///
    /// No per-record failure escapes this method. A lookup or store error
    /// for one record is logged and that record is left untouched (so a
    /// future run retries it); every other candidate is still processed.
    /// The only error path is the initial candidate fetch.
    pub async fn run_batch(&self, page_size: Option<i64>) -> Result<usize> {
        let start = Instant::now();
        let candidates = self.books.toc_candidates(page_size).await?;

        if candidates.is_empty() {
            return Ok(0);
        }

        let mut updated = 0usize;
        for book in &candidates {
            match self.source.fetch_toc(&book.isbn).await {
                Ok(Some(raw)) => {
                    let toc = clean_markup(&raw);
                    if toc.is_empty() {
                        // Markup-only payload. Writing the empty string back
                        // would leave the record selectable forever.
                        self.write_placeholder(book.id, &book.isbn).await;
                    } else if self.write_toc(book.id, &book.isbn, &toc).await {
                        updated += 1;
                    }
                }
                Ok(None) => {
                    self.write_placeholder(book.id, &book.isbn).await;
                }
                Err(e) => {
                    warn!(
                        subsystem = "jobs",
                        component = "enricher",
                        book_id = book.id,
                        isbn = %book.isbn,
                        error = %e,
                        "Contents lookup failed; record left for a future run"
                    );
                }
            }
        }

        info!(
            subsystem = "jobs",
            component = "enricher",
            op = "run_batch",
            considered = candidates.len(),
            updated,
            duration_ms = start.elapsed().as_millis() as u64,
            "Enrichment batch complete"
        );

        Ok(candidates.len())
    }

    /// Look up the table of contents for a single ISBN on demand.
    ///
    /// Returns `None` on any error or confirmed absence. Never writes to
    /// the store; single lookups must not mark records processed.
    pub async fn lookup_one(&self, isbn: &str) -> Option<String> {
        match self.source.fetch_toc(isbn).await {
            Ok(Some(raw)) => {
                let toc = clean_markup(&raw);
                (!toc.is_empty()).then_some(toc)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(
                    subsystem = "jobs",
                    component = "enricher",
                    op = "lookup_one",
                    isbn,
                    error = %e,
                    "Single contents lookup failed"
                );
                None
            }
        }
    }

    /// Write real content; a store failure is per-record and only logged.
    async fn write_toc(&self, book_id: i64, isbn: &str, toc: &str) -> bool {
        match self.books.set_toc(book_id, toc).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    subsystem = "jobs",
                    component = "enricher",
                    book_id,
                    isbn,
                    error = %e,
                    "Failed to store fetched contents"
                );
                false
            }
        }
    }

    /// Mark a confirmed-absent record so it is never reselected.
    async fn write_placeholder(&self, book_id: i64, isbn: &str) {
        match self.books.set_toc(book_id, TOC_PLACEHOLDER).await {
            Ok(()) => {
                info!(
                    subsystem = "jobs",
                    component = "enricher",
                    book_id,
                    isbn,
                    "No contents at the lookup service; placeholder written"
                );
            }
            Err(e) => {
                warn!(
                    subsystem = "jobs",
                    component = "enricher",
                    book_id,
                    isbn,
                    error = %e,
                    "Failed to write placeholder"
                );
            }
        }
    }
}
