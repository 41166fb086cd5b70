//! Concurrent cover migration off the external image host.
//!
//! One run fetches every book still pointing at the external host, fans
//! the records out across a bounded worker pool, and relocates each cover
//! into durable object storage. Per-record state:
//! Pending → Downloading → Uploading → Committed, or Failed at any step.
//! A failed record keeps its `cover_source_url`, so the next run picks it
//! up again; nothing is retried within a run.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};
use uuid::Uuid;

use folio_core::defaults::{FALLBACK_IMAGE_CONTENT_TYPE, MIGRATION_POOL_SIZE};
use folio_core::{
    AssetKind, AssetRepository, BatchOutcome, Book, BookRepository, CoverFetcher,
    MigrationSummary, ObjectStore, Result,
};

use crate::tally::RunTally;

/// Bounded-concurrency driver that relocates cover images into the
/// object store.
pub struct CoverMigrator {
    books: Arc<dyn BookRepository>,
    assets: Arc<dyn AssetRepository>,
    store: Arc<dyn ObjectStore>,
    fetcher: Arc<dyn CoverFetcher>,
    pool_size: usize,
}

impl CoverMigrator {
    /// Create a migrator with the default pool size.
    pub fn new(
        books: Arc<dyn BookRepository>,
        assets: Arc<dyn AssetRepository>,
        store: Arc<dyn ObjectStore>,
        fetcher: Arc<dyn CoverFetcher>,
    ) -> Self {
        Self {
            books,
            assets,
            store,
            fetcher,
            pool_size: MIGRATION_POOL_SIZE,
        }
    }

    /// Set the worker pool size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n.max(1);
        self
    }

    /// Start a migration run in the background and return immediately.
    ///
    /// Fire-and-forget: the caller may drop the handle; the run proceeds
    /// to completion of every submitted task. No cancellation channel is
    /// exposed.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<Result<MigrationSummary>> {
        tokio::spawn(async move { self.migrate_all().await })
    }

    /// Migrate every book whose cover still points at the external host.
    ///
    /// The full candidate set is fanned out over a pool of at most
    /// `pool_size` concurrent tasks; the method returns only after every
    /// task has reached a terminal state. Per-record failures are tallied
    /// and logged, never propagated; the only error path is the initial
    /// candidate fetch.
    pub async fn migrate_all(&self) -> Result<MigrationSummary> {
        let start = Instant::now();
        let candidates = self.books.cover_candidates().await?;

        info!(
            subsystem = "jobs",
            component = "migrator",
            op = "migrate_all",
            candidates = candidates.len(),
            pool_size = self.pool_size,
            "Starting cover migration run"
        );

        let tally = RunTally::new();
        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let mut tasks: JoinSet<BatchOutcome> = JoinSet::new();

        for book in candidates {
            let semaphore = semaphore.clone();
            let assets = self.assets.clone();
            let store = self.store.clone();
            let fetcher = self.fetcher.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return BatchOutcome::failed(book.id, "worker pool closed"),
                };
                process_one(&book, assets.as_ref(), store.as_ref(), fetcher.as_ref()).await
            });
        }

        // Completion barrier: every submitted task reaches a terminal state
        // before the tally is read.
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(outcome) => tally.record(&outcome),
                Err(e) => {
                    error!(
                        subsystem = "jobs",
                        component = "migrator",
                        error = ?e,
                        "Migration task panicked"
                    );
                    tally.record_failure();
                }
            }
        }

        let summary = tally.snapshot();
        info!(
            subsystem = "jobs",
            component = "migrator",
            op = "migrate_all",
            succeeded = summary.succeeded,
            failed = summary.failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Cover migration run complete"
        );
        Ok(summary)
    }
}

/// Process a single record: download, upload, commit.
///
/// Every failure is terminal for this record only; the source URL stays in
/// place so the next run retries it naturally.
async fn process_one(
    book: &Book,
    assets: &dyn AssetRepository,
    store: &dyn ObjectStore,
    fetcher: &dyn CoverFetcher,
) -> BatchOutcome {
    let source = match book.cover_source_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            debug!(
                subsystem = "jobs",
                component = "migrator",
                book_id = book.id,
                "Blank cover source; skipping"
            );
            return BatchOutcome::skipped(book.id);
        }
    };

    let image = match fetcher.fetch(source).await {
        Ok(image) => image,
        Err(e) => {
            error!(
                subsystem = "jobs",
                component = "migrator",
                book_id = book.id,
                url = source,
                error = %e,
                "Cover download failed"
            );
            return BatchOutcome::failed(book.id, e.to_string());
        }
    };

    let content_type = image
        .content_type
        .unwrap_or_else(|| FALLBACK_IMAGE_CONTENT_TYPE.to_string());
    let key = storage_key(&content_type);

    if let Err(e) = store.put(&key, &image.bytes, &content_type).await {
        error!(
            subsystem = "jobs",
            component = "migrator",
            book_id = book.id,
            url = source,
            error = %e,
            "Cover upload failed"
        );
        return BatchOutcome::failed(book.id, e.to_string());
    }

    let stored_url = store.public_url(&key);
    if let Err(e) = assets
        .commit_relocation(book.id, AssetKind::Cover, &stored_url)
        .await
    {
        error!(
            subsystem = "jobs",
            component = "migrator",
            book_id = book.id,
            url = %stored_url,
            error = %e,
            "Relocation commit failed"
        );
        return BatchOutcome::failed(book.id, e.to_string());
    }

    debug!(
        subsystem = "jobs",
        component = "migrator",
        book_id = book.id,
        url = %stored_url,
        "Cover relocated"
    );
    BatchOutcome::updated(book.id)
}

/// Unique storage key with the extension chosen from the content type.
fn storage_key(content_type: &str) -> String {
    let ext = if content_type.contains("png") {
        ".png"
    } else {
        ".jpg"
    };
    format!("{}{}", Uuid::new_v4(), ext)
}
