//! # folio-jobs
//!
//! Background enrichment and migration pipeline for the folio catalog.
//!
//! This crate provides:
//! - Sequential table-of-contents enrichment driven at a page size
//! - Bounded-concurrency cover migration into durable object storage
//! - Per-record failure isolation: one record's error never aborts a run
//!   or touches another record's commit
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_db::{Database, PgAssetRepository, PgBookRepository};
//! use folio_jobs::{
//!     CatalogLookupClient, CoverMigrator, HttpCoverFetcher, HttpObjectStore,
//!     LookupConfig, StoreConfig, TocEnricher,
//! };
//!
//! let db = Database::connect("postgres://...").await?;
//! let books = Arc::new(PgBookRepository::new(db.pool.clone()));
//!
//! // Enrichment: repeat until a batch considers zero candidates.
//! let source = Arc::new(CatalogLookupClient::new(LookupConfig::from_env()?));
//! let enricher = TocEnricher::new(books.clone(), source);
//! while enricher.run_batch(Some(100)).await? > 0 {}
//!
//! // Migration: fire-and-forget.
//! let migrator = Arc::new(CoverMigrator::new(
//!     books,
//!     Arc::new(PgAssetRepository::new(db.pool.clone())),
//!     Arc::new(HttpObjectStore::new(StoreConfig::from_env()?)),
//!     Arc::new(HttpCoverFetcher::new()),
//! ));
//! migrator.spawn();
//! ```

pub mod enricher;
pub mod fetch;
pub mod lookup;
pub mod migrator;
pub mod store;
pub mod tally;

// Re-export core types
pub use folio_core::*;

pub use enricher::TocEnricher;
pub use fetch::HttpCoverFetcher;
pub use lookup::{CatalogLookupClient, LookupConfig};
pub use migrator::CoverMigrator;
pub use store::{HttpObjectStore, StoreConfig};
pub use tally::RunTally;
