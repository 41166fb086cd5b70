//! # folio-core
//!
//! Core types, traits, and abstractions for the folio catalog backfill
//! pipeline.
//!
//! This crate provides:
//! - The shared `Error`/`Result` types
//! - Data models for books, relocated assets, and per-run outcomes
//! - Trait seams for the catalog store, lookup service, image host, and
//!   object store
//! - The markup sanitizer used on lookup-service text
//! - Centralized default constants and the structured-logging schema

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod traits;

pub use error::{Error, Result};
pub use models::{
    AssetKind, BatchOutcome, Book, BookAsset, FetchedImage, MigrationSummary, OutcomeStatus,
};
pub use sanitize::clean_markup;
pub use traits::{AssetRepository, BookRepository, CoverFetcher, ObjectStore, TocSource};
