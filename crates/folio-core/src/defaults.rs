//! Centralized default constants for the folio pipeline.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers. When adding new constants, place them in the appropriate
//! section and document the rationale for the chosen value.

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Written to `toc` when the lookup service confirms no contents exist.
///
/// A processed-but-empty record must carry *some* non-empty value so the
/// candidate predicate stops selecting it. Overloading the payload column
/// this way conflates absence-of-data with absence-of-processing; a
/// separate processing-state column would be the cleaner design, but the
/// observed store semantics are preserved here.
pub const TOC_PLACEHOLDER: &str = "No table of contents available";

/// Lookup responses use a single dot to mean "no contents".
pub const TOC_ABSENT_SENTINEL: &str = ".";

/// Default page size for one enrichment batch.
pub const ENRICH_PAGE_LIMIT: i64 = 100;

/// Request timeout for the catalog lookup call (seconds).
pub const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Item id type sent to the lookup service.
pub const LOOKUP_ID_TYPE: &str = "ISBN13";

/// Response format requested from the lookup service.
pub const LOOKUP_OUTPUT_FORMAT: &str = "json";

/// Detail selector asking the lookup service to include the contents.
pub const LOOKUP_COVER_DETAIL: &str = "toc";

// =============================================================================
// COVER MIGRATION
// =============================================================================

/// Concurrent migration tasks. Sized deliberately low; the image host
/// rate-limits aggressive scrapers.
pub const MIGRATION_POOL_SIZE: usize = 20;

/// Connect/read timeout for one image download (seconds).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 5;

/// Browser identity sent when downloading covers; the image host rejects
/// non-browser user agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Content type assumed when the origin reports none.
pub const FALLBACK_IMAGE_CONTENT_TYPE: &str = "image/jpeg";
