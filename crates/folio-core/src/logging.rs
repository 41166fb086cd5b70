//! Structured logging schema and field name constants for folio.
//!
//! All crates use these field names for consistent structured logging, so
//! log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Per-record migration failure, degraded service |
//! | WARN  | Per-record enrichment failure, automatic skip applied |
//! | INFO  | Lifecycle events, batch/run completions, tallies |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "db", "jobs"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "enricher", "migrator", "lookup", "object_store", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "run_batch", "migrate_all", "fetch_toc", "put"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Book id being operated on.
pub const BOOK_ID: &str = "book_id";

/// ISBN used for a lookup call.
pub const ISBN: &str = "isbn";

/// Source or storage URL involved in a migration step.
pub const URL: &str = "url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of candidates considered by a batch.
pub const CONSIDERED: &str = "considered";

/// Number of records actually updated with real content.
pub const UPDATED: &str = "updated";

/// Success count of a migration run.
pub const SUCCEEDED: &str = "succeeded";

/// Failure count of a migration run.
pub const FAILED: &str = "failed";
