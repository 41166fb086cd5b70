//! Concurrency-safe success/failure counters for a migration run.

use std::sync::atomic::{AtomicUsize, Ordering};

use folio_core::{BatchOutcome, MigrationSummary, OutcomeStatus};

/// Aggregates per-record outcomes across concurrent tasks.
///
/// Counters are atomic; a snapshot taken after the run's completion
/// barrier is exact.
#[derive(Debug, Default)]
pub struct RunTally {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl RunTally {
    /// Create a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal outcome. Skips count on the success side; they
    /// are no-ops, not failures.
    pub fn record(&self, outcome: &BatchOutcome) {
        match outcome.status {
            OutcomeStatus::Failed => self.failed.fetch_add(1, Ordering::Relaxed),
            _ => self.succeeded.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Record a task that died without producing an outcome.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counts.
    pub fn snapshot(&self) -> MigrationSummary {
        MigrationSummary {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_outcome_mapping() {
        let tally = RunTally::new();
        tally.record(&BatchOutcome::updated(1));
        tally.record(&BatchOutcome::skipped(2));
        tally.record(&BatchOutcome::placeholder(3));
        tally.record(&BatchOutcome::failed(4, "HTTP 404"));
        tally.record_failure();

        let summary = tally.snapshot();
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_concurrent_increments() {
        let tally = Arc::new(RunTally::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let tally = tally.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..1000 {
                    if (i + j) % 4 == 0 {
                        tally.record(&BatchOutcome::failed(j, "boom"));
                    } else {
                        tally.record(&BatchOutcome::updated(j));
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let summary = tally.snapshot();
        assert_eq!(summary.total(), 8000);
        assert_eq!(summary.failed, 2000);
        assert_eq!(summary.succeeded, 6000);
    }
}
