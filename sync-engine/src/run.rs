//! # Sync Run State Machine
//!
//! Tracks one sync run through its phases with validated transitions.
//!
//! ## State Machine
//!
//! ```text
//! Idle → ValidatingConfig → ResolvingCredentials → Paginating ⇄ Reconciling
//!                                                      │            │
//!                                                      └────┬───────┘
//!                                                           ↓
//!                                                  CollectingOrphans → Done
//!
//! (any non-terminal phase) → Failed
//! ```
//!
//! The run also carries the set of guids seen so far, which the orphan
//! sweep consumes, and the counters that make up the final report.

use crate::{Result, SyncError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The current phase of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Run created but not started
    Idle,
    /// Checking that credentials and library id are configured
    ValidatingConfig,
    /// Resolving the library-scoped access key
    ResolvingCredentials,
    /// Fetching a page of the remote listing
    Paginating,
    /// Upserting the fetched page into the local catalog
    Reconciling,
    /// Sweeping local records no longer present remotely
    CollectingOrphans,
    /// Run finished successfully
    Done,
    /// Run aborted with an error
    Failed,
}

impl SyncPhase {
    /// Check if this phase represents a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncPhase::Done | SyncPhase::Failed)
    }

    /// Get the string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "idle",
            SyncPhase::ValidatingConfig => "validating_config",
            SyncPhase::ResolvingCredentials => "resolving_credentials",
            SyncPhase::Paginating => "paginating",
            SyncPhase::Reconciling => "reconciling",
            SyncPhase::CollectingOrphans => "collecting_orphans",
            SyncPhase::Done => "done",
            SyncPhase::Failed => "failed",
        }
    }

    fn can_transition_to(&self, next: SyncPhase) -> bool {
        use SyncPhase::*;
        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, ValidatingConfig)
                | (ValidatingConfig, ResolvingCredentials)
                | (ResolvingCredentials, Paginating)
                | (Paginating, Reconciling)
                | (Reconciling, Paginating)
                | (Paginating, CollectingOrphans)
                | (Reconciling, CollectingOrphans)
                | (CollectingOrphans, Done)
        )
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State carried through one sync run
#[derive(Debug)]
pub struct SyncRun {
    /// Library being synced
    pub library_id: String,
    /// Current phase
    pub phase: SyncPhase,
    /// Guids seen on processed pages, consumed by the orphan sweep
    pub processed_guids: HashSet<String>,
    /// Pages fetched so far
    pub pages_fetched: u64,
    /// Records created so far
    pub created: u64,
    /// Records updated so far
    pub updated: u64,
    /// Records deleted by the orphan sweep
    pub deleted: u64,
}

impl SyncRun {
    /// Start a new run in the `Idle` phase
    pub fn new(library_id: impl Into<String>) -> Self {
        Self {
            library_id: library_id.into(),
            phase: SyncPhase::Idle,
            processed_guids: HashSet::new(),
            pages_fetched: 0,
            created: 0,
            updated: 0,
            deleted: 0,
        }
    }

    /// Move to the next phase.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the move is not in the allowed set.
    pub fn advance(&mut self, next: SyncPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(SyncError::InvalidTransition {
                from: self.phase.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Mark the run failed. Counters keep their partial values; completed
    /// page upserts are never rolled back.
    pub fn fail(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = SyncPhase::Failed;
        }
    }

    /// Record a processed remote guid
    pub fn mark_processed(&mut self, guid: &str) {
        self.processed_guids.insert(guid.to_string());
    }

    /// Build the final report. Call once the run reaches `Done`.
    pub fn report(&self, completed_at: DateTime<Utc>) -> SyncReport {
        SyncReport {
            library_id: self.library_id.clone(),
            pages_fetched: self.pages_fetched,
            created: self.created,
            updated: self.updated,
            deleted: self.deleted,
            completed_at,
        }
    }
}

/// Summary of a completed sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Library that was synced
    pub library_id: String,
    /// Pages fetched from the remote listing
    pub pages_fetched: u64,
    /// New records created
    pub created: u64,
    /// Existing records refreshed
    pub updated: u64,
    /// Orphaned records removed
    pub deleted: u64,
    /// Completion time
    pub completed_at: DateTime<Utc>,
}

impl SyncReport {
    /// Human-readable completion line
    pub fn summary(&self) -> String {
        format!(
            "Sync completed at {}! Created: {}, Updated: {}",
            self.completed_at.format("%Y-%m-%d %H:%M:%S"),
            self.created,
            self.updated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_happy_path_transitions() {
        let mut run = SyncRun::new("lib-1");
        run.advance(SyncPhase::ValidatingConfig).unwrap();
        run.advance(SyncPhase::ResolvingCredentials).unwrap();
        run.advance(SyncPhase::Paginating).unwrap();
        run.advance(SyncPhase::Reconciling).unwrap();
        run.advance(SyncPhase::Paginating).unwrap();
        run.advance(SyncPhase::Reconciling).unwrap();
        run.advance(SyncPhase::CollectingOrphans).unwrap();
        run.advance(SyncPhase::Done).unwrap();
        assert!(run.phase.is_terminal());
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let mut run = SyncRun::new("lib-1");
        let err = run.advance(SyncPhase::Paginating).unwrap_err();
        assert!(matches!(err, SyncError::InvalidTransition { .. }));
        // Phase is unchanged after a rejected transition
        assert_eq!(run.phase, SyncPhase::Idle);
    }

    #[test]
    fn test_fail_from_any_active_phase() {
        let mut run = SyncRun::new("lib-1");
        run.advance(SyncPhase::ValidatingConfig).unwrap();
        run.fail();
        assert_eq!(run.phase, SyncPhase::Failed);

        // Terminal states stay put
        run.fail();
        assert_eq!(run.phase, SyncPhase::Failed);
    }

    #[test]
    fn test_done_is_final() {
        let mut run = SyncRun::new("lib-1");
        run.advance(SyncPhase::ValidatingConfig).unwrap();
        run.advance(SyncPhase::ResolvingCredentials).unwrap();
        run.advance(SyncPhase::Paginating).unwrap();
        run.advance(SyncPhase::CollectingOrphans).unwrap();
        run.advance(SyncPhase::Done).unwrap();

        assert!(run.advance(SyncPhase::Paginating).is_err());
        run.fail();
        assert_eq!(run.phase, SyncPhase::Done);
    }

    #[test]
    fn test_report_summary_format() {
        let mut run = SyncRun::new("lib-1");
        run.created = 3;
        run.updated = 7;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let report = run.report(at);

        assert_eq!(
            report.summary(),
            "Sync completed at 2024-05-01 12:30:00! Created: 3, Updated: 7"
        );
    }

    #[test]
    fn test_processed_guids_deduplicate() {
        let mut run = SyncRun::new("lib-1");
        run.mark_processed("g1");
        run.mark_processed("g1");
        run.mark_processed("g2");
        assert_eq!(run.processed_guids.len(), 2);
    }
}
