// ── Page controller state machines ──
//
// Every list page runs `loading → ready(rows) | failed(report)`, with a
// per-row mutating marker while an optimistic patch is in flight.
// Detail pages run `loading → ready | not_found | failed`.
//
// A failed reload keeps previously loaded rows visible (the screen
// renders a retry affordance over stale data instead of blanking).

use std::collections::HashSet;

use crate::error::ErrorReport;
use crate::model::Entity;
use crate::optimistic::{self, Snapshot};

/// Load phase of a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(ErrorReport),
}

/// State machine for a list page.
#[derive(Debug)]
pub struct ListController<T: Entity + Clone> {
    rows: Vec<T>,
    phase: LoadPhase,
    loaded_once: bool,
    mutating: HashSet<String>,
}

impl<T: Entity + Clone> ListController<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            phase: LoadPhase::Loading,
            loaded_once: false,
            mutating: HashSet::new(),
        }
    }

    // ── Loading ──────────────────────────────────────────────────────

    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Resolve a load. On failure previously loaded rows are retained.
    pub fn finish_load<E: Into<ErrorReport>>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.loaded_once = true;
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                self.phase = LoadPhase::Failed(err.into());
            }
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        match &self.phase {
            LoadPhase::Failed(report) => Some(report),
            _ => None,
        }
    }

    /// Rows are meaningful once any load succeeded, even if the latest
    /// reload failed.
    pub fn has_data(&self) -> bool {
        self.loaded_once
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    // ── Optimistic mutations ─────────────────────────────────────────

    /// Patch a row locally and mark it mutating. The returned snapshot
    /// must be fed back into [`commit`](Self::commit) or
    /// [`fail`](Self::fail).
    pub fn optimistic_patch(
        &mut self,
        id: &str,
        patch: impl FnOnce(&mut T),
    ) -> Option<Snapshot<T>> {
        let snap = optimistic::apply_patch(&mut self.rows, id, patch)?;
        self.mutating.insert(id.to_owned());
        Some(snap)
    }

    /// Insert a placeholder row the backend has not confirmed yet.
    pub fn optimistic_insert(&mut self, record: T) -> Snapshot<T> {
        self.mutating.insert(record.id().to_owned());
        optimistic::apply_insert(&mut self.rows, record)
    }

    /// Remove a row optimistically.
    pub fn optimistic_remove(&mut self, id: &str) -> Option<Snapshot<T>> {
        let snap = optimistic::apply_remove(&mut self.rows, id)?;
        self.mutating.insert(id.to_owned());
        Some(snap)
    }

    /// The remote call succeeded: clear the marker and, when the
    /// backend returned its representation, reconcile with it.
    pub fn commit(&mut self, id: &str, confirmed: Option<T>) {
        self.mutating.remove(id);
        if let Some(record) = confirmed {
            optimistic::reconcile(&mut self.rows, record);
        }
    }

    /// A create succeeded: swap the placeholder for the real record.
    pub fn commit_insert(&mut self, placeholder_id: &str, confirmed: T) {
        self.mutating.remove(placeholder_id);
        self.mutating.remove(confirmed.id());
        optimistic::reconcile_insert(&mut self.rows, placeholder_id, confirmed);
    }

    /// A delete succeeded: nothing to reconcile, just clear the marker.
    pub fn commit_remove(&mut self, id: &str) {
        self.mutating.remove(id);
    }

    /// The remote call failed: restore the snapshot exactly.
    pub fn fail(&mut self, snapshot: Snapshot<T>) {
        let id = match &snapshot {
            Snapshot::Existing { record, .. } => record.id().to_owned(),
            Snapshot::Inserted { id } => id.clone(),
        };
        self.mutating.remove(&id);
        optimistic::rollback(&mut self.rows, snapshot);
    }

    pub fn is_mutating(&self, id: &str) -> bool {
        self.mutating.contains(id)
    }
}

impl<T: Entity + Clone> Default for ListController<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// State machine for a detail page.
#[derive(Debug)]
pub enum DetailPhase<T> {
    Loading,
    Ready(T),
    NotFound,
    Failed(ErrorReport),
}

#[derive(Debug)]
pub struct DetailController<T> {
    phase: DetailPhase<T>,
}

impl<T> DetailController<T> {
    pub fn new() -> Self {
        Self {
            phase: DetailPhase::Loading,
        }
    }

    pub fn begin_load(&mut self) {
        self.phase = DetailPhase::Loading;
    }

    pub fn finish_load<E: Into<ErrorReport>>(&mut self, result: Result<T, E>) {
        self.phase = match result {
            Ok(record) => DetailPhase::Ready(record),
            Err(err) => {
                let report = err.into();
                if report.is_not_found() {
                    DetailPhase::NotFound
                } else {
                    DetailPhase::Failed(report)
                }
            }
        };
    }

    pub fn phase(&self) -> &DetailPhase<T> {
        &self.phase
    }

    pub fn record(&self) -> Option<&T> {
        match &self.phase {
            DetailPhase::Ready(record) => Some(record),
            _ => None,
        }
    }
}

impl<T> Default for DetailController<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: String,
        blocked: bool,
    }

    impl Entity for Rec {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn rec(id: &str) -> Rec {
        Rec {
            id: id.into(),
            blocked: false,
        }
    }

    #[test]
    fn load_success_reaches_ready() {
        let mut ctl = ListController::new();
        assert!(ctl.is_loading());

        ctl.finish_load(Ok::<_, CoreError>(vec![rec("a"), rec("b")]));
        assert_eq!(*ctl.phase(), LoadPhase::Ready);
        assert_eq!(ctl.rows().len(), 2);
        assert!(ctl.has_data());
    }

    #[test]
    fn failed_reload_keeps_stale_rows() {
        let mut ctl = ListController::new();
        ctl.finish_load(Ok::<_, CoreError>(vec![rec("a")]));

        ctl.begin_load();
        ctl.finish_load(Err(CoreError::Network {
            message: "unreachable".into(),
        }));

        assert!(ctl.error().is_some());
        assert!(ctl.has_data(), "stale rows stay visible");
        assert_eq!(ctl.rows().len(), 1);
    }

    #[test]
    fn initial_load_failure_has_no_data() {
        let mut ctl: ListController<Rec> = ListController::new();
        ctl.finish_load(Err(CoreError::Network {
            message: "unreachable".into(),
        }));
        assert!(!ctl.has_data());
        assert!(ctl.error().is_some());
    }

    #[test]
    fn failed_block_leaves_record_unblocked() {
        let mut ctl = ListController::new();
        ctl.finish_load(Ok::<_, CoreError>(vec![rec("a")]));

        let snap = ctl.optimistic_patch("a", |r| r.blocked = true).unwrap();
        assert!(ctl.get("a").unwrap().blocked);
        assert!(ctl.is_mutating("a"));

        // remote rejects → rollback
        ctl.fail(snap);
        assert!(!ctl.get("a").unwrap().blocked);
        assert!(!ctl.is_mutating("a"));
        assert_eq!(*ctl.get("a").unwrap(), rec("a"));
    }

    #[test]
    fn commit_reconciles_with_server_representation() {
        let mut ctl = ListController::new();
        ctl.finish_load(Ok::<_, CoreError>(vec![rec("a")]));

        let _snap = ctl.optimistic_patch("a", |r| r.blocked = true).unwrap();
        ctl.commit(
            "a",
            Some(Rec {
                id: "a".into(),
                blocked: true,
            }),
        );
        assert!(ctl.get("a").unwrap().blocked);
        assert!(!ctl.is_mutating("a"));
    }

    #[test]
    fn create_flow_swaps_placeholder() {
        let mut ctl = ListController::new();
        ctl.finish_load(Ok::<_, CoreError>(vec![rec("a")]));

        let _snap = ctl.optimistic_insert(rec("pending-1"));
        assert_eq!(ctl.rows().len(), 2);

        ctl.commit_insert("pending-1", rec("net-42"));
        assert!(ctl.get("net-42").is_some());
        assert!(ctl.get("pending-1").is_none());
    }

    #[test]
    fn detail_not_found_is_a_distinct_phase() {
        let mut ctl: DetailController<Rec> = DetailController::new();
        ctl.finish_load(Err(CoreError::NotFound {
            resource: "client",
            id: "cl-99".into(),
        }));
        assert!(matches!(ctl.phase(), DetailPhase::NotFound));
    }

    #[test]
    fn detail_failure_carries_report() {
        let mut ctl: DetailController<Rec> = DetailController::new();
        ctl.finish_load(Err(CoreError::Timeout { timeout_ms: 100 }));
        match ctl.phase() {
            DetailPhase::Failed(report) => {
                assert_eq!(report.code.as_deref(), Some("TIMEOUT"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
