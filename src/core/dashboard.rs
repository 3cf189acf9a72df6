//! Dashboard controller: the client-side view of server-owned job state.
//!
//! One controller owns all mutable view state and is the only writer:
//!
//! - [`JobListStore`] caches the last full job snapshot from `GET /jobs`.
//! - [`DetailStore`] caches the one job currently open for inspection.
//! - [`ActionGate`] serializes trigger submissions across all actions.
//!
//! Every fetch follows the same contract: replace wholesale on success, keep
//! prior state and log on failure. The rendering layer only reads snapshots
//! through the accessor methods; it never mutates state directly.

use crate::api::{Job, JobsApi, Stage};

/// Latest full snapshot of jobs as returned by the list endpoint.
///
/// Snapshots are applied under a monotonic sequence so a slow fetch that
/// resolves after a newer one cannot overwrite fresher data.
#[derive(Debug, Default)]
pub struct JobListStore {
    jobs: Vec<Job>,
    next_seq: u64,
    applied_seq: u64,
}

impl JobListStore {
    /// Reserve a sequence number for a refresh that is about to start.
    pub fn begin_refresh(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Replace the store with `jobs` if `seq` is newer than the last applied
    /// snapshot. Returns false when the snapshot is stale and was discarded.
    pub fn apply(&mut self, seq: u64, jobs: Vec<Job>) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;
        self.jobs = jobs;
        true
    }

    /// Jobs in server order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Jobs in display order: server order reversed, most recent first.
    /// No client-side sort by time or status.
    pub fn display_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// The job currently selected for inspection, or nothing.
///
/// Independent of the list store: the poller never writes here, and the list
/// dropping a job does not close its open detail view.
#[derive(Debug, Default)]
pub struct DetailStore {
    selected: Option<Job>,
}

impl DetailStore {
    pub fn job(&self) -> Option<&Job> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    fn set(&mut self, job: Job) {
        self.selected = Some(job);
    }

    fn clear(&mut self) {
        self.selected = None;
    }
}

/// Single busy flag shared by every trigger action.
///
/// While held, all action controls are refused; the backend may well accept
/// concurrent jobs, but the client serializes submissions regardless.
#[derive(Debug, Default)]
pub struct ActionGate {
    busy: bool,
}

impl ActionGate {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Take the gate. Returns false if it is already held.
    pub fn acquire(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn release(&mut self) {
        self.busy = false;
    }
}

/// Result of a trigger attempt, for callers that care beyond the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Backend accepted the job; the list has already been re-fetched.
    Accepted,
    /// Backend rejected the request or it never arrived; a notice is pending.
    Rejected,
    /// Another trigger was still in flight; no request was sent.
    Busy,
}

/// Owns all dashboard view state and mutates it through the operations below.
pub struct Dashboard<C> {
    client: C,
    list: JobListStore,
    detail: DetailStore,
    gate: ActionGate,
    notice: Option<String>,
}

impl<C> Dashboard<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            list: JobListStore::default(),
            detail: DetailStore::default(),
            gate: ActionGate::default(),
            notice: None,
        }
    }

    pub fn jobs(&self) -> &JobListStore {
        &self.list
    }

    pub fn detail(&self) -> &DetailStore {
        &self.detail
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Pending trigger-failure notice, if the operator has not dismissed it.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the trigger-failure notice.
    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
    }
}

impl<C: JobsApi> Dashboard<C> {
    /// Refresh the job list. On success the snapshot is replaced atomically;
    /// on failure the prior snapshot stays and the error is only logged.
    pub async fn refresh_jobs(&mut self) {
        let seq = self.list.begin_refresh();
        match self.client.list_jobs().await {
            Ok(jobs) => {
                if !self.list.apply(seq, jobs) {
                    tracing::debug!(seq, "discarding stale job list snapshot");
                }
            }
            Err(e) => tracing::warn!(error = %e, "job list refresh failed"),
        }
    }

    /// Open (or re-open) the detail view for `job_id`.
    ///
    /// A failed fetch leaves the detail store as it was: closed stays closed,
    /// and an open view keeps showing its previous data.
    pub async fn select(&mut self, job_id: &str) {
        match self.client.job_detail(job_id).await {
            Ok(job) => self.detail.set(job),
            Err(e) => tracing::warn!(job_id, error = %e, "job detail fetch failed"),
        }
    }

    /// Close the detail view.
    pub fn deselect(&mut self) {
        self.detail.clear();
    }

    /// Re-fetch the currently open job's detail. No-op when nothing is open.
    pub async fn refresh_selected(&mut self) {
        let Some(id) = self.detail.job().map(|j| j.id.clone()) else {
            return;
        };
        self.select(&id).await;
    }

    /// Start a pipeline stage, serialized through the shared gate.
    ///
    /// On acceptance the job list is force-refreshed before the gate is
    /// released, so a second trigger cannot fire until the list has reflected
    /// (or failed to reflect) the first. On rejection a blocking notice is
    /// recorded. The gate is released on every path.
    pub async fn trigger(&mut self, stage: Stage) -> TriggerOutcome {
        if !self.gate.acquire() {
            return TriggerOutcome::Busy;
        }

        let outcome = match self.client.trigger(stage).await {
            Ok(ack) => {
                tracing::info!(stage = stage.label(), job_id = %ack.job_id, "job submitted");
                self.refresh_jobs().await;
                TriggerOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!(stage = stage.label(), error = %e, "trigger rejected");
                self.notice = Some(format!("Failed to start {}: {}", stage.label(), e));
                TriggerOutcome::Rejected
            }
        };

        self.gate.release();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, status: &str) -> Job {
        Job {
            id: id.to_string(),
            name: format!("job-{}", id),
            status: status.to_string(),
            start_time: 1_724_700_000.0,
            return_code: None,
            command: String::new(),
            log_file: String::new(),
            recent_logs: None,
        }
    }

    #[test]
    fn apply_replaces_snapshot_wholesale() {
        let mut store = JobListStore::default();
        let seq = store.begin_refresh();
        assert!(store.apply(seq, vec![job("a1", "running"), job("b2", "failed")]));

        let seq = store.begin_refresh();
        assert!(store.apply(seq, vec![job("c3", "running")]));

        let ids: Vec<&str> = store.jobs().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["c3"]);
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let mut store = JobListStore::default();
        let slow = store.begin_refresh();
        let fast = store.begin_refresh();

        assert!(store.apply(fast, vec![job("new", "running")]));
        // The slower fetch resolves afterwards with older data.
        assert!(!store.apply(slow, vec![job("old", "running")]));

        let ids: Vec<&str> = store.jobs().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["new"]);
    }

    #[test]
    fn display_order_is_server_order_reversed() {
        let mut store = JobListStore::default();
        let seq = store.begin_refresh();
        store.apply(seq, vec![job("a1", "running"), job("b2", "running")]);

        let ids: Vec<&str> = store.display_jobs().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["b2", "a1"]);
    }

    #[test]
    fn gate_refuses_second_acquire_until_released() {
        let mut gate = ActionGate::default();
        assert!(gate.acquire());
        assert!(!gate.acquire());
        gate.release();
        assert!(gate.acquire());
    }

    #[test]
    fn detail_store_holds_one_job() {
        let mut detail = DetailStore::default();
        assert!(!detail.is_open());

        detail.set(job("a1", "running"));
        detail.set(job("b2", "completed"));
        assert_eq!(detail.job().map(|j| j.id.as_str()), Some("b2"));

        detail.clear();
        assert!(detail.job().is_none());
    }
}
