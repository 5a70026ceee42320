//! In-memory run store.
//!
//! One entry per discovery run: status, human-readable message, and the
//! final results once done. Entries live for the process lifetime — runs
//! are deliberately not durable. Each run's fields are mutated only by that
//! run's own worker; pollers read eventually-consistent snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use tubescout_core::{ChannelReport, RunSnapshot, RunStatus};

#[derive(Debug, Clone)]
pub(crate) struct RunEntry {
    pub status: RunStatus,
    pub message: String,
    pub results: Vec<ChannelReport>,
}

/// Process-wide registry of discovery runs.
#[derive(Clone, Default)]
pub struct RunStore {
    inner: Arc<RwLock<HashMap<Uuid, RunEntry>>>,
}

impl RunStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new queued run and returns its identifier.
    pub async fn create(&self) -> Uuid {
        let run_id = Uuid::new_v4();
        let entry = RunEntry {
            status: RunStatus::Queued,
            message: "Starting search...".to_owned(),
            results: Vec::new(),
        };
        self.inner.write().await.insert(run_id, entry);
        run_id
    }

    /// Snapshot of one run, `None` for an unknown id.
    pub async fn get(&self, run_id: Uuid) -> Option<RunSnapshot> {
        self.inner.read().await.get(&run_id).map(|entry| RunSnapshot {
            status: entry.status,
            message: entry.message.clone(),
            results: entry.results.clone(),
        })
    }

    pub(crate) async fn set_status(&self, run_id: Uuid, status: RunStatus, message: String) {
        self.update(run_id, |entry| {
            entry.status = status;
            entry.message = message;
        })
        .await;
    }

    pub(crate) async fn set_message(&self, run_id: Uuid, message: String) {
        self.update(run_id, |entry| entry.message = message).await;
    }

    /// Marks a run done with its ordered results.
    pub(crate) async fn finish(&self, run_id: Uuid, results: Vec<ChannelReport>, message: String) {
        self.update(run_id, |entry| {
            entry.status = RunStatus::Done;
            entry.message = message;
            entry.results = results;
        })
        .await;
    }

    /// Marks a run failed, surfacing the error message to pollers. Results
    /// staged before the failure are retained for inspection.
    pub(crate) async fn fail(&self, run_id: Uuid, message: String) {
        self.update(run_id, |entry| {
            entry.status = RunStatus::Error;
            entry.message = message;
        })
        .await;
    }

    async fn update(&self, run_id: Uuid, apply: impl FnOnce(&mut RunEntry)) {
        if let Some(entry) = self.inner.write().await.get_mut(&run_id) {
            apply(entry);
        }
    }
}
