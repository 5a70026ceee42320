//! Typed progress events emitted by a discovery run.
//!
//! The pipeline emits events; consumers (run workers, CLIs) drain them for
//! status messages. Senders never fail: a departed consumer must not affect
//! enrichment.

use tokio::sync::mpsc;

/// One observable step of a discovery run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    SearchStarted { query: String },
    SearchFinished { videos: usize, channels: usize },
    /// Enrichment fetch began for the channel at `index` in discovery order.
    ChannelStarted { index: usize, name: String },
    ChannelFinished { index: usize, name: String },
    /// The authoritative statistics overlay began.
    StatsOverlayStarted { channels: usize },
}

/// Cloneable handle the pipeline emits events through. A reporter without a
/// channel ([`ProgressReporter::none`]) drops every event.
#[derive(Clone)]
pub struct ProgressReporter {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressReporter {
    /// Reporter that discards all events.
    #[must_use]
    pub fn none() -> Self {
        Self { tx: None }
    }

    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Emit an event. Send failures (receiver dropped) are ignored.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

/// Convenience pair: a reporter plus the receiver draining it.
#[must_use]
pub fn progress_channel() -> (ProgressReporter, mpsc::UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressReporter::new(tx), rx)
}
