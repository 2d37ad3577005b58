//! Typed publish/subscribe channels for daemon notifications.
//!
//! One channel per notification kind; delivery is at-least-once to the
//! subscribers present at publish time, with no replay for late joiners.

use chrono::{DateTime, Utc};
use scb_proto::scb::commands::v1::{DownloadProgress, TaskProgress};
use tokio::sync::broadcast;

use crate::index::IndexKind;

const BROADCAST_CAPACITY: usize = 1024;

pub struct EventChannel<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> EventChannel<T> {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    /// Send errors (no live subscribers) are ignored.
    pub fn publish(&self, event: T) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + 'static> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-fatal problems reported while the daemon instance was initializing.
/// A corrupt index or questionable configuration must not block startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitWarning {
    PlatformIndex(String),
    LibraryIndex(String),
    Config(String),
}

#[derive(Clone, Debug)]
pub struct IndexUpdateEvent {
    pub kind: IndexKind,
    pub at: DateTime<Utc>,
}

/// The UI-facing notification fan-out shared by the session, dispatcher and
/// scheduler.
#[derive(Default)]
pub struct Notifier {
    pub download: EventChannel<DownloadProgress>,
    pub task: EventChannel<TaskProgress>,
    pub index_updated: EventChannel<IndexUpdateEvent>,
    pub init_warnings: EventChannel<InitWarning>,
}
