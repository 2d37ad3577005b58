//! Index update scheduling.
//!
//! Per index type the daemon maintains a remote catalog (platform/board
//! definitions, library metadata) that goes stale. The scheduler decides,
//! from persisted last-update records, which types are due and coalesces
//! them into a single daemon refresh call.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dispatch::CommandDispatcher;
use crate::error::ClientError;
use crate::events::{IndexUpdateEvent, Notifier};
use crate::store::UpdateTimeStore;

pub const DEFAULT_UPDATE_THRESHOLD_HOURS: i64 = 4;

const STORAGE_KEY_PREFIX: &str = "index-last-update-time--";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Platform,
    Library,
}

impl IndexKind {
    pub const ALL: [IndexKind; 2] = [IndexKind::Platform, IndexKind::Library];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Platform => "platform",
            IndexKind::Library => "library",
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform" => Ok(IndexKind::Platform),
            "library" => Ok(IndexKind::Library),
            other => Err(format!("unknown index type: {other}")),
        }
    }
}

/// Observable lifecycle per index type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexState {
    #[default]
    Unknown,
    Checking,
    UpToDate,
    Updating,
    Failed,
}

pub struct IndexUpdateScheduler {
    dispatcher: Arc<CommandDispatcher>,
    store: Arc<dyn UpdateTimeStore>,
    notifier: Arc<Notifier>,
    threshold: Duration,
    states: Mutex<HashMap<IndexKind, IndexState>>,
}

impl IndexUpdateScheduler {
    pub fn new(
        dispatcher: Arc<CommandDispatcher>,
        store: Arc<dyn UpdateTimeStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            dispatcher,
            store,
            notifier,
            threshold: Duration::hours(DEFAULT_UPDATE_THRESHOLD_HOURS),
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub async fn state(&self, kind: IndexKind) -> IndexState {
        self.states
            .lock()
            .await
            .get(&kind)
            .copied()
            .unwrap_or_default()
    }

    async fn set_state(&self, kinds: &[IndexKind], state: IndexState) {
        let mut states = self.states.lock().await;
        for kind in kinds {
            states.insert(*kind, state);
        }
    }

    /// Staleness check for one index type. `force` always wins; a missing
    /// or unparsable record counts as stale so a broken record can never
    /// silently switch indexing off.
    pub async fn needs_update(&self, kind: IndexKind, now: DateTime<Utc>, force: bool) -> bool {
        if force {
            return true;
        }
        let Some(raw) = self.store.last_update(&kind.storage_key()).await else {
            debug!(%kind, "no last-update record; index needs refresh");
            return true;
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(last) => now.signed_duration_since(last.with_timezone(&Utc)) >= self.threshold,
            Err(error) => {
                warn!(%kind, %error, "unparsable last-update record; treating index as stale");
                true
            }
        }
    }

    /// Refreshes every stale type among `kinds` in one daemon call.
    ///
    /// Staleness checks run concurrently (independent reads); the stale
    /// subset then travels in a single `UpdateIndex` request rather than
    /// one round-trip per type. Returns the types that were refreshed.
    pub async fn update_indexes(
        &self,
        kinds: &[IndexKind],
        force: bool,
    ) -> Result<Vec<IndexKind>, ClientError> {
        let now = Utc::now();
        self.set_state(kinds, IndexState::Checking).await;

        let checks = kinds
            .iter()
            .map(|&kind| async move { (kind, self.needs_update(kind, now, force).await) });
        let mut stale = Vec::new();
        let mut fresh = Vec::new();
        for (kind, needed) in join_all(checks).await {
            if needed {
                if !stale.contains(&kind) {
                    stale.push(kind);
                }
            } else {
                fresh.push(kind);
            }
        }
        self.set_state(&fresh, IndexState::UpToDate).await;

        if stale.is_empty() {
            debug!("all indexes fresh; nothing to update");
            return Ok(Vec::new());
        }

        info!(types = ?stale, "updating stale indexes");
        self.set_state(&stale, IndexState::Updating).await;
        let handle = match self
            .dispatcher
            .update_index(stale.iter().map(|kind| kind.as_str().to_string()).collect())
            .await
        {
            Ok(handle) => handle,
            Err(error) => {
                self.set_state(&stale, IndexState::Failed).await;
                return Err(error);
            }
        };
        if let Err(error) = handle.wait().await {
            self.set_state(&stale, IndexState::Failed).await;
            return Err(error);
        }

        let completed_at = Utc::now();
        let stamp = scb_util::format_rfc3339(completed_at);
        for kind in &stale {
            self.store.set_last_update(&kind.storage_key(), &stamp).await?;
            self.notifier.index_updated.publish(IndexUpdateEvent {
                kind: *kind,
                at: completed_at,
            });
        }
        self.set_state(&stale, IndexState::UpToDate).await;
        Ok(stale)
    }

    /// Folds in refreshes the daemon already ran before this client
    /// attached. Reported types are marked up to date without issuing a
    /// new update run.
    pub async fn absorb_summary(&self) -> Result<Vec<IndexKind>, ClientError> {
        let summary = self.dispatcher.index_update_summary().await?;
        let mut absorbed = Vec::new();
        for (raw_kind, updated_at) in summary {
            let Ok(kind) = raw_kind.parse::<IndexKind>() else {
                warn!("daemon summary reported unknown index type: {raw_kind}");
                continue;
            };
            self.store
                .set_last_update(&kind.storage_key(), &updated_at)
                .await?;
            self.set_state(&[kind], IndexState::UpToDate).await;
            absorbed.push(kind);
        }
        Ok(absorbed)
    }

    /// Records an out-of-band "index update completed" notification (from
    /// another window or a daemon background refresh) without a new run.
    pub async fn mark_updated(
        &self,
        kinds: &[IndexKind],
        at: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        let stamp = scb_util::format_rfc3339(at);
        for kind in kinds {
            self.store.set_last_update(&kind.storage_key(), &stamp).await?;
            self.notifier
                .index_updated
                .publish(IndexUpdateEvent { kind: *kind, at });
        }
        self.set_state(kinds, IndexState::UpToDate).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_follow_the_persisted_pattern() {
        assert_eq!(
            IndexKind::Platform.storage_key(),
            "index-last-update-time--platform"
        );
        assert_eq!(
            IndexKind::Library.storage_key(),
            "index-last-update-time--library"
        );
    }

    #[test]
    fn index_kind_round_trips_through_strings() {
        for kind in IndexKind::ALL {
            assert_eq!(kind.as_str().parse::<IndexKind>(), Ok(kind));
        }
        assert!("boards".parse::<IndexKind>().is_err());
    }
}
