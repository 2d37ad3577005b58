mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{session_fixture, FakeTransport, Script};
use scb_client::{
    CommandDispatcher, IndexKind, IndexState, IndexUpdateScheduler, MemoryUpdateTimeStore,
    Notifier, UpdateTimeStore,
};
use tonic::Status;

fn scheduler_fixture() -> (
    Arc<FakeTransport>,
    Arc<MemoryUpdateTimeStore>,
    Arc<Notifier>,
    IndexUpdateScheduler,
) {
    let (transport, session, notifier) = session_fixture();
    let dispatcher = Arc::new(CommandDispatcher::new(
        transport.clone(),
        session,
        notifier.clone(),
    ));
    let store = Arc::new(MemoryUpdateTimeStore::default());
    let scheduler = IndexUpdateScheduler::new(dispatcher, store.clone(), notifier.clone());
    (transport, store, notifier, scheduler)
}

async fn record_age(store: &MemoryUpdateTimeStore, kind: IndexKind, age: Duration) {
    let stamp = scb_util::format_rfc3339(Utc::now() - age);
    store
        .set_last_update(&kind.storage_key(), &stamp)
        .await
        .unwrap();
}

#[tokio::test]
async fn missing_record_means_stale() {
    let (_transport, _store, _notifier, scheduler) = scheduler_fixture();
    assert!(
        scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
}

#[tokio::test]
async fn recent_record_means_fresh() {
    let (_transport, store, _notifier, scheduler) = scheduler_fixture();
    record_age(&store, IndexKind::Platform, Duration::hours(1)).await;
    assert!(
        !scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
}

#[tokio::test]
async fn record_older_than_the_threshold_means_stale() {
    let (_transport, store, _notifier, scheduler) = scheduler_fixture();
    record_age(
        &store,
        IndexKind::Platform,
        Duration::hours(4) + Duration::seconds(1),
    )
    .await;
    assert!(
        scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
}

#[tokio::test]
async fn force_wins_over_a_fresh_record() {
    let (_transport, store, _notifier, scheduler) = scheduler_fixture();
    record_age(&store, IndexKind::Platform, Duration::minutes(5)).await;
    assert!(
        scheduler
            .needs_update(IndexKind::Platform, Utc::now(), true)
            .await
    );
}

#[tokio::test]
async fn unparsable_record_means_stale() {
    let (_transport, store, _notifier, scheduler) = scheduler_fixture();
    store
        .set_last_update(&IndexKind::Platform.storage_key(), "four hours ago")
        .await
        .unwrap();
    assert!(
        scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
}

#[tokio::test]
async fn stale_types_share_a_single_update_call() {
    let (transport, store, _notifier, scheduler) = scheduler_fixture();
    record_age(&store, IndexKind::Library, Duration::minutes(10)).await;

    let updated = scheduler
        .update_indexes(&IndexKind::ALL, false)
        .await
        .unwrap();

    assert_eq!(updated, vec![IndexKind::Platform]);
    let requests = transport.update_index_requests.lock().unwrap().clone();
    assert_eq!(requests, vec![vec!["platform".to_string()]]);
    assert_eq!(scheduler.state(IndexKind::Platform).await, IndexState::UpToDate);
    assert_eq!(scheduler.state(IndexKind::Library).await, IndexState::UpToDate);
}

#[tokio::test]
async fn force_refreshes_every_requested_type_at_once() {
    let (transport, store, _notifier, scheduler) = scheduler_fixture();
    record_age(&store, IndexKind::Platform, Duration::minutes(1)).await;
    record_age(&store, IndexKind::Library, Duration::minutes(1)).await;

    let updated = scheduler
        .update_indexes(&IndexKind::ALL, true)
        .await
        .unwrap();

    assert_eq!(updated, vec![IndexKind::Platform, IndexKind::Library]);
    let requests = transport.update_index_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![vec!["platform".to_string(), "library".to_string()]]
    );
}

#[tokio::test]
async fn successful_update_persists_a_fresh_timestamp() {
    let (_transport, store, notifier, scheduler) = scheduler_fixture();
    let mut events = notifier.index_updated.subscribe();

    scheduler
        .update_indexes(&[IndexKind::Platform], false)
        .await
        .unwrap();

    let stamp = store
        .last_update(&IndexKind::Platform.storage_key())
        .await
        .unwrap();
    chrono::DateTime::parse_from_rfc3339(&stamp).unwrap();
    assert!(
        !scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
    assert_eq!(events.try_recv().unwrap().kind, IndexKind::Platform);
}

#[tokio::test]
async fn failed_update_marks_the_type_failed() {
    let (transport, store, _notifier, scheduler) = scheduler_fixture();
    transport.push_update_index(Script::Finite(vec![Err(Status::unavailable(
        "downloads.arduino.cc unreachable",
    ))]));

    scheduler
        .update_indexes(&[IndexKind::Platform], false)
        .await
        .unwrap_err();

    assert_eq!(scheduler.state(IndexKind::Platform).await, IndexState::Failed);
    assert!(store
        .last_update(&IndexKind::Platform.storage_key())
        .await
        .is_none());
}

#[tokio::test]
async fn daemon_summary_is_absorbed_without_a_new_run() {
    let (transport, store, _notifier, scheduler) = scheduler_fixture();
    let stamp = scb_util::rfc3339_now();
    transport.set_summary(&[("library", &stamp)]);

    let absorbed = scheduler.absorb_summary().await.unwrap();

    assert_eq!(absorbed, vec![IndexKind::Library]);
    assert!(transport.update_index_requests.lock().unwrap().is_empty());
    assert_eq!(
        store.last_update(&IndexKind::Library.storage_key()).await,
        Some(stamp)
    );
    assert!(
        !scheduler
            .needs_update(IndexKind::Library, Utc::now(), false)
            .await
    );
}

#[tokio::test]
async fn unknown_summary_types_are_skipped() {
    let (transport, _store, _notifier, scheduler) = scheduler_fixture();
    transport.set_summary(&[("boards", &scb_util::rfc3339_now())]);

    let absorbed = scheduler.absorb_summary().await.unwrap();
    assert!(absorbed.is_empty());
}

#[tokio::test]
async fn out_of_band_updates_reset_staleness() {
    let (transport, _store, notifier, scheduler) = scheduler_fixture();
    let mut events = notifier.index_updated.subscribe();

    scheduler
        .mark_updated(&[IndexKind::Platform], Utc::now())
        .await
        .unwrap();

    assert!(transport.update_index_requests.lock().unwrap().is_empty());
    assert!(
        !scheduler
            .needs_update(IndexKind::Platform, Utc::now(), false)
            .await
    );
    assert_eq!(events.try_recv().unwrap().kind, IndexKind::Platform);
}
