mod common;

use common::{init_done, session_fixture, Script};
use scb_client::proto::InitResponse;
use scb_client::{ClientError, InitWarning};

#[tokio::test]
async fn ensure_instance_reuses_the_live_handle() {
    let (transport, session, _notifier) = session_fixture();

    let first = session.ensure_instance().await.unwrap();
    let second = session.ensure_instance().await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(transport.init_count(), 1);
}

#[tokio::test]
async fn destroy_is_idempotent() {
    let (transport, session, _notifier) = session_fixture();

    session.ensure_instance().await.unwrap();
    session.destroy_instance().await.unwrap();
    session.destroy_instance().await.unwrap();

    assert_eq!(transport.destroy_count(), 1);
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn rejected_destroy_keeps_the_handle_for_retry() {
    let (transport, session, _notifier) = session_fixture();
    transport.fail_next_destroy(tonic::Status::resource_exhausted("daemon busy"));

    session.ensure_instance().await.unwrap();
    session.destroy_instance().await.unwrap_err();

    // The daemon-side instance is still alive, so the local handle stays.
    assert!(session.current().await.is_some());
    session.destroy_instance().await.unwrap();
    assert!(session.current().await.is_none());
    assert_eq!(transport.destroy_count(), 2);
    assert_eq!(transport.init_count(), 1);
}

#[tokio::test]
async fn transport_failure_during_destroy_drops_the_handle() {
    let (transport, session, _notifier) = session_fixture();
    transport.fail_next_destroy(tonic::Status::unavailable("daemon gone"));

    session.ensure_instance().await.unwrap();
    let error = session.destroy_instance().await.unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)));
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn destroy_without_an_instance_is_a_no_op() {
    let (transport, session, _notifier) = session_fixture();

    session.destroy_instance().await.unwrap();

    assert_eq!(transport.destroy_count(), 0);
}

#[tokio::test]
async fn invalidate_forces_a_fresh_init() {
    let (transport, session, _notifier) = session_fixture();
    transport.push_init(Script::Finite(vec![Ok(init_done(1))]));
    transport.push_init(Script::Finite(vec![Ok(init_done(2))]));

    let first = session.ensure_instance().await.unwrap();
    session.invalidate().await;
    let second = session.ensure_instance().await.unwrap();

    assert_eq!(transport.init_count(), 2);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn init_warnings_are_published_but_not_fatal() {
    let (transport, session, notifier) = session_fixture();
    transport.push_init(Script::Finite(vec![
        Ok(InitResponse {
            platforms_index_errors: vec!["platform index corrupt".into()],
            libraries_index_error: Some("library index missing".into()),
            config_warnings: vec!["unknown key".into()],
            ..Default::default()
        }),
        Ok(init_done(7)),
    ]));
    let mut warnings = notifier.init_warnings.subscribe();

    let instance = session.ensure_instance().await.unwrap();

    assert_eq!(instance.id, 7);
    assert_eq!(
        warnings.try_recv().unwrap(),
        InitWarning::PlatformIndex("platform index corrupt".into())
    );
    assert_eq!(
        warnings.try_recv().unwrap(),
        InitWarning::LibraryIndex("library index missing".into())
    );
    assert_eq!(
        warnings.try_recv().unwrap(),
        InitWarning::Config("unknown key".into())
    );
}

#[tokio::test]
async fn init_stream_without_an_instance_fails() {
    let (transport, session, _notifier) = session_fixture();
    transport.push_init(Script::Finite(vec![Ok(InitResponse::default())]));

    let error = session.ensure_instance().await.unwrap_err();
    assert!(matches!(error, ClientError::InitIncomplete));
    assert!(session.current().await.is_none());
}
