use pretty_assertions::assert_eq;
use shared_types::{NoticeLevel, Role, SessionSnapshot};

use crate::common;

#[tokio::test]
async fn test_snapshot_is_loading_before_restore() {
    let (_backend, service) = common::demo_service();
    assert_eq!(service.snapshot(), SessionSnapshot::loading());
}

#[tokio::test]
async fn test_restore_without_session_is_signed_out() {
    let (_backend, service) = common::demo_service();
    let outcome = service.restore().await;

    assert_eq!(outcome.navigate, None);
    assert_eq!(outcome.notice, None);
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_restore_with_persisted_session_loads_profile() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-secretary");

    service.restore().await;

    let snapshot = service.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.identity.as_ref().map(|i| i.email.as_str()),
        Some(common::SECRETARY)
    );
    assert_eq!(snapshot.role(), Some(Role::Secretary));
    assert_eq!(snapshot.display_name(), "Raden Ayu");
}

#[tokio::test]
async fn test_restore_when_offline_resolves_with_error_notice() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-citizen");
    backend.set_offline(true);

    let outcome = service.restore().await;

    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Error));
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_restore_with_failing_profile_keeps_identity_without_profile() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-village-head");
    backend.fail_profile_fetch("demo-village-head");

    let outcome = service.restore().await;

    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Error));
    let snapshot = service.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.profile, None);
}

#[tokio::test]
async fn test_unrecognized_stored_role_restores_as_citizen() {
    let (backend, service) = common::demo_service();
    let id = backend.add_account("treasurer@example.com", "secret99", "Bendahara", Some("treasurer"));
    backend.seed_session(&id);

    service.restore().await;

    assert_eq!(service.snapshot().role(), Some(Role::Citizen));
}
