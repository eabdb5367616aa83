use pretty_assertions::assert_eq;
use shared_types::{routes, NoticeLevel, SessionSnapshot};

use crate::common;

#[tokio::test]
async fn test_sign_out_clears_session_and_returns_to_login() {
    let (backend, service) = common::signed_in_as(common::SECRETARY).await;

    let outcome = service.sign_out().await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::LOGIN));
    let notice = outcome.notice.expect("sign out notice");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.title, "Logout berhasil");
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
    assert_eq!(backend.current_user(), None);
}

#[tokio::test]
async fn test_backend_failure_still_clears_local_session() {
    let (backend, service) = common::signed_in_as(common::CITIZEN).await;
    backend.set_offline(true);

    let outcome = service.sign_out().await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::LOGIN));
    let notice = outcome.notice.expect("sign out notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Logout gagal");
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_sign_out_when_signed_out_is_harmless() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service.sign_out().await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::LOGIN));
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_sign_in_again_after_sign_out_switches_user() {
    let (_backend, service) = common::signed_in_as(common::VILLAGE_HEAD).await;
    service.sign_out().await;

    let outcome = service
        .sign_in(common::SUPER_ADMIN, backend::DEMO_PASSWORD, None)
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_SUPER_ADMIN));
    assert_eq!(service.snapshot().display_name(), "Admin Desa");
}
