use backend::DEMO_PASSWORD;
use pretty_assertions::assert_eq;
use shared_types::routes;
use shared_types::{NoticeLevel, Role};

use crate::common;

#[tokio::test]
async fn test_each_role_lands_on_its_dashboard() {
    for (email, expected, role) in [
        (common::CITIZEN, routes::DASHBOARD_CITIZEN, Role::Citizen),
        (common::SECRETARY, routes::DASHBOARD_SECRETARY, Role::Secretary),
        (common::VILLAGE_HEAD, routes::DASHBOARD_VILLAGE_HEAD, Role::VillageHead),
        (common::SUPER_ADMIN, routes::DASHBOARD_SUPER_ADMIN, Role::SuperAdmin),
    ] {
        let (_backend, service) = common::demo_service();
        service.restore().await;

        let outcome = service.sign_in(email, DEMO_PASSWORD, None).await;

        assert_eq!(outcome.navigate.as_deref(), Some(expected), "{email}");
        let notice = outcome.notice.expect("sign in notice");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.title, "Login berhasil!");
        assert_eq!(service.snapshot().role(), Some(role));
    }
}

#[tokio::test]
async fn test_invalid_credentials_show_localized_error() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service.sign_in(common::CITIZEN, "not-the-password", None).await;

    assert_eq!(outcome.navigate, None);
    let notice = outcome.notice.expect("error notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Login gagal");
    assert_eq!(
        notice.description.as_deref(),
        Some("Email atau kata sandi salah. Silakan coba lagi.")
    );
    assert!(!service.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_unknown_email_is_treated_as_invalid_credentials() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service.sign_in("nobody@example.com", DEMO_PASSWORD, None).await;

    assert_eq!(
        outcome.notice.and_then(|n| n.description),
        Some("Email atau kata sandi salah. Silakan coba lagi.".to_string())
    );
}

#[tokio::test]
async fn test_guard_recorded_redirect_is_honored_for_allowed_role() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service
        .sign_in(common::CITIZEN, DEMO_PASSWORD, Some(routes::COMPLAINT_NEW))
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::COMPLAINT_NEW));
}

#[tokio::test]
async fn test_encoded_redirect_is_decoded() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service
        .sign_in(common::SUPER_ADMIN, DEMO_PASSWORD, Some("%2Fdashboard%2Fsecretary"))
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_SECRETARY));
}

#[tokio::test]
async fn test_redirect_outside_role_falls_back_to_dashboard() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service
        .sign_in(common::SECRETARY, DEMO_PASSWORD, Some(routes::DASHBOARD_SUPER_ADMIN))
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_SECRETARY));
}

#[tokio::test]
async fn test_public_or_unknown_redirect_is_ignored() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let outcome = service
        .sign_in(common::VILLAGE_HEAD, DEMO_PASSWORD, Some("https://evil.example.com/"))
        .await;
    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_VILLAGE_HEAD));

    let outcome = service
        .sign_in(common::VILLAGE_HEAD, DEMO_PASSWORD, Some(routes::REGISTER))
        .await;
    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_VILLAGE_HEAD));
}

#[tokio::test]
async fn test_unverified_account_cannot_sign_in() {
    let (backend, service) = common::demo_service();
    service.restore().await;
    service
        .sign_up(&shared_types::SignUpRequest {
            email: "baru@example.com".into(),
            password: "rahasia1".into(),
            display_name: "Warga Baru".into(),
        })
        .await;
    assert!(backend.verification_token_for("baru@example.com").is_some());

    let outcome = service.sign_in("baru@example.com", "rahasia1", None).await;

    assert_eq!(outcome.navigate, None);
    assert_eq!(
        outcome.notice.and_then(|n| n.description),
        Some("Email Anda belum diverifikasi. Silakan periksa kotak masuk Anda.".to_string())
    );
}

#[tokio::test]
async fn test_failed_role_lookup_still_signs_in_to_citizen_dashboard() {
    let (backend, service) = common::demo_service();
    service.restore().await;
    backend.fail_role_fetch("demo-secretary");

    let outcome = service.sign_in(common::SECRETARY, DEMO_PASSWORD, None).await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_CITIZEN));
    assert_eq!(service.snapshot().role(), Some(Role::Secretary));
}

#[tokio::test]
async fn test_profile_failure_on_sign_in_downgrades_notice() {
    let (backend, service) = common::demo_service();
    service.restore().await;
    backend.fail_profile_fetch("demo-citizen");

    let outcome = service.sign_in(common::CITIZEN, DEMO_PASSWORD, None).await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_CITIZEN));
    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Info));
    let snapshot = service.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.profile, None);
}
