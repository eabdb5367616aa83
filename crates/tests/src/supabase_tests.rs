use backend::{AuthBackend, AuthEvent, SessionService, SupabaseBackend};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use shared_types::{routes, BackendConfig, BackendMode, NoticeLevel, Role, SessionSnapshot};
use std::sync::Arc;

use crate::common::{self, MockSupabase, MockUser};

fn village() -> Vec<MockUser> {
    vec![
        MockUser::new("u-citizen", common::CITIZEN, Some("citizen")),
        MockUser::new("u-secretary", common::SECRETARY, Some("secretary")),
        MockUser::new("u-admin", common::SUPER_ADMIN, Some("super_admin")),
        MockUser::new("u-new", "baru@example.com", Some("citizen")).unverified(),
        MockUser::new("u-treasurer", "treasurer@example.com", Some("treasurer")),
        MockUser::new("u-norole", "norole@example.com", None),
    ]
}

async fn service() -> (MockSupabase, SessionService) {
    let mock = MockSupabase::start(village()).await;
    let service = SessionService::new(Arc::new(mock.backend()));
    (mock, service)
}

#[tokio::test]
async fn test_password_sign_in_fetches_profile_and_role() {
    let (mock, service) = service().await;
    service.restore().await;

    let outcome = service
        .sign_in(common::SECRETARY, backend::DEMO_PASSWORD, None)
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_SECRETARY));
    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Success));
    let snapshot = service.snapshot();
    assert_eq!(snapshot.role(), Some(Role::Secretary));
    assert_eq!(snapshot.display_name(), "Mock u-secretary");
    assert_eq!(
        mock.requests(),
        vec![
            "POST /auth/v1/token?grant_type=password".to_string(),
            "GET /rest/v1/profiles?id=eq.u-secretary&select=*".to_string(),
            "GET /rest/v1/user_roles?select=role&user_id=eq.u-secretary".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_profile_extra_columns_are_kept() {
    let (_mock, service) = service().await;
    service.restore().await;

    service.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;

    let profile = service.snapshot().profile.expect("profile");
    assert_eq!(profile.extra.get("village"), Some(&serde_json::json!("Sukamaju")));
}

#[tokio::test]
async fn test_gotrue_invalid_credentials_are_classified() {
    let (_mock, service) = service().await;
    service.restore().await;

    let outcome = service.sign_in(common::CITIZEN, "wrong-password", None).await;

    assert_eq!(outcome.navigate, None);
    assert_eq!(
        outcome.notice.and_then(|n| n.description),
        Some("Email atau kata sandi salah. Silakan coba lagi.".to_string())
    );
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_gotrue_unconfirmed_email_is_classified() {
    let (_mock, service) = service().await;
    service.restore().await;

    let outcome = service
        .sign_in("baru@example.com", backend::DEMO_PASSWORD, None)
        .await;

    assert_eq!(
        outcome.notice.and_then(|n| n.description),
        Some("Email Anda belum diverifikasi. Silakan periksa kotak masuk Anda.".to_string())
    );
}

#[tokio::test]
async fn test_unrecognized_role_string_is_narrowed_to_citizen() {
    let (_mock, service) = service().await;
    service.restore().await;

    let outcome = service
        .sign_in("treasurer@example.com", backend::DEMO_PASSWORD, None)
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_CITIZEN));
    assert_eq!(service.snapshot().role(), Some(Role::Citizen));
}

#[tokio::test]
async fn test_missing_role_row_lands_on_citizen_dashboard() {
    let (mock, service) = service().await;
    service.restore().await;

    let outcome = service
        .sign_in("norole@example.com", backend::DEMO_PASSWORD, None)
        .await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::DASHBOARD_CITIZEN));
    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Success));
    assert_eq!(mock.role_of("u-norole"), None);
}

#[tokio::test]
async fn test_restore_without_token_makes_no_request() {
    let (mock, service) = service().await;

    service.restore().await;

    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_held_token_is_checked_against_user_endpoint() {
    let mock = MockSupabase::start(village()).await;
    let supabase = mock.backend();
    supabase
        .sign_in_with_password(common::CITIZEN, backend::DEMO_PASSWORD)
        .await
        .expect("sign in");

    let identity = supabase.get_session().await.expect("get session");

    assert_eq!(identity.map(|i| i.id), Some("u-citizen".to_string()));
    assert!(mock.requests().contains(&"GET /auth/v1/user".to_string()));
}

#[tokio::test]
async fn test_password_sign_in_emits_signed_in_event() {
    let mock = MockSupabase::start(village()).await;
    let supabase = mock.backend();
    let mut events = supabase.subscribe();

    supabase
        .sign_in_with_password(common::CITIZEN, backend::DEMO_PASSWORD)
        .await
        .expect("sign in");

    match events.next().await {
        Some(AuthEvent::SignedIn(identity)) => {
            assert_eq!(identity.id, "u-citizen");
            assert!(identity.email_verified);
        }
        other => panic!("expected SignedIn, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_out_calls_logout_and_clears_session() {
    let (mock, service) = service().await;
    service.restore().await;
    service.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;

    let outcome = service.sign_out().await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::LOGIN));
    assert_eq!(outcome.notice.map(|n| n.level), Some(NoticeLevel::Success));
    assert!(mock.requests().contains(&"POST /auth/v1/logout".to_string()));
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_failed_logout_still_clears_session() {
    let (mock, service) = service().await;
    service.restore().await;
    service.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;
    mock.fail_logout(500);

    let outcome = service.sign_out().await;

    assert_eq!(outcome.navigate.as_deref(), Some(routes::LOGIN));
    assert_eq!(outcome.notice.map(|n| n.title), Some("Logout gagal".to_string()));
    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_super_admin_role_update_upserts_role_row() {
    let (mock, service) = service().await;
    service.restore().await;
    service
        .sign_in(common::SUPER_ADMIN, backend::DEMO_PASSWORD, None)
        .await;

    service
        .update_user_role("u-citizen", Role::VillageHead)
        .await
        .expect("role update");

    assert_eq!(mock.role_of("u-citizen").as_deref(), Some("village_head"));
    assert!(mock
        .requests()
        .contains(&"POST /rest/v1/user_roles?on_conflict=user_id".to_string()));
}

#[tokio::test]
async fn test_list_users_reads_profiles_table() {
    let (_mock, service) = service().await;
    service.restore().await;
    service
        .sign_in(common::SUPER_ADMIN, backend::DEMO_PASSWORD, None)
        .await;

    let users = service.list_users().await.expect("list users");

    assert_eq!(users.len(), village().len());
    let newcomer = users.iter().find(|u| u.id == "u-new").expect("unverified row");
    assert_eq!(newcomer.email, "baru@example.com");
    assert!(!newcomer.verified);
    let treasurer = users.iter().find(|u| u.id == "u-treasurer").expect("treasurer row");
    assert_eq!(treasurer.role, Role::Citizen);
}

#[tokio::test]
async fn test_unreachable_project_is_a_network_error() {
    common::init_tracing();
    let config = BackendConfig {
        mode: BackendMode::Supabase,
        url: "http://127.0.0.1:1".into(),
        anon_key: "anon-test-key".into(),
        request_timeout_secs: 2,
    };
    let supabase = SupabaseBackend::new(&config).expect("backend");
    let service = SessionService::new(Arc::new(supabase));
    service.restore().await;

    let outcome = service.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;

    assert_eq!(
        outcome.notice.and_then(|n| n.description),
        Some("Gagal terhubung dengan sistem. Silakan coba lagi.".to_string())
    );
}
