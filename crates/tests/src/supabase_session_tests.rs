use backend::{AuthBackend, AuthEvent, MemoryStorage, SessionService, StoredSession};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use shared_types::{Role, SessionSnapshot};
use std::sync::Arc;

use crate::common::{self, MockSupabase, MockUser};

/// 2100-01-01, comfortably past any test run.
const FAR_FUTURE: i64 = 4_102_444_800;
const REFRESH_GRANT: &str = "POST /auth/v1/token?grant_type=refresh_token";

fn village() -> Vec<MockUser> {
    vec![
        MockUser::new("u-citizen", common::CITIZEN, Some("citizen")),
        MockUser::new("u-secretary", common::SECRETARY, Some("secretary")),
        MockUser::new("u-admin", common::SUPER_ADMIN, Some("super_admin")),
    ]
}

fn stored(access_token: &str, refresh_token: &str, expires_at: i64) -> StoredSession {
    StoredSession {
        access_token: access_token.to_string(),
        refresh_token: Some(refresh_token.to_string()),
        expires_at: Some(expires_at),
    }
}

#[tokio::test]
async fn test_session_survives_reload() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::default();
    let first = SessionService::new(Arc::new(mock.backend_with(&storage)));
    first.restore().await;
    first.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;

    let saved = storage.current().expect("tokens saved on sign in");
    assert_eq!(saved.access_token, "token-u-citizen");
    assert_eq!(saved.refresh_token.as_deref(), Some("refresh-u-citizen"));
    assert!(saved.expires_at.is_some());

    let reloaded = SessionService::new(Arc::new(mock.backend_with(&storage)));
    reloaded.restore().await;

    let snapshot = reloaded.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.role(), Some(Role::Citizen));
    assert!(mock.requests().contains(&"GET /auth/v1/user".to_string()));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_on_restore() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::seeded(stored("expired-token", "refresh-u-secretary", 0));
    let supabase = mock.backend_with(&storage);
    let mut events = supabase.subscribe();

    let identity = supabase.get_session().await.expect("get session");

    assert_eq!(identity.map(|i| i.id), Some("u-secretary".to_string()));
    assert_eq!(mock.requests(), vec![REFRESH_GRANT.to_string()]);
    assert_eq!(
        storage.current().map(|s| s.access_token),
        Some("token-u-secretary".to_string())
    );
    match events.next().await {
        Some(AuthEvent::TokenRefreshed(identity)) => assert_eq!(identity.id, "u-secretary"),
        other => panic!("expected TokenRefreshed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refreshed_session_restores_role_dashboard() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::seeded(stored("expired-token", "refresh-u-secretary", 0));
    let service = SessionService::new(Arc::new(mock.backend_with(&storage)));

    service.restore().await;

    assert_eq!(service.snapshot().role(), Some(Role::Secretary));
}

#[tokio::test]
async fn test_rejected_refresh_token_ends_the_session() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::seeded(stored("expired-token", "refresh-revoked", 0));
    let service = SessionService::new(Arc::new(mock.backend_with(&storage)));

    service.restore().await;

    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
    assert_eq!(storage.current(), None);
}

#[tokio::test]
async fn test_revoked_access_token_falls_back_to_refresh() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::seeded(stored("revoked-token", "refresh-u-citizen", FAR_FUTURE));
    let supabase = mock.backend_with(&storage);

    let identity = supabase.get_session().await.expect("get session");

    assert_eq!(identity.map(|i| i.id), Some("u-citizen".to_string()));
    assert_eq!(
        mock.requests(),
        vec!["GET /auth/v1/user".to_string(), REFRESH_GRANT.to_string()]
    );
}

#[tokio::test]
async fn test_expiring_token_is_refreshed_before_data_request() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::seeded(stored("token-u-admin", "refresh-u-admin", 0));
    let supabase = mock.backend_with(&storage);

    let users = supabase.list_users().await.expect("list users");

    assert_eq!(users.len(), 3);
    assert_eq!(
        mock.requests(),
        vec![
            REFRESH_GRANT.to_string(),
            "GET /rest/v1/profiles?select=*".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sign_out_clears_stored_tokens() {
    let mock = MockSupabase::start(village()).await;
    let storage = MemoryStorage::default();
    let service = SessionService::new(Arc::new(mock.backend_with(&storage)));
    service.restore().await;
    service.sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None).await;

    service.sign_out().await;

    assert_eq!(storage.current(), None);
    let reloaded = SessionService::new(Arc::new(mock.backend_with(&storage)));
    reloaded.restore().await;
    assert_eq!(reloaded.snapshot(), SessionSnapshot::signed_out());
}
