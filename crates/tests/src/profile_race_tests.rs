use backend::AuthEvent;
use pretty_assertions::assert_eq;
use shared_types::{Role, SessionSnapshot};

use crate::common;

#[tokio::test]
async fn test_slow_fetch_for_previous_user_is_discarded() {
    let (backend, service) = common::demo_service();
    service.restore().await;
    let citizen = common::demo_identity(&backend, common::CITIZEN);
    let secretary = common::demo_identity(&backend, common::SECRETARY);
    let release = backend.hold_profile_fetch(&citizen.id);

    futures::join!(
        service.apply_auth_event(AuthEvent::SignedIn(citizen)),
        async {
            service.apply_auth_event(AuthEvent::SignedIn(secretary)).await;
            let _ = release.send(());
        }
    );

    let snapshot = service.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.role(), Some(Role::Secretary));
    assert_eq!(
        snapshot.identity.map(|i| i.email),
        Some(common::SECRETARY.to_string())
    );
}

#[tokio::test]
async fn test_fetch_finishing_after_sign_out_does_not_resurrect_profile() {
    let (backend, service) = common::demo_service();
    service.restore().await;
    let citizen = common::demo_identity(&backend, common::CITIZEN);
    let release = backend.hold_profile_fetch(&citizen.id);

    futures::join!(
        service.apply_auth_event(AuthEvent::SignedIn(citizen)),
        async {
            service.apply_auth_event(AuthEvent::SignedOut).await;
            let _ = release.send(());
        }
    );

    assert_eq!(service.snapshot(), SessionSnapshot::signed_out());
}

#[tokio::test]
async fn test_new_user_is_loading_until_profile_arrives() {
    let (backend, service) = common::signed_in_as(common::CITIZEN).await;
    let head = common::demo_identity(&backend, common::VILLAGE_HEAD);
    let release = backend.hold_profile_fetch(&head.id);

    futures::join!(service.apply_auth_event(AuthEvent::SignedIn(head)), async {
        let snapshot = service.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.profile, None);
        let _ = release.send(());
    });

    assert_eq!(service.snapshot().role(), Some(Role::VillageHead));
}

#[tokio::test]
async fn test_token_refresh_keeps_profile_visible() {
    let (backend, service) = common::signed_in_as(common::SECRETARY).await;
    let secretary = common::demo_identity(&backend, common::SECRETARY);
    let release = backend.hold_profile_fetch(&secretary.id);

    futures::join!(
        service.apply_auth_event(AuthEvent::TokenRefreshed(secretary)),
        async {
            let snapshot = service.snapshot();
            assert!(!snapshot.loading);
            assert_eq!(snapshot.role(), Some(Role::Secretary));
            let _ = release.send(());
        }
    );

    assert_eq!(service.snapshot().role(), Some(Role::Secretary));
}
