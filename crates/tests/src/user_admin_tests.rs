use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, Role};

use crate::common;

#[tokio::test]
async fn test_list_users_returns_every_seeded_account() {
    let (_backend, service) = common::signed_in_as(common::SUPER_ADMIN).await;

    let users = service.list_users().await.expect("list users");

    assert_eq!(users.len(), 4);
    let secretary = users
        .iter()
        .find(|u| u.id == "demo-secretary")
        .expect("secretary row");
    assert_eq!(secretary.role, Role::Secretary);
    assert_eq!(secretary.name, "Raden Ayu");
}

#[tokio::test]
async fn test_super_admin_promotes_citizen() {
    let (_backend, service) = common::signed_in_as(common::SUPER_ADMIN).await;

    service
        .update_user_role("demo-citizen", Role::Secretary)
        .await
        .expect("role update");

    let users = service.list_users().await.expect("list users");
    let promoted = users.iter().find(|u| u.id == "demo-citizen").expect("citizen row");
    assert_eq!(promoted.role, Role::Secretary);

    // The promoted user now lands on the secretary dashboard.
    service.sign_out().await;
    let outcome = service
        .sign_in(common::CITIZEN, backend::DEMO_PASSWORD, None)
        .await;
    assert_eq!(outcome.navigate.as_deref(), Some(shared_types::routes::DASHBOARD_SECRETARY));
}

#[tokio::test]
async fn test_other_roles_cannot_change_roles() {
    for email in [common::CITIZEN, common::SECRETARY, common::VILLAGE_HEAD] {
        let (_backend, service) = common::signed_in_as(email).await;

        let err = service
            .update_user_role("demo-citizen", Role::SuperAdmin)
            .await
            .unwrap_err();

        assert_eq!(err.kind, AppErrorKind::Forbidden, "{email}");
    }
}

#[tokio::test]
async fn test_signed_out_cannot_change_roles() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let err = service
        .update_user_role("demo-citizen", Role::Secretary)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

#[tokio::test]
async fn test_changing_own_role_refreshes_profile() {
    let (_backend, service) = common::signed_in_as(common::SUPER_ADMIN).await;

    service
        .update_user_role("demo-super-admin", Role::VillageHead)
        .await
        .expect("role update");

    assert_eq!(service.snapshot().role(), Some(Role::VillageHead));
}

#[tokio::test]
async fn test_list_users_while_offline_is_a_network_error() {
    let (backend, service) = common::signed_in_as(common::SUPER_ADMIN).await;
    backend.set_offline(true);

    let err = service.list_users().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Network);
}
