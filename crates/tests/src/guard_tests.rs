use pretty_assertions::assert_eq;
use shared_types::routes::{self, access_for_path};
use shared_types::{evaluate, GuardDecision, SessionSnapshot};

use crate::common;

fn decide(snapshot: &SessionSnapshot, path: &str) -> GuardDecision {
    evaluate(snapshot, &access_for_path(path), path)
}

#[tokio::test]
async fn test_protected_route_waits_while_session_loads() {
    let (_backend, service) = common::demo_service();
    assert_eq!(
        decide(&service.snapshot(), routes::DASHBOARD_CITIZEN),
        GuardDecision::Placeholder
    );
    assert_eq!(decide(&service.snapshot(), routes::HOME), GuardDecision::Render);
}

#[tokio::test]
async fn test_signed_out_visitor_is_sent_to_login_with_return_path() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    let decision = decide(&service.snapshot(), routes::COMPLAINT_NEW);

    assert_eq!(
        decision,
        GuardDecision::RedirectToLogin {
            from: routes::COMPLAINT_NEW.to_string()
        }
    );
    assert_eq!(
        decision.redirect_path().as_deref(),
        Some("/login?redirect=%2Fcomplaint%2Fnew")
    );
}

#[tokio::test]
async fn test_after_sign_out_dashboard_redirects_to_login() {
    let (_backend, service) = common::signed_in_as(common::CITIZEN).await;
    assert_eq!(
        decide(&service.snapshot(), routes::DASHBOARD_CITIZEN),
        GuardDecision::Render
    );

    service.sign_out().await;

    assert!(matches!(
        decide(&service.snapshot(), routes::DASHBOARD_CITIZEN),
        GuardDecision::RedirectToLogin { .. }
    ));
}

#[tokio::test]
async fn test_wrong_role_is_sent_to_unauthorized() {
    let (_backend, service) = common::signed_in_as(common::SECRETARY).await;
    let snapshot = service.snapshot();

    for path in [
        routes::DASHBOARD_CITIZEN,
        routes::DASHBOARD_VILLAGE_HEAD,
        routes::DASHBOARD_SUPER_ADMIN,
        routes::COMPLAINT_NEW,
    ] {
        let decision = decide(&snapshot, path);
        assert_eq!(decision, GuardDecision::RedirectToUnauthorized, "{path}");
        assert_eq!(decision.redirect_path().as_deref(), Some(routes::UNAUTHORIZED));
    }
    assert_eq!(decide(&snapshot, routes::DASHBOARD_SECRETARY), GuardDecision::Render);
}

#[tokio::test]
async fn test_super_admin_opens_every_protected_route() {
    let (_backend, service) = common::signed_in_as(common::SUPER_ADMIN).await;
    let snapshot = service.snapshot();

    for (path, _) in routes::ROUTE_TABLE {
        assert_eq!(decide(&snapshot, path), GuardDecision::Render, "{path}");
    }
}

#[tokio::test]
async fn test_missing_profile_is_unauthorized_not_login() {
    let (backend, service) = common::demo_service();
    backend.seed_session("demo-citizen");
    backend.fail_profile_fetch("demo-citizen");
    service.restore().await;

    assert_eq!(
        decide(&service.snapshot(), routes::DASHBOARD_CITIZEN),
        GuardDecision::RedirectToUnauthorized
    );
}

#[tokio::test]
async fn test_unknown_paths_skip_the_guard() {
    let (_backend, service) = common::demo_service();
    service.restore().await;

    assert_eq!(decide(&service.snapshot(), "/dashboard/treasurer"), GuardDecision::Render);
}

#[tokio::test]
async fn test_query_and_trailing_slash_do_not_bypass_the_guard() {
    let (_backend, service) = common::demo_service();
    service.restore().await;
    let snapshot = service.snapshot();

    assert!(matches!(
        decide(&snapshot, "/dashboard/super-admin/"),
        GuardDecision::RedirectToLogin { .. }
    ));
    assert!(matches!(
        decide(&snapshot, "/dashboard/secretary?tab=queue"),
        GuardDecision::RedirectToLogin { .. }
    ));
}
