pub mod complaint_new;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod unauthorized;
pub mod verification_sent;
pub mod verify_email;

use crate::auth::use_auth;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::notify::use_notifier;
use backend::SessionCommand;
use complaint_new::ComplaintNew;
use dashboard::citizen::CitizenDashboard;
use dashboard::secretary::SecretaryDashboard;
use dashboard::super_admin::SuperAdminDashboard;
use dashboard::village_head::VillageHeadDashboard;
use dioxus::prelude::*;
use dioxus::router::Navigator;
use home::Home;
use login::Login;
use not_found::NotFound;
use register::Register;
use shared_types::access::{evaluate, GuardDecision};
use shared_types::routes::access_for_path;
use unauthorized::Unauthorized;
use verification_sent::VerificationSent;
use verify_email::VerifyEmail;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/login?:redirect")]
        Login { redirect: Option<String> },
        #[route("/register")]
        Register {},
        #[route("/verification-sent?:email")]
        VerificationSent { email: Option<String> },
        #[route("/verify-email?:token")]
        VerifyEmail { token: Option<String> },
        #[route("/unauthorized")]
        Unauthorized {},
        #[layout(Protected)]
            #[route("/complaint/new")]
            ComplaintNew {},
            #[route("/dashboard/citizen")]
            CitizenDashboard {},
            #[route("/dashboard/secretary")]
            SecretaryDashboard {},
            #[route("/dashboard/village-head")]
            VillageHeadDashboard {},
            #[route("/dashboard/super-admin")]
            SuperAdminDashboard {},
        #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Resolve an application path (as produced by `shared_types::routes`) to a route.
pub fn route_for(path: &str) -> Option<Route> {
    match path.parse::<Route>() {
        Ok(route) => Some(route),
        Err(e) => {
            tracing::warn!(path, error = %e, "path does not match any route");
            None
        }
    }
}

pub fn push_path(nav: Navigator, path: &str) {
    if let Some(route) = route_for(path) {
        nav.push(route);
    }
}

pub fn replace_path(nav: Navigator, path: &str) {
    if let Some(route) = route_for(path) {
        nav.replace(route);
    }
}

/// Root layout: runs the session loop for as long as the router is mounted.
///
/// Outcomes from the loop are applied here: notices go to the toast stack,
/// navigation goes through the router.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let mut notifier = use_notifier();
    let nav = navigator();
    let mut busy = auth.busy;

    use_coroutine(move |commands: UnboundedReceiver<SessionCommand>| async move {
        let service = auth.service();
        let events = service.init();
        service
            .run(events, commands, |outcome| {
                if let Some(path) = outcome.navigate {
                    push_path(nav, &path);
                }
                if let Some(notice) = outcome.notice {
                    notifier.push(notice);
                }
                busy.set(false);
            })
            .await;
    });

    rsx! {
        div { class: "app-shell",
            Header {}
            main { class: "app-main",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

/// Guard layout for role-gated routes. Re-evaluated whenever the session or
/// the current route changes.
#[component]
fn Protected() -> Element {
    let auth = use_auth();
    let route: Route = use_route();
    let path = route.to_string();
    let decision = evaluate(&auth.session.read(), &access_for_path(&path), &path);

    match decision {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::Placeholder => rsx! {
            div { class: "guard-loading",
                div { class: "spinner" }
                p { "Memuat..." }
            }
        },
        redirect => {
            if let Some(target) = redirect.redirect_path() {
                tracing::debug!(from = %path, to = %target, "guard redirect");
                replace_path(navigator(), &target);
            }
            rsx! {
                div { class: "guard-loading",
                    p { "Mengalihkan..." }
                }
            }
        }
    }
}
