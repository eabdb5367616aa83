use crate::auth::use_auth;
use crate::format_helpers::initials;
use crate::routes::Route;
use backend::SessionCommand;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdLayoutDashboard, LdLock, LdScale};
use dioxus_free_icons::Icon;
use shared_types::routes::{dashboard_for, COMPLAINT_NEW};

use super::{dashboard_route, may_open};

/// Top navigation bar; contents depend on the session.
#[component]
pub fn Header() -> Element {
    let mut auth = use_auth();
    let route: Route = use_route();
    let snapshot = auth.session.read().clone();
    let busy = *auth.busy.read();

    let can_report = may_open(&snapshot, COMPLAINT_NEW);
    let dashboard = dashboard_route(dashboard_for(snapshot.role()));
    let name = snapshot.display_name();

    rsx! {
        header { class: "app-header",
            Link { to: Route::Home {}, class: "brand",
                Icon::<LdScale> { icon: LdScale, width: 22, height: 22 }
                span { class: "brand-name", "Lapor Desa" }
            }

            nav { class: "header-nav",
                if snapshot.loading {
                    span { class: "header-muted", "Memuat..." }
                } else if snapshot.is_authenticated() {
                    if snapshot.profile.is_some() {
                        Link {
                            to: dashboard.clone(),
                            class: if route == dashboard { "nav-link active" } else { "nav-link" },
                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
                            "Dashboard"
                        }
                    }
                    if can_report {
                        Link {
                            to: Route::ComplaintNew {},
                            class: if matches!(route, Route::ComplaintNew {}) { "nav-link active" } else { "nav-link" },
                            Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 }
                            "Buat Laporan"
                        }
                    }
                    div { class: "header-user",
                        span { class: "avatar", "{initials(&name)}" }
                        div { class: "header-user-text",
                            span { class: "header-user-name", "{name}" }
                            if let Some(role) = snapshot.role() {
                                span { class: "header-user-role", "{role.label()}" }
                            }
                        }
                    }
                    button {
                        class: "button button-ghost",
                        disabled: busy,
                        onclick: move |_| auth.send(SessionCommand::SignOut),
                        Icon::<LdLock> { icon: LdLock, width: 16, height: 16 }
                        "Keluar"
                    }
                } else {
                    Link { to: Route::Login { redirect: None }, class: "nav-link", "Masuk" }
                    Link { to: Route::Register {}, class: "button button-primary", "Daftar" }
                }
            }
        }
    }
}
