use crate::auth::{use_auth, use_role};
use crate::components::dashboard_route;
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLock;
use dioxus_free_icons::Icon;
use shared_types::routes::dashboard_for;

/// Where the guard sends a signed-in user whose role does not cover the page.
#[component]
pub fn Unauthorized() -> Element {
    let auth = use_auth();
    let role = use_role();

    rsx! {
        div { class: "status-page",
            div { class: "status-card",
                div { class: "status-icon status-icon-error",
                    Icon::<LdLock> { icon: LdLock, width: 40, height: 40 }
                }
                h1 { class: "status-title", "Akses Ditolak" }
                match role {
                    Some(role) => rsx! {
                        p { class: "status-message",
                            "Halaman ini tidak tersedia untuk peran "
                            strong { "{role.label()}" }
                            "."
                        }
                        Link { to: dashboard_route(dashboard_for(Some(role))), class: "button button-primary",
                            "Kembali ke Dashboard"
                        }
                    },
                    None if auth.is_authenticated() => rsx! {
                        p { class: "status-message",
                            "Profil Anda belum dapat dimuat, sehingga hak akses tidak dapat diperiksa. Silakan masuk kembali."
                        }
                        Link { to: Route::Login { redirect: None }, class: "button button-primary", "Masuk" }
                    },
                    None => rsx! {
                        p { class: "status-message", "Anda tidak memiliki izin untuk membuka halaman ini." }
                        Link { to: Route::Home {}, class: "button button-primary", "Ke Beranda" }
                    },
                }
            }
        }
    }
}
