use crate::auth::use_auth;
use crate::routes::Route;
use chrono::{Datelike, Utc};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMail, LdMapPin, LdPhone, LdScale};
use dioxus_free_icons::Icon;
use shared_types::routes::{dashboard_for, COMPLAINT_NEW};
use shared_types::SessionSnapshot;

use super::{dashboard_route, may_open};

pub const CONTACT_EMAIL: &str = "kontak@lapordesa.id";
pub const CONTACT_PHONE: &str = "+62 123 4567 890";

pub fn copyright_line(year: i32) -> String {
    format!("© {year} Lapor Desa. Hak cipta dilindungi.")
}

/// Quick links for the current session, in display order.
pub fn quick_links(snapshot: &SessionSnapshot) -> Vec<(&'static str, Route)> {
    let mut links = vec![("Beranda", Route::Home {})];
    if snapshot.loading {
        return links;
    }
    if snapshot.is_authenticated() {
        if snapshot.profile.is_some() {
            links.push(("Dashboard", dashboard_route(dashboard_for(snapshot.role()))));
        }
        if may_open(snapshot, COMPLAINT_NEW) {
            links.push(("Buat Laporan", Route::ComplaintNew {}));
        }
    } else {
        links.push(("Masuk", Route::Login { redirect: None }));
        links.push(("Daftar", Route::Register {}));
    }
    links
}

#[component]
pub fn Footer() -> Element {
    let auth = use_auth();
    let links = quick_links(&auth.session.read());
    let copyright = copyright_line(Utc::now().year());

    rsx! {
        footer { class: "app-footer",
            div { class: "footer-grid",
                div { class: "footer-brand",
                    Link { to: Route::Home {}, class: "brand",
                        Icon::<LdScale> { icon: LdScale, width: 20, height: 20 }
                        span { class: "brand-name", "Lapor Desa" }
                    }
                    p { class: "footer-text",
                        "Menghubungkan warga dan pemerintah desa untuk penanganan pengaduan yang cepat dan transparan."
                    }
                }
                div { class: "footer-section",
                    h3 { class: "footer-heading", "Tautan Cepat" }
                    ul { class: "footer-links",
                        for (label, route) in links {
                            li { key: "{label}",
                                Link { to: route, class: "footer-link", "{label}" }
                            }
                        }
                    }
                }
                div { class: "footer-section",
                    h3 { class: "footer-heading", "Hubungi Kami" }
                    ul { class: "footer-links",
                        li { class: "footer-contact",
                            Icon::<LdMail> { icon: LdMail, width: 16, height: 16 }
                            a { href: "mailto:{CONTACT_EMAIL}", class: "footer-link", "{CONTACT_EMAIL}" }
                        }
                        li { class: "footer-contact",
                            Icon::<LdPhone> { icon: LdPhone, width: 16, height: 16 }
                            span { "{CONTACT_PHONE}" }
                        }
                        li { class: "footer-contact",
                            Icon::<LdMapPin> { icon: LdMapPin, width: 16, height: 16 }
                            span { "Kantor Desa, Jl. Raya Desa No. 1" }
                        }
                    }
                }
            }
            p { class: "footer-copyright", "{copyright}" }
        }
    }
}
