use crate::auth::use_auth;
use crate::components::stat_card::StatCard;
use crate::components::{dashboard_route, CategoryIcon};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::complaint::{mock_categories, mock_stats};
use shared_types::routes::dashboard_for;

/// Public landing page.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let snapshot = auth.session.read().clone();
    let stats = mock_stats();
    let categories = mock_categories();

    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Sampaikan Keluhan, Bangun Desa Bersama" }
            p { class: "hero-subtitle",
                "Laporkan masalah infrastruktur, layanan publik, keamanan dan lingkungan langsung ke perangkat desa, lalu pantau penanganannya."
            }
            div { class: "hero-actions",
                if snapshot.profile.is_some() {
                    Link { to: dashboard_route(dashboard_for(snapshot.role())), class: "button button-primary",
                        "Buka Dashboard"
                    }
                } else {
                    Link { to: Route::Register {}, class: "button button-primary", "Mulai Melapor" }
                    Link { to: Route::Login { redirect: None }, class: "button button-outline", "Masuk" }
                }
            }
        }

        section { class: "stat-grid",
            StatCard { label: "Total Laporan", value: stats.total.to_string() }
            StatCard { label: "Selesai", value: stats.completed.to_string(), tone: "completed" }
            StatCard {
                label: "Rata-rata Penyelesaian",
                value: format!("{:.1} hari", stats.average_resolution_days),
            }
        }

        section { class: "panel",
            h2 { class: "panel-title", "Kategori Laporan" }
            div { class: "category-grid",
                for category in categories {
                    div { key: "{category.id}", class: "category-card",
                        CategoryIcon { icon: category.icon.clone() }
                        h3 { "{category.name}" }
                        p { "{category.description}" }
                    }
                }
            }
        }
    }
}
