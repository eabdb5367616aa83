use super::DashboardHeader;
use crate::components::complaint_card::{priority_class, status_class};
use crate::components::stat_card::{ShareBar, StatCard};
use crate::format_helpers::format_relative;
use crate::notify::use_notifier;
use chrono::Utc;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClock, LdUserCheck};
use dioxus_free_icons::Icon;
use shared_types::complaint::{mock_complaints, mock_stats, prioritized};
use shared_types::Notice;

/// Secretary dashboard: triage queue ordered by priority plus village-wide
/// figures.
#[component]
pub fn SecretaryDashboard() -> Element {
    let mut notifier = use_notifier();
    let now = use_hook(Utc::now);
    let queue = use_hook(move || prioritized(&mock_complaints(now)));
    let stats = mock_stats();

    rsx! {
        DashboardHeader {
            title: "Dashboard Sekretaris",
            subtitle: "Verifikasi dan tugaskan pengaduan yang masuk",
        }

        section { class: "stat-grid",
            StatCard { label: "Total Pengaduan", value: stats.total.to_string() }
            StatCard { label: "Menunggu", value: stats.pending.to_string(), tone: "pending" }
            StatCard { label: "Diproses", value: stats.processing.to_string(), tone: "processing" }
            StatCard { label: "Selesai", value: stats.completed.to_string(), tone: "completed" }
        }

        div { class: "dashboard-columns",
            section { class: "panel",
                h2 { class: "panel-title", "Antrean Prioritas" }
                div { class: "queue",
                    for complaint in queue {
                        div { key: "{complaint.id}", class: "queue-item",
                            div { class: "queue-item-body",
                                div { class: "queue-item-badges",
                                    span { class: priority_class(complaint.priority),
                                        "Prioritas {complaint.priority.label()}"
                                    }
                                    span { class: status_class(complaint.status), "{complaint.status.label()}" }
                                }
                                h3 { class: "queue-item-title", "{complaint.title}" }
                                p { class: "muted",
                                    "{complaint.category.name} · {complaint.created_by.name} · "
                                    Icon::<LdClock> { icon: LdClock, width: 12, height: 12 }
                                    " {format_relative(&complaint.created_at, &now)}"
                                }
                            }
                            div { class: "queue-item-actions",
                                button {
                                    class: "button button-outline",
                                    onclick: {
                                        let title = complaint.title.clone();
                                        move |_| notifier.push(
                                            Notice::success("Pengaduan Diverifikasi")
                                                .with_description(format!("Pengaduan \"{title}\" telah diverifikasi.")),
                                        )
                                    },
                                    "Verifikasi"
                                }
                                button {
                                    class: "button button-primary",
                                    onclick: {
                                        let id = complaint.id.clone();
                                        move |_| notifier.push(
                                            Notice::success("Pengaduan Ditugaskan")
                                                .with_description(format!("Pengaduan #{id} telah ditugaskan ke petugas.")),
                                        )
                                    },
                                    Icon::<LdUserCheck> { icon: LdUserCheck, width: 14, height: 14 }
                                    "Tugaskan"
                                }
                            }
                        }
                    }
                }
            }

            section { class: "panel",
                h2 { class: "panel-title", "Distribusi Kategori" }
                for entry in stats.by_category.iter() {
                    ShareBar { key: "{entry.category}", label: entry.category.clone(), value: entry.count, max: stats.total }
                }
            }
        }
    }
}
