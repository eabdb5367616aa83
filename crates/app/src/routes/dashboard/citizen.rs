use super::DashboardHeader;
use crate::components::complaint_card::ComplaintCard;
use crate::components::stat_card::StatCard;
use crate::routes::Route;
use chrono::Utc;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdFolder};
use dioxus_free_icons::Icon;
use shared_types::complaint::{count_by_status, filter_by_status, mock_complaints, ComplaintStatus};

/// Label of a status filter tab; `None` is the "all" tab.
fn filter_label(status: Option<ComplaintStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("Semua")
}

/// Citizen dashboard: the user's own complaints with per-status counts.
#[component]
pub fn CitizenDashboard() -> Element {
    let now = use_hook(Utc::now);
    let complaints = use_hook(move || mock_complaints(now));
    let mut selected = use_signal(|| None::<ComplaintStatus>);

    let total = complaints.len();
    let pending = count_by_status(&complaints, ComplaintStatus::Pending);
    let processing = count_by_status(&complaints, ComplaintStatus::Processing);
    let completed = count_by_status(&complaints, ComplaintStatus::Completed);
    let visible = filter_by_status(&complaints, selected());

    let tabs = std::iter::once(None).chain(ComplaintStatus::ALL.into_iter().map(Some));

    rsx! {
        DashboardHeader {
            title: "Dashboard Warga",
            subtitle: "Pantau status pengaduan yang telah Anda kirim",
        }

        section { class: "stat-grid",
            StatCard { label: "Total Pengaduan", value: total.to_string() }
            StatCard { label: "Menunggu", value: pending.to_string(), tone: "pending" }
            StatCard { label: "Diproses", value: processing.to_string(), tone: "processing" }
            StatCard { label: "Selesai", value: completed.to_string(), tone: "completed" }
        }

        section { class: "panel",
            div { class: "panel-header",
                h2 { class: "panel-title", "Pengaduan Saya" }
                Link { to: Route::ComplaintNew {}, class: "button button-primary",
                    Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                    "Buat Pengaduan"
                }
            }

            div { class: "tabs", role: "tablist",
                for status in tabs {
                    button {
                        class: if selected() == status { "tab active" } else { "tab" },
                        role: "tab",
                        onclick: move |_| selected.set(status),
                        "{filter_label(status)}"
                    }
                }
            }

            if visible.is_empty() {
                div { class: "empty-state",
                    Icon::<LdFolder> { icon: LdFolder, width: 32, height: 32 }
                    h3 { "Tidak ada pengaduan" }
                    p { class: "muted", "Belum ada pengaduan dengan status {filter_label(selected())}." }
                }
            } else {
                div { class: "complaint-list",
                    for complaint in visible {
                        ComplaintCard { key: "{complaint.id}", complaint: complaint.clone(), now, expanded: true }
                    }
                }
            }
        }
    }
}
