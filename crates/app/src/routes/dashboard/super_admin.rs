use super::DashboardHeader;
use crate::components::complaint_card::ComplaintCard;
use crate::components::user_management::UserManagement;
use chrono::Utc;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdSettings, LdUsers};
use dioxus_free_icons::Icon;
use shared_types::complaint::mock_complaints;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Users,
    Complaints,
    Settings,
}

impl AdminTab {
    const ALL: [AdminTab; 3] = [AdminTab::Users, AdminTab::Complaints, AdminTab::Settings];

    fn label(self) -> &'static str {
        match self {
            AdminTab::Users => "Manajemen Pengguna",
            AdminTab::Complaints => "Semua Pengaduan",
            AdminTab::Settings => "Pengaturan Sistem",
        }
    }
}

/// Super admin dashboard: user role management and a view over every complaint.
#[component]
pub fn SuperAdminDashboard() -> Element {
    let mut tab = use_signal(|| AdminTab::Users);
    let now = use_hook(Utc::now);
    let complaints = use_hook(move || mock_complaints(now));

    rsx! {
        DashboardHeader {
            title: "Dashboard Super Admin",
            subtitle: "Kelola pengguna, peran dan seluruh pengaduan",
        }

        div { class: "tabs", role: "tablist",
            for t in AdminTab::ALL {
                button {
                    class: if tab() == t { "tab active" } else { "tab" },
                    role: "tab",
                    onclick: move |_| tab.set(t),
                    "{t.label()}"
                }
            }
        }

        match tab() {
            AdminTab::Users => rsx! { UserManagement {} },
            AdminTab::Complaints => rsx! {
                section { class: "panel",
                    h2 { class: "panel-title", "Semua Pengaduan" }
                    p { class: "muted", "Lihat dan kelola semua pengaduan dari masyarakat" }
                    div { class: "complaint-list",
                        for complaint in complaints.iter() {
                            ComplaintCard { key: "{complaint.id}", complaint: complaint.clone(), now, expanded: false }
                        }
                    }
                }
            },
            AdminTab::Settings => rsx! {
                section { class: "panel",
                    h2 { class: "panel-title",
                        Icon::<LdSettings> { icon: LdSettings, width: 18, height: 18 }
                        "Pengaturan Sistem"
                    }
                    p { class: "muted", "Konfigurasi sistem dan parameter aplikasi" }
                    div { class: "empty-state",
                        Icon::<LdUsers> { icon: LdUsers, width: 32, height: 32 }
                        p { "Pengaturan sistem akan ditampilkan di sini." }
                    }
                }
            },
        }
    }
}
