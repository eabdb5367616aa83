use super::DashboardHeader;
use crate::components::stat_card::{ShareBar, StatCard};
use dioxus::prelude::*;
use shared_types::complaint::mock_stats;

/// Complaints received per weekday over the last week.
const WEEKLY_VOLUME: [(&str, u32); 7] = [
    ("Sen", 12),
    ("Sel", 19),
    ("Rab", 15),
    ("Kam", 27),
    ("Jum", 21),
    ("Sab", 14),
    ("Min", 9),
];

/// Average days to resolve, per category.
const RESOLUTION_DAYS: [(&str, f32); 5] = [
    ("Infrastruktur", 6.2),
    ("Layanan Publik", 3.5),
    ("Keamanan", 2.1),
    ("Lingkungan", 4.8),
    ("Lainnya", 3.0),
];

/// Bar height as a percentage of the busiest day.
fn bar_height(count: u32, peak: u32) -> u32 {
    if peak == 0 {
        return 0;
    }
    count * 100 / peak
}

/// Village head's executive summary. Read-only.
#[component]
pub fn VillageHeadDashboard() -> Element {
    let stats = mock_stats();
    let peak = WEEKLY_VOLUME.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let weekly_total: u32 = WEEKLY_VOLUME.iter().map(|(_, n)| n).sum();
    let slowest = RESOLUTION_DAYS
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| *name)
        .unwrap_or_default();

    rsx! {
        DashboardHeader {
            title: "Dashboard Eksekutif",
            subtitle: "Ringkasan kinerja penanganan pengaduan desa",
        }

        section { class: "stat-grid",
            StatCard { label: "Total Pengaduan", value: stats.total.to_string() }
            StatCard {
                label: "Tingkat Penyelesaian",
                value: format!("{}%", stats.completion_rate()),
                tone: "completed",
            }
            StatCard { label: "Pengaduan Minggu Ini", value: weekly_total.to_string() }
            StatCard {
                label: "Rata-rata Penyelesaian",
                value: format!("{:.1} hari", stats.average_resolution_days),
            }
        }

        div { class: "dashboard-columns",
            section { class: "panel",
                h2 { class: "panel-title", "Volume Pengaduan Mingguan" }
                div { class: "bar-chart",
                    for (day, count) in WEEKLY_VOLUME {
                        div { key: "{day}", class: "bar-chart-column",
                            div {
                                class: "bar-chart-bar",
                                style: "height: {bar_height(count, peak)}%;",
                                title: "{count}",
                            }
                            span { class: "bar-chart-label", "{day}" }
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

        section { class: "panel",
            h2 { class: "panel-title", "Waktu Penyelesaian per Kategori" }
            table { class: "data-table",
                thead {
                    tr {
                        th { "Kategori" }
                        th { "Rata-rata (hari)" }
                    }
                }
                tbody {
                    for (name, days) in RESOLUTION_DAYS {
                        tr { key: "{name}",
                            td { "{name}" }
                            td { "{days:.1}" }
                        }
                    }
                }
            }
            p { class: "insight",
                "Kategori "
                strong { "{slowest}" }
                " membutuhkan waktu penyelesaian terlama."
            }
        }
    }
}
