//! Complaint display models and the fixed data the dashboards render.

use crate::models::UserSummary;
use crate::role::Role;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    Processing,
    Completed,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Processing,
        ComplaintStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Processing => "processing",
            ComplaintStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Menunggu",
            ComplaintStatus::Processing => "Diproses",
            ComplaintStatus::Completed => "Selesai",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ComplaintStatus::Pending),
            "processing" => Some(ComplaintStatus::Processing),
            "completed" => Some(ComplaintStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered low to high, so `Ord` sorts by urgency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
}

impl ComplaintPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "low",
            ComplaintPriority::Medium => "medium",
            ComplaintPriority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "Rendah",
            ComplaintPriority::Medium => "Sedang",
            ComplaintPriority::High => "Tinggi",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Icon key understood by the UI.
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintAttachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub id: String,
    pub status: ComplaintStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    #[serde(default)]
    pub attachments: Vec<ComplaintAttachment>,
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserSummary>,
    pub created_by: UserSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintStats {
    pub total: u32,
    pub pending: u32,
    pub processing: u32,
    pub completed: u32,
    /// Average days from submission to completion.
    pub average_resolution_days: f32,
    pub by_category: Vec<CategoryCount>,
}

impl ComplaintStats {
    /// Share of completed complaints, 0..=100.
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100) / self.total
    }
}

/// Per-status counts over a complaint list.
pub fn count_by_status(complaints: &[Complaint], status: ComplaintStatus) -> usize {
    complaints.iter().filter(|c| c.status == status).count()
}

/// Complaints filtered by status; `None` keeps all.
pub fn filter_by_status(complaints: &[Complaint], status: Option<ComplaintStatus>) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| status.is_none_or(|s| c.status == s))
        .cloned()
        .collect()
}

/// Secretary work queue: highest priority first, stable within a priority.
pub fn prioritized(complaints: &[Complaint]) -> Vec<Complaint> {
    let mut queue = complaints.to_vec();
    queue.sort_by(|a, b| b.priority.cmp(&a.priority));
    queue
}

fn category(id: &str, name: &str, description: &str, icon: &str) -> ComplaintCategory {
    ComplaintCategory {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
    }
}

pub fn mock_categories() -> Vec<ComplaintCategory> {
    vec![
        category(
            "1",
            "Infrastruktur",
            "Jalan, jembatan, gedung publik dan infrastruktur fisik lainnya",
            "building",
        ),
        category(
            "2",
            "Layanan Publik",
            "Layanan publik seperti air, listrik dan pengelolaan sampah",
            "lightbulb",
        ),
        category(
            "3",
            "Keamanan",
            "Masalah keamanan, kriminalitas, kecelakaan dan keadaan darurat",
            "shield",
        ),
        category(
            "4",
            "Lingkungan",
            "Polusi, penebangan hutan dan masalah lingkungan lainnya",
            "tree",
        ),
        category(
            "5",
            "Lainnya",
            "Masalah lain yang tidak termasuk kategori di atas",
            "more-horizontal",
        ),
    ]
}

fn person(id: &str, name: &str, email: &str, role: Role) -> UserSummary {
    UserSummary {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role,
        verified: true,
        avatar_url: None,
    }
}

fn attachment(id: &str, name: &str, url: &str, mime_type: &str, size: u64) -> ComplaintAttachment {
    ComplaintAttachment {
        id: id.into(),
        name: name.into(),
        url: url.into(),
        mime_type: mime_type.into(),
        size,
    }
}

/// The three sample complaints, timestamped relative to `now`.
pub fn mock_complaints(now: DateTime<Utc>) -> Vec<Complaint> {
    let categories = mock_categories();
    let days_ago = |d: i64| now - Duration::days(d);
    let secretary = person("2", "Raden Ayu", "secretary@example.com", Role::Secretary);
    let budi = person("1", "Budi Santoso", "budi@example.com", Role::Citizen);
    let update = |id: &str, status, message: &str, days: i64| StatusUpdate {
        id: id.into(),
        status,
        message: message.into(),
        created_at: days_ago(days),
        updated_by: secretary.clone(),
    };

    vec![
        Complaint {
            id: "1".into(),
            title: "Lampu jalan mati di Jalan Merdeka".into(),
            description: "Lampu jalan sudah mati lebih dari seminggu dan membuat area tidak aman di malam hari.".into(),
            category: categories[1].clone(),
            status: ComplaintStatus::Pending,
            priority: ComplaintPriority::Medium,
            attachments: vec![attachment(
                "1",
                "photo1.jpg",
                "https://images.unsplash.com/photo-1616279969096-54b228f2f31d?auto=format&fit=crop&q=80&w=1887",
                "image/jpeg",
                2_048_000,
            )],
            status_updates: vec![update(
                "1",
                ComplaintStatus::Pending,
                "Pengaduan diterima dan menunggu verifikasi",
                3,
            )],
            assigned_to: None,
            created_by: budi.clone(),
            created_at: days_ago(5),
            updated_at: days_ago(3),
        },
        Complaint {
            id: "2".into(),
            title: "Sampah tidak diangkut sesuai jadwal".into(),
            description: "Petugas kebersihan tidak datang ke wilayah kami dua minggu berturut-turut.".into(),
            category: categories[1].clone(),
            status: ComplaintStatus::Processing,
            priority: ComplaintPriority::High,
            attachments: vec![attachment(
                "2",
                "garbage.jpg",
                "https://images.unsplash.com/photo-1605600659873-d808a13e4d2a?auto=format&fit=crop&q=80&w=2070",
                "image/jpeg",
                1_536_000,
            )],
            status_updates: vec![
                update(
                    "2",
                    ComplaintStatus::Pending,
                    "Pengaduan diterima dan menunggu verifikasi",
                    10,
                ),
                update(
                    "3",
                    ComplaintStatus::Processing,
                    "Pengaduan diverifikasi dan diteruskan ke dinas kebersihan",
                    8,
                ),
            ],
            assigned_to: Some(person("4", "Ahmad Santoso", "ahmad@example.com", Role::Secretary)),
            created_by: budi,
            created_at: days_ago(12),
            updated_at: days_ago(8),
        },
        Complaint {
            id: "3".into(),
            title: "Jalan berlubang di Jalan Pemuda menyebabkan kecelakaan".into(),
            description: "Lubang besar di jalan sudah menyebabkan beberapa kecelakaan sepeda motor.".into(),
            category: categories[0].clone(),
            status: ComplaintStatus::Completed,
            priority: ComplaintPriority::High,
            attachments: vec![
                attachment(
                    "3",
                    "pothole.jpg",
                    "https://images.unsplash.com/photo-1515162816999-a0c47dc192f7?auto=format&fit=crop&q=80&w=2070",
                    "image/jpeg",
                    2_048_000,
                ),
                attachment("4", "accident_report.pdf", "#", "application/pdf", 1_024_000),
            ],
            status_updates: vec![
                update(
                    "4",
                    ComplaintStatus::Pending,
                    "Pengaduan diterima dan menunggu verifikasi",
                    20,
                ),
                update(
                    "5",
                    ComplaintStatus::Processing,
                    "Pengaduan diverifikasi dan diteruskan ke dinas pekerjaan umum",
                    18,
                ),
                update("6", ComplaintStatus::Completed, "Jalan berlubang sudah diperbaiki", 15),
            ],
            assigned_to: None,
            created_by: person("5", "Siti Rahma", "siti@example.com", Role::Citizen),
            created_at: days_ago(25),
            updated_at: days_ago(15),
        },
    ]
}

pub fn mock_stats() -> ComplaintStats {
    let by_category = [
        ("Infrastruktur", 42),
        ("Layanan Publik", 28),
        ("Keamanan", 19),
        ("Lingkungan", 23),
        ("Lainnya", 12),
    ]
    .into_iter()
    .map(|(category, count)| CategoryCount {
        category: category.into(),
        count,
    })
    .collect();

    ComplaintStats {
        total: 124,
        pending: 32,
        processing: 45,
        completed: 47,
        average_resolution_days: 3.5,
        by_category,
    }
}
