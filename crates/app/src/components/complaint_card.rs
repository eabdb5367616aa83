use crate::format_helpers::{format_date, format_file_size, format_relative};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClock, LdFileText, LdUserCheck};
use dioxus_free_icons::Icon;
use shared_types::complaint::{Complaint, ComplaintPriority, ComplaintStatus};

use super::CategoryIcon;

pub fn status_class(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "badge badge-pending",
        ComplaintStatus::Processing => "badge badge-processing",
        ComplaintStatus::Completed => "badge badge-completed",
    }
}

pub fn priority_class(priority: ComplaintPriority) -> &'static str {
    match priority {
        ComplaintPriority::Low => "badge badge-outline",
        ComplaintPriority::Medium => "badge badge-medium",
        ComplaintPriority::High => "badge badge-high",
    }
}

/// Summary card for one complaint. `expanded` adds attachments and the
/// status history.
#[component]
pub fn ComplaintCard(complaint: Complaint, now: DateTime<Utc>, expanded: bool) -> Element {
    let created = format_relative(&complaint.created_at, &now);

    rsx! {
        article { class: "complaint-card",
            div { class: "complaint-card-header",
                span { class: "complaint-category",
                    CategoryIcon { icon: complaint.category.icon.clone() }
                    "{complaint.category.name}"
                }
                span { class: status_class(complaint.status), "{complaint.status.label()}" }
            }
            h3 { class: "complaint-title", "{complaint.title}" }
            p { class: "complaint-description", "{complaint.description}" }
            div { class: "complaint-meta",
                span {
                    Icon::<LdClock> { icon: LdClock, width: 14, height: 14 }
                    "{created}"
                }
                span { class: priority_class(complaint.priority),
                    "Prioritas {complaint.priority.label()}"
                }
                if let Some(assignee) = &complaint.assigned_to {
                    span {
                        Icon::<LdUserCheck> { icon: LdUserCheck, width: 14, height: 14 }
                        "{assignee.name}"
                    }
                }
            }

            if expanded {
                if !complaint.attachments.is_empty() {
                    ul { class: "complaint-attachments",
                        for attachment in complaint.attachments.iter() {
                            li { key: "{attachment.id}",
                                Icon::<LdFileText> { icon: LdFileText, width: 14, height: 14 }
                                "{attachment.name} ({format_file_size(attachment.size)})"
                            }
                        }
                    }
                }
                if !complaint.status_updates.is_empty() {
                    ol { class: "complaint-timeline",
                        for update in complaint.status_updates.iter() {
                            li { key: "{update.id}",
                                span { class: status_class(update.status), "{update.status.label()}" }
                                p { "{update.message}" }
                                small {
                                    "{update.updated_by.name} · {format_date(&update.created_at)}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
