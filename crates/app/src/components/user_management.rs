use crate::auth::use_auth;
use crate::format_helpers::initials;
use crate::notify::use_notifier;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdSearch, LdShield};
use dioxus_free_icons::Icon;
use shared_types::{Role, UserSummary};

/// Case-insensitive match on name or email; an empty query keeps everyone.
pub fn filter_users(users: &[UserSummary], query: &str) -> Vec<UserSummary> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            query.is_empty()
                || u.name.to_lowercase().contains(&query)
                || u.email.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

pub fn role_updated_message(role: Role) -> String {
    format!("Peran pengguna diubah menjadi {}", role.label())
}

/// Super-admin table of all users with an inline role selector.
#[component]
pub fn UserManagement() -> Element {
    let auth = use_auth();
    let mut notifier = use_notifier();
    let mut query = use_signal(String::new);
    let mut users = use_resource(move || async move { auth.service().list_users().await });

    let change_role = move |(user_id, role): (String, Role)| {
        spawn(async move {
            match auth.service().update_user_role(&user_id, role).await {
                Ok(()) => {
                    notifier.success(role_updated_message(role));
                    users.restart();
                }
                Err(e) => {
                    tracing::error!(error = %e, user_id = %user_id, "Failed to update user role");
                    notifier.error(e.user_message("Gagal memperbarui peran pengguna."));
                }
            }
        });
    };

    let listing = users.read().clone();

    rsx! {
        section { class: "panel",
            div { class: "panel-header",
                h2 { class: "panel-title",
                    Icon::<LdShield> { icon: LdShield, width: 18, height: 18 }
                    "Manajemen Pengguna"
                }
                label { class: "search-field",
                    Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                    input {
                        r#type: "search",
                        placeholder: "Cari nama atau email",
                        value: "{query}",
                        oninput: move |evt| query.set(evt.value()),
                    }
                }
            }

            match listing {
                None => rsx! { p { class: "muted", "Memuat pengguna..." } },
                Some(Err(e)) => {
                    let message = e.user_message("Daftar pengguna tidak dapat dimuat.");
                    rsx! {
                        div { class: "panel-error",
                            p { "{message}" }
                            button {
                                class: "button button-outline",
                                onclick: move |_| users.restart(),
                                "Coba lagi"
                            }
                        }
                    }
                }
                Some(Ok(all)) => {
                    let visible = filter_users(&all, &query.read());
                    rsx! {
                        table { class: "data-table",
                            thead {
                                tr {
                                    th { "Pengguna" }
                                    th { "Email" }
                                    th { "Status" }
                                    th { "Peran" }
                                }
                            }
                            tbody {
                                if visible.is_empty() {
                                    tr {
                                        td { colspan: "4", class: "muted", "Tidak ada pengguna yang cocok." }
                                    }
                                }
                                for user in visible {
                                    UserRow { key: "{user.id}", user: user.clone(), on_role_change: change_role }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UserRow(user: UserSummary, on_role_change: EventHandler<(String, Role)>) -> Element {
    let id = user.id.clone();

    rsx! {
        tr {
            td {
                div { class: "user-cell",
                    span { class: "avatar", "{initials(&user.name)}" }
                    span { "{user.name}" }
                }
            }
            td { "{user.email}" }
            td {
                if user.verified {
                    span { class: "badge badge-completed", "Terverifikasi" }
                } else {
                    span { class: "badge badge-outline", "Belum verifikasi" }
                }
            }
            td {
                select {
                    class: "select",
                    value: "{user.role.as_str()}",
                    onchange: move |evt: FormEvent| match Role::parse(&evt.value()) {
                        Some(role) => on_role_change.call((id.clone(), role)),
                        None => tracing::warn!(value = %evt.value(), "unknown role selected"),
                    },
                    for role in Role::ALL {
                        option {
                            value: role.as_str(),
                            selected: role == user.role,
                            "{role.label()}"
                        }
                    }
                }
            }
        }
    }
}
