use crate::notify::use_notifier;
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdPackage};
use dioxus_free_icons::Icon;
use shared_types::complaint::mock_categories;
use shared_types::Notice;

/// Values captured by the complaint form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintDraft {
    pub title: String,
    pub category: String,
    pub location: String,
    pub description: String,
    /// Names of the selected files; contents are not uploaded.
    pub attachments: Vec<String>,
}

impl ComplaintDraft {
    /// All text fields filled. Attachments are optional.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.category, &self.location, &self.description]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Complaint submission form for citizens.
#[component]
pub fn ComplaintNew() -> Element {
    let mut notifier = use_notifier();
    let mut draft = use_signal(ComplaintDraft::default);
    let categories = mock_categories();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = draft.read().clone();
        if !current.is_complete() {
            notifier.push(
                Notice::error("Formulir tidak lengkap")
                    .with_description("Mohon isi semua bidang yang diperlukan"),
            );
            return;
        }
        let reference = uuid::Uuid::new_v4().simple().to_string();
        tracing::info!(
            reference = %reference,
            category = %current.category,
            attachments = current.attachments.len(),
            "complaint submitted"
        );
        notifier.push(
            Notice::success("Pengaduan Berhasil Dikirim")
                .with_description("Pengaduan Anda telah diterima dan akan segera diproses"),
        );
        navigator().push(Route::CitizenDashboard {});
    };

    let handle_files = move |evt: FormEvent| {
        let names: Vec<String> = evt.files().iter().map(|f| f.name()).collect();
        draft.write().attachments.extend(names);
    };

    let attachments = draft.read().attachments.clone();

    rsx! {
        div { class: "form-page",
            div { class: "panel",
                div { class: "panel-header panel-header-stacked",
                    h1 { class: "panel-title", "Form Pengaduan" }
                    p { class: "muted", "Sampaikan permasalahan atau keluhan Anda dengan mengisi formulir berikut" }
                }

                form { class: "form", onsubmit: handle_submit,
                    div { class: "form-field",
                        label { r#for: "title", "Judul Pengaduan" }
                        input {
                            id: "title",
                            placeholder: "Masukkan judul singkat pengaduan",
                            value: "{draft.read().title}",
                            oninput: move |e: FormEvent| draft.write().title = e.value(),
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "category", "Kategori" }
                        select {
                            id: "category",
                            class: "select",
                            value: "{draft.read().category}",
                            onchange: move |e: FormEvent| draft.write().category = e.value(),
                            option { value: "", disabled: true, "Pilih kategori pengaduan" }
                            for category in categories {
                                option { key: "{category.id}", value: "{category.id}", "{category.name}" }
                            }
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "location", "Lokasi" }
                        input {
                            id: "location",
                            placeholder: "Masukkan lokasi terkait pengaduan",
                            value: "{draft.read().location}",
                            oninput: move |e: FormEvent| draft.write().location = e.value(),
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "description", "Deskripsi" }
                        textarea {
                            id: "description",
                            rows: "6",
                            placeholder: "Jelaskan secara detail permasalahan yang Anda alami...",
                            value: "{draft.read().description}",
                            oninput: move |e: FormEvent| draft.write().description = e.value(),
                        }
                    }
                    div { class: "form-field",
                        label { r#for: "attachments", "Lampiran" }
                        div { class: "dropzone",
                            Icon::<LdPackage> { icon: LdPackage, width: 24, height: 24 }
                            input {
                                id: "attachments",
                                r#type: "file",
                                multiple: true,
                                accept: "image/*,.pdf,.doc,.docx",
                                onchange: handle_files,
                            }
                            p { class: "muted", "Format: JPG, PNG, PDF, DOC (Maks. 5MB)" }
                        }
                        if !attachments.is_empty() {
                            p { class: "form-hint", "File Terlampir:" }
                            ul { class: "attachment-list",
                                for (index, name) in attachments.into_iter().enumerate() {
                                    li { key: "{index}-{name}",
                                        Icon::<LdFileText> { icon: LdFileText, width: 14, height: 14 }
                                        span { "{name}" }
                                        button {
                                            r#type: "button",
                                            class: "button button-ghost",
                                            aria_label: "Hapus lampiran",
                                            onclick: move |_| {
                                                let mut d = draft.write();
                                                if index < d.attachments.len() {
                                                    d.attachments.remove(index);
                                                }
                                            },
                                            "×"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "form-actions",
                        Link { to: Route::CitizenDashboard {}, class: "button button-outline", "Batalkan" }
                        button { r#type: "submit", class: "button button-primary", "Kirim Pengaduan" }
                    }
                }
            }
        }
    }
}
