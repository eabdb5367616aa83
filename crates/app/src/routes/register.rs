use crate::auth::use_auth;
use crate::routes::Route;
use backend::SessionCommand;
use dioxus::prelude::*;
use shared_types::SignUpRequest;

/// Shortest password the form accepts.
const MIN_PASSWORD_LEN: usize = 6;

/// Client-side checks before the request is sent; the first failure wins.
pub fn check_form(name: &str, email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("Nama lengkap wajib diisi");
    }
    if !email.contains('@') {
        return Some("Format email tidak valid");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some("Kata sandi minimal 6 karakter");
    }
    if password != confirm {
        return Some("Konfirmasi kata sandi tidak cocok");
    }
    None
}

/// Sign-up page. A new account is not signed in; the session loop moves on to
/// the verification-pending page.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<&'static str>::None);
    let busy = *auth.busy.read();

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        if let Some(problem) = check_form(&name(), &email(), &password(), &confirm()) {
            error_msg.set(Some(problem));
            return;
        }
        error_msg.set(None);
        auth.send(SessionCommand::SignUp(SignUpRequest {
            email: email().trim().to_string(),
            password: password(),
            display_name: name().trim().to_string(),
        }));
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-card-header",
                    h1 { class: "auth-title", "Daftar Akun" }
                    p { class: "auth-description", "Buat akun untuk mulai melaporkan masalah di desa Anda" }
                }

                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }

                form { onsubmit: handle_register,
                    div { class: "auth-field",
                        label { r#for: "name", "Nama Lengkap" }
                        input {
                            id: "name",
                            placeholder: "Nama sesuai KTP",
                            value: "{name}",
                            oninput: move |e: FormEvent| name.set(e.value()),
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "email", "Email" }
                        input {
                            r#type: "email",
                            id: "email",
                            placeholder: "nama@email.com",
                            value: "{email}",
                            oninput: move |e: FormEvent| email.set(e.value()),
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "password", "Kata Sandi" }
                        input {
                            r#type: "password",
                            id: "password",
                            placeholder: "Minimal 6 karakter",
                            value: "{password}",
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "confirm", "Konfirmasi Kata Sandi" }
                        input {
                            r#type: "password",
                            id: "confirm",
                            value: "{confirm}",
                            oninput: move |e: FormEvent| confirm.set(e.value()),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-submit button button-primary",
                        disabled: busy,
                        if busy { "Memproses..." } else { "Daftar" }
                    }
                }

                p { class: "auth-link",
                    "Sudah punya akun? "
                    Link { to: Route::Login { redirect: None }, "Masuk" }
                }
            }
        }
    }
}
