use crate::auth::use_auth;
use crate::components::dashboard_route;
use crate::routes::Route;
use backend::config::load_config;
use backend::{SessionCommand, DEMO_PASSWORD};
use dioxus::prelude::*;
use shared_types::routes::dashboard_for;
use shared_types::{BackendMode, Role};

/// Seeded accounts listed under the form in demo mode.
const DEMO_ACCOUNTS: [(&str, Role); 4] = [
    ("citizen@example.com", Role::Citizen),
    ("secretary@example.com", Role::Secretary),
    ("villagehead@example.com", Role::VillageHead),
    ("admin@example.com", Role::SuperAdmin),
];

/// Sign-in page.
/// Accepts an optional `redirect` query param set by the route guard; the
/// session loop lands there after sign-in if the user's role allows it.
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let busy = *auth.busy.read();
    let demo_mode = load_config().backend.mode == BackendMode::Demo;

    // Bounce a user who is already signed in, unless a sign-in is in flight
    // (the session loop navigates then).
    {
        let snapshot = auth.session.read();
        if !busy && !snapshot.loading && snapshot.profile.is_some() {
            navigator().replace(dashboard_route(dashboard_for(snapshot.role())));
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        auth.send(SessionCommand::SignIn {
            email: email().trim().to_string(),
            password: password(),
            redirect: redirect.clone(),
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-card-header",
                    h1 { class: "auth-title", "Masuk" }
                    p { class: "auth-description", "Masuk ke akun Anda untuk melanjutkan" }
                }

                form { onsubmit: handle_login,
                    div { class: "auth-field",
                        label { r#for: "email", "Email" }
                        input {
                            r#type: "email",
                            id: "email",
                            required: true,
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
                            required: true,
                            placeholder: "Masukkan kata sandi",
                            value: "{password}",
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-submit button button-primary",
                        disabled: busy,
                        if busy { "Memproses..." } else { "Masuk" }
                    }
                }

                if demo_mode {
                    div { class: "auth-demo",
                        p { class: "auth-demo-title", "Akun demo (kata sandi: {DEMO_PASSWORD})" }
                        ul {
                            for (demo_email, role) in DEMO_ACCOUNTS {
                                li {
                                    button {
                                        r#type: "button",
                                        class: "auth-demo-account",
                                        onclick: move |_| {
                                            email.set(demo_email.to_string());
                                            password.set(DEMO_PASSWORD.to_string());
                                        },
                                        span { "{role.label()}" }
                                        code { "{demo_email}" }
                                    }
                                }
                            }
                        }
                    }
                }

                p { class: "auth-link",
                    "Belum punya akun? "
                    Link { to: Route::Register {}, "Daftar" }
                }
            }
        }
    }
}
