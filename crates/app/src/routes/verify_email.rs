use crate::auth::use_auth;
use crate::routes::Route;
use crate::timer::sleep_ms;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdLockOpen, LdShield};
use dioxus_free_icons::Icon;
use shared_types::AppError;

/// Delay before a verified user is sent to the sign-in page.
const REDIRECT_MS: u32 = 3000;

/// Landing page for the confirmation link in the sign-up email.
#[component]
pub fn VerifyEmail(token: Option<String>) -> Element {
    let auth = use_auth();
    let nav = navigator();

    let result = use_resource(use_reactive!(|token| async move {
        auth.service().verify_email(token.as_deref()).await
    }));

    use_effect(move || {
        if matches!(&*result.read(), Some(Ok(()))) {
            spawn(async move {
                sleep_ms(REDIRECT_MS).await;
                nav.replace(Route::Login { redirect: None });
            });
        }
    });

    let state: Option<Result<(), AppError>> = result.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            div { class: "auth-card auth-card-centered",
                match state {
                    None => rsx! {
                        div { class: "spinner" }
                        h1 { class: "auth-title", "Memverifikasi email..." }
                    },
                    Some(Ok(())) => rsx! {
                        div { class: "auth-icon auth-icon-success",
                            Icon::<LdLockOpen> { icon: LdLockOpen, width: 40, height: 40 }
                        }
                        h1 { class: "auth-title", "Email Terverifikasi" }
                        p { class: "auth-description",
                            "Akun Anda sudah aktif. Anda akan diarahkan ke halaman masuk dalam 3 detik."
                        }
                    },
                    Some(Err(e)) => {
                        let message = e.user_message("Verifikasi email gagal. Tautan mungkin sudah kedaluwarsa.");
                        rsx! {
                            div { class: "auth-icon auth-icon-error",
                                Icon::<LdShield> { icon: LdShield, width: 40, height: 40 }
                            }
                            h1 { class: "auth-title", "Verifikasi Gagal" }
                            p { class: "auth-description", "{message}" }
                            Link { to: Route::Login { redirect: None }, class: "button button-primary",
                                "Ke halaman masuk"
                            }
                        }
                    }
                }
            }
        }
    }
}
