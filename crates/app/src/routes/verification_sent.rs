use crate::auth::use_auth;
use crate::notify::use_notifier;
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdBell;
use dioxus_free_icons::Icon;

/// Shown after sign-up: tells the user to check their inbox and offers to
/// resend the confirmation email.
#[component]
pub fn VerificationSent(email: Option<String>) -> Element {
    let auth = use_auth();
    let mut notifier = use_notifier();
    let mut sending = use_signal(|| false);
    let address = email.clone().filter(|e| !e.trim().is_empty());

    let resend = move |_: MouseEvent| {
        let Some(address) = email.clone().filter(|e| !e.trim().is_empty()) else {
            notifier.error("Alamat email tidak diketahui");
            return;
        };
        sending.set(true);
        spawn(async move {
            match auth.service().resend_verification(&address).await {
                Ok(()) => notifier.success("Email verifikasi telah dikirim ulang"),
                Err(e) => notifier.error(e.user_message("Gagal mengirim ulang email verifikasi.")),
            }
            sending.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            div { class: "auth-card auth-card-centered",
                div { class: "auth-icon",
                    Icon::<LdBell> { icon: LdBell, width: 40, height: 40 }
                }
                h1 { class: "auth-title", "Periksa Email Anda" }
                match address {
                    Some(address) => rsx! {
                        p { class: "auth-description",
                            "Kami telah mengirim tautan verifikasi ke "
                            strong { "{address}" }
                            ". Klik tautan tersebut untuk mengaktifkan akun Anda."
                        }
                    },
                    None => rsx! {
                        p { class: "auth-description",
                            "Kami telah mengirim tautan verifikasi ke email Anda."
                        }
                    },
                }
                button {
                    class: "button button-outline",
                    disabled: sending(),
                    onclick: resend,
                    if sending() { "Mengirim..." } else { "Kirim Ulang Verifikasi" }
                }
                p { class: "auth-link",
                    Link { to: Route::Login { redirect: None }, "Kembali ke halaman masuk" }
                }
            }
        }
    }
}
