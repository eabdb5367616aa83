use dioxus::prelude::*;

use crate::routes::Route;

/// 404 page. Unknown paths are not guarded.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "status-page",
            div { class: "status-card",
                div { class: "status-code", "404" }
                h1 { class: "status-title", "Halaman Tidak Ditemukan" }
                p { class: "status-message",
                    "Halaman "
                    code { "{path}" }
                    " tidak ditemukan."
                }
                Link { to: Route::Home {}, class: "button button-primary", "Kembali ke Beranda" }
            }
        }
    }
}
