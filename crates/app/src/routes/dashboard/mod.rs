pub mod citizen;
pub mod secretary;
pub mod super_admin;
pub mod village_head;

use crate::auth::use_auth;
use dioxus::prelude::*;

/// Greeting strip at the top of every dashboard.
#[component]
fn DashboardHeader(title: String, subtitle: String) -> Element {
    let auth = use_auth();
    let name = auth.session.read().display_name();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-header",
            div {
                h1 { class: "dashboard-title", "{title}" }
                p { class: "dashboard-subtitle", "{subtitle}" }
            }
            p { class: "dashboard-greeting", "Halo, {name}" }
        }
    }
}
