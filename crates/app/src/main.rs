use backend::config::{build_backend, load_config};
use backend::{AuthBackend, SessionService};
use dioxus::prelude::*;
use shared_types::SessionSnapshot;
use std::rc::Rc;
use std::sync::Arc;

mod auth;
mod components;
mod format_helpers;
pub mod notify;
mod routes;
mod storage;
mod timer;

use auth::AuthState;
use notify::{Notifier, ToastHost};
use routes::Route;
use storage::BrowserStorage;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

/// Shared handle to the configured backend, compared by identity.
#[derive(Clone)]
pub struct BackendHandle(pub Arc<dyn AuthBackend>);

impl PartialEq for BackendHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[component]
fn App() -> Element {
    let backend = use_hook(|| {
        tracing::info!(platform = client_platform(), "starting Lapor Desa");
        build_backend(load_config(), Arc::new(BrowserStorage))
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        match backend {
            Ok(backend) => rsx! { SessionProvider { backend: BackendHandle(backend) } },
            Err(e) => {
                tracing::error!(error = %e, "Failed to build backend");
                rsx! { ConfigError { message: e.to_string() } }
            }
        }
    }
}

/// Owns the session service and the notice list for the lifetime of the app.
#[component]
fn SessionProvider(backend: BackendHandle) -> Element {
    let session = use_signal(SessionSnapshot::loading);
    let busy = use_signal(|| false);

    let service = use_hook(move || {
        let service = SessionService::new(backend.0.clone()).with_observer(move |snapshot| {
            let mut session = session;
            session.set(snapshot.clone());
        });
        CopyValue::new(Rc::new(service))
    });

    use_context_provider(|| AuthState {
        session,
        busy,
        service,
    });
    use_context_provider(Notifier::new);

    rsx! {
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "guard-loading",
                    p { "Memuat..." }
                }
            },
            Router::<Route> {}
        }
        ToastHost {}
    }
}

#[component]
fn ConfigError(message: String) -> Element {
    rsx! {
        div { class: "config-error",
            h1 { "Konfigurasi tidak valid" }
            p { "Aplikasi tidak dapat terhubung ke layanan autentikasi." }
            code { "{message}" }
        }
    }
}
