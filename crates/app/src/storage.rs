//! Session tokens kept in the webview's `localStorage`.

use async_trait::async_trait;
use backend::{SessionStorage, StoredSession};
use dioxus::prelude::*;

const STORAGE_KEY: &str = "lapor-desa.session";

/// [`SessionStorage`] backed by `window.localStorage` of the host webview.
pub struct BrowserStorage;

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn load_script() -> String {
    format!("dioxus.send(window.localStorage.getItem({}));", js_string(STORAGE_KEY))
}

fn save_script(session: &StoredSession) -> Result<String, serde_json::Error> {
    let value = serde_json::to_string(session)?;
    Ok(format!(
        "window.localStorage.setItem({}, {});",
        js_string(STORAGE_KEY),
        js_string(&value)
    ))
}

fn clear_script() -> String {
    format!("window.localStorage.removeItem({});", js_string(STORAGE_KEY))
}

/// A malformed record is treated as no session.
fn parse_stored(raw: Option<String>) -> Option<StoredSession> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable stored session");
            None
        }
    }
}

#[async_trait(?Send)]
impl SessionStorage for BrowserStorage {
    async fn load(&self) -> Option<StoredSession> {
        let mut eval = document::eval(&load_script());
        match eval.recv::<Option<String>>().await {
            Ok(raw) => parse_stored(raw),
            Err(e) => {
                tracing::warn!(error = ?e, "reading stored session failed");
                None
            }
        }
    }

    async fn save(&self, session: &StoredSession) {
        match save_script(session) {
            Ok(script) => {
                document::eval(&script);
            }
            Err(e) => tracing::error!(error = %e, "failed to encode session for storage"),
        }
    }

    async fn clear(&self) {
        document::eval(&clear_script());
    }
}
