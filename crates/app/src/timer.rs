use dioxus::prelude::*;

/// Resolve after `ms` milliseconds, using the host's `setTimeout`.
pub async fn sleep_ms(ms: u32) {
    let mut eval = document::eval(&format!(
        "setTimeout(() => dioxus.send(true), {ms});"
    ));
    if let Err(e) = eval.recv::<bool>().await {
        tracing::warn!(error = ?e, ms, "timer eval failed");
    }
}
