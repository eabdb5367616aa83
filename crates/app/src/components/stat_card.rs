use dioxus::prelude::*;

/// Single figure with a label, as used in the dashboard stat grids.
#[component]
pub fn StatCard(label: String, value: String, hint: Option<String>, tone: Option<String>) -> Element {
    let class = match tone {
        Some(tone) => format!("stat-card stat-{tone}"),
        None => "stat-card".to_string(),
    };

    rsx! {
        div { class: "{class}",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}

/// Horizontal bar showing `value` as a share of `max`.
#[component]
pub fn ShareBar(label: String, value: u32, max: u32) -> Element {
    let pct = if max == 0 { 0 } else { (value * 100 / max).min(100) };

    rsx! {
        div { class: "share-row",
            div { class: "share-row-label",
                span { "{label}" }
                span { class: "share-row-value", "{value}" }
            }
            div { class: "share-track",
                div { class: "share-fill", style: "width: {pct}%;" }
            }
        }
    }
}
