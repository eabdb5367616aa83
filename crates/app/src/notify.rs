use crate::timer::sleep_ms;
use dioxus::prelude::*;
use shared_types::{Notice, NoticeLevel};

/// How long a toast stays on screen.
const TOAST_MS: u32 = 4000;

/// Most toasts shown at once; older ones are dropped first.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Ordered toast queue with stable ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, notice });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// App-wide notice sink.
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: Signal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: Signal::new(ToastQueue::default()),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, level = ?notice.level, "notice");
        self.queue.write().push(notice);
    }

    pub fn success(&mut self, title: impl Into<String>) {
        self.push(Notice::success(title));
    }

    pub fn error(&mut self, title: impl Into<String>) {
        self.push(Notice::error(title));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.queue.write().dismiss(id);
    }
}

/// Hook to access the notifier.
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast toast-success",
        NoticeLevel::Info => "toast toast-info",
        NoticeLevel::Error => "toast toast-error",
    }
}

/// Renders the current toasts in a fixed corner stack.
#[component]
pub fn ToastHost() -> Element {
    let notifier = use_notifier();
    let toasts = notifier.queue.read().toasts().to_vec();

    rsx! {
        div { class: "toast-host", role: "status",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toast: toast.clone() }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let mut notifier = use_notifier();
    let id = toast.id;

    use_future(move || async move {
        sleep_ms(TOAST_MS).await;
        notifier.dismiss(id);
    });

    rsx! {
        div { class: level_class(toast.notice.level),
            div { class: "toast-body",
                p { class: "toast-title", "{toast.notice.title}" }
                if let Some(description) = &toast.notice.description {
                    p { class: "toast-description", "{description}" }
                }
            }
            button {
                class: "toast-close",
                aria_label: "Tutup",
                onclick: move |_| notifier.dismiss(id),
                "×"
            }
        }
    }
}
