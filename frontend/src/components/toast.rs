use leptos::prelude::*;
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
}

/// 全局通知，同一时间只显示一条
#[derive(Clone, Copy)]
pub struct ToastContext {
    current: RwSignal<Option<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Error);
    }

    fn show(&self, message: String, kind: ToastKind) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Toast { id, message, kind }));

        // 3秒后清除；期间出现新通知则由新通知负责
        let current = self.current;
        set_timeout(
            move || {
                if current.with_untracked(|t| t.as_ref().map(|t| t.id)) == Some(id) {
                    current.set(None);
                }
            },
            TOAST_DURATION,
        );
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();
    let current = toast.current;

    view! {
        <Show when=move || current.with(Option::is_some)>
            <div class="toast toast-top toast-center z-[60]">
                <div class=move || {
                    match current.with(|t| t.as_ref().map(|t| t.kind)) {
                        Some(ToastKind::Error) => "alert alert-error shadow-lg",
                        _ => "alert alert-success shadow-lg",
                    }
                }>
                    <span>
                        {move || current.with(|t| t.as_ref().map(|t| t.message.clone()).unwrap_or_default())}
                    </span>
                </div>
            </div>
        </Show>
    }
}
