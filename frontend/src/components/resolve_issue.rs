use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::{log_error, log_info};
use tankas_shared::{Id, Issue};

use crate::api::{use_api, use_task_scope};
use crate::components::page_header::PageHeader;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::{SelectedImage, first_file, read_image};

/// 提交结果弹窗
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Resolved,
    Failed(String),
}

#[component]
pub fn ResolveIssuePage(id: Id) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();

    let (issue, set_issue) = signal(Option::<Issue>::None);
    let (loading, set_loading) = signal(true);
    let (after, set_after) = signal(Option::<SelectedImage>::None);
    let (submitting, set_submitting) = signal(false);
    let (outcome, set_outcome) = signal(Option::<Outcome>::None);

    {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        spawn_local(async move {
            let Some(result) = scope.guard(api.issue(&id)).await else {
                return;
            };
            match result {
                Ok(data) => set_issue.set(Some(data)),
                Err(e) => {
                    log_error!("Failed to load issue: {}", e);
                    toast.error(e.message());
                }
            }
            set_loading.set(false);
        });
    }

    on_cleanup(move || {
        if let Some(image) = after.get_untracked() {
            image.release();
        }
    });

    let on_photo_change = move |ev: leptos::ev::Event| {
        let Some(file) = first_file(&ev) else {
            return;
        };
        spawn_local(async move {
            let Some(image) = read_image(file).await else {
                toast.error("Could not read the selected image.");
                return;
            };
            if let Some(previous) = after.get_untracked() {
                previous.release();
            }
            set_after.set(Some(image));
        });
    };

    let on_submit = move |_| {
        let Some(image) = after.get_untracked() else {
            return;
        };
        if submitting.get_untracked() {
            return;
        }
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        set_submitting.set(true);
        spawn_local(async move {
            let Some(result) = scope.guard(api.resolve_issue(&id, image.part)).await else {
                return;
            };
            match result {
                Ok(_) => {
                    log_info!("Issue {} resolved", id);
                    set_outcome.set(Some(Outcome::Resolved));
                }
                Err(e) => {
                    log_error!("Failed to resolve issue: {}", e);
                    set_outcome.set(Some(Outcome::Failed(e.message().to_string())));
                }
            }
            set_submitting.set(false);
        });
    };

    // 成功后关闭弹窗回到面板；失败则留在本页重试
    let close_modal = move |_| {
        if outcome.get_untracked() == Some(Outcome::Resolved) {
            router.navigate(AppRoute::Dashboard);
        }
        set_outcome.set(None);
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <PageHeader title="Resolve Issue" />

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <main class="max-w-md mx-auto p-4 space-y-6">
                    {move || {
                        issue
                            .get()
                            .map(|issue| {
                                let reporter = issue
                                    .reporter
                                    .as_ref()
                                    .map(|u| u.display_label().to_string())
                                    .unwrap_or_else(|| "Unknown".to_string());
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <figure>
                                            <img
                                                src=issue.picture_or_placeholder().to_string()
                                                alt="Before"
                                                class="w-full h-48 object-cover"
                                            />
                                        </figure>
                                        <div class="card-body">
                                            <h2 class="card-title">{issue.title.clone()}</h2>
                                            <p class="text-sm text-base-content/60">
                                                "Reported by " {reporter}
                                            </p>
                                        </div>
                                    </div>
                                }
                            })
                    }}

                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">"After Photo"</h2>
                            <p class="text-sm text-base-content/60">
                                "Upload a photo showing the cleaned-up area."
                            </p>
                            <Show
                                when=move || after.with(Option::is_some)
                                fallback=move || view! {
                                    <label class="flex flex-col items-center justify-center h-48 border-2 border-dashed border-base-300 rounded-box cursor-pointer">
                                        <span class="material-symbols-outlined text-4xl text-base-content/50">"add_a_photo"</span>
                                        <span class="mt-2 text-base-content/60">"Add after photo"</span>
                                        <input
                                            type="file"
                                            accept="image/*"
                                            capture="environment"
                                            class="hidden"
                                            on:change=on_photo_change
                                        />
                                    </label>
                                }
                            >
                                <label class="cursor-pointer">
                                    <img
                                        src=move || after.with(|p| p.as_ref().map(|p| p.preview_url.clone()).unwrap_or_default())
                                        alt="After photo preview"
                                        class="w-full h-48 object-cover rounded-box"
                                    />
                                    <input
                                        type="file"
                                        accept="image/*"
                                        class="hidden"
                                        on:change=on_photo_change
                                    />
                                </label>
                            </Show>
                        </div>
                    </div>

                    <button
                        class="btn btn-success w-full"
                        disabled=move || submitting.get() || after.with(Option::is_none)
                        on:click=on_submit.clone()
                    >
                        <Show when=move || submitting.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        {move || if submitting.get() { "Submitting..." } else { "Mark as Resolved" }}
                    </button>
                </main>
            </Show>

            {move || {
                outcome
                    .get()
                    .map(|result| {
                        let (icon, title, body) = match result {
                            Outcome::Resolved => (
                                "check_circle",
                                "Issue Resolved!".to_string(),
                                "Thank you for making your community cleaner.".to_string(),
                            ),
                            Outcome::Failed(message) => {
                                ("error", "Something went wrong".to_string(), message)
                            }
                        };
                        view! {
                            <div class="modal modal-open">
                                <div class="modal-box text-center">
                                    <span class="material-symbols-outlined text-6xl text-primary">{icon}</span>
                                    <h3 class="text-2xl font-bold mt-4">{title}</h3>
                                    <p class="py-4">{body}</p>
                                    <div class="modal-action justify-center">
                                        <button class="btn btn-primary" on:click=close_modal>"Close"</button>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
