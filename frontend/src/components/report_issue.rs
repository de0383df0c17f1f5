use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::{log_error, log_info};
use tankas_shared::forms::{Difficulty, IssueReport, Priority, estimate_points};

use crate::api::{use_api, use_task_scope};
use crate::components::page_header::PageHeader;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::{SelectedImage, first_file, read_image};

const PRIORITIES: [(Priority, &str); 3] = [
    (Priority::Low, "Low"),
    (Priority::Medium, "Medium"),
    (Priority::High, "High"),
];

const DIFFICULTIES: [(Difficulty, &str); 3] = [
    (Difficulty::Easy, "Easy"),
    (Difficulty::Medium, "Medium"),
    (Difficulty::Hard, "Hard"),
];

#[component]
pub fn ReportIssuePage() -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (priority, set_priority) = signal(Priority::default());
    let (difficulty, set_difficulty) = signal(Difficulty::default());
    let (photo, set_photo) = signal(Option::<SelectedImage>::None);
    let (submitting, set_submitting) = signal(false);

    let points = Memo::new(move |_| estimate_points(priority.get(), difficulty.get()));

    // 离开页面时释放预览地址
    on_cleanup(move || {
        if let Some(image) = photo.get_untracked() {
            image.release();
        }
    });

    let replace_photo = move |next: Option<SelectedImage>| {
        if let Some(previous) = photo.get_untracked() {
            previous.release();
        }
        set_photo.set(next);
    };

    let on_photo_change = move |ev: leptos::ev::Event| {
        let Some(file) = first_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_image(file).await {
                Some(image) => replace_photo(Some(image)),
                None => toast.error("Could not read the selected image."),
            }
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let report = IssueReport {
            title: title.get_untracked(),
            description: description.get_untracked(),
            priority: priority.get_untracked(),
            difficulty: difficulty.get_untracked(),
        };
        if let Err(message) = report.validate() {
            toast.error(message);
            return;
        }
        let Some(image) = photo.get_untracked() else {
            toast.error("Please add a photo of the issue.");
            return;
        };

        let api = api.clone();
        let scope = scope.clone();
        set_submitting.set(true);
        spawn_local(async move {
            let Some(result) = scope.guard(api.report_issue(report, image.part)).await else {
                return;
            };
            match result {
                Ok(issue) => {
                    log_info!("Issue reported: {}", issue.id);
                    toast.success("Issue reported successfully!");
                    router.navigate(AppRoute::Dashboard);
                }
                Err(e) => {
                    log_error!("Failed to report issue: {}", e);
                    toast.error(e.message());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <PageHeader title="Report an Issue" />

            <form class="max-w-md mx-auto p-4 space-y-6" on:submit=on_submit>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Add Photo"</h2>
                        <Show
                            when=move || photo.with(Option::is_some)
                            fallback=move || view! {
                                <label class="flex flex-col items-center justify-center h-48 border-2 border-dashed border-base-300 rounded-box cursor-pointer">
                                    <span class="material-symbols-outlined text-4xl text-base-content/50">"add_a_photo"</span>
                                    <span class="mt-2 text-base-content/60">"Tap to take or upload a photo"</span>
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
                            <div class="relative">
                                <img
                                    src=move || photo.with(|p| p.as_ref().map(|p| p.preview_url.clone()).unwrap_or_default())
                                    alt="Issue photo preview"
                                    class="w-full h-48 object-cover rounded-box"
                                />
                                <button
                                    type="button"
                                    class="btn btn-circle btn-sm btn-error absolute top-2 right-2"
                                    title="Remove photo"
                                    on:click=move |_| replace_photo(None)
                                >
                                    <span class="material-symbols-outlined">"close"</span>
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body space-y-4">
                        <label class="form-control">
                            <span class="label-text mb-2">"Title"</span>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="e.g. Overflowing trash bin"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                            />
                        </label>

                        <label class="form-control">
                            <span class="label-text mb-2">"Description"</span>
                            <textarea
                                class="textarea textarea-bordered"
                                rows="4"
                                placeholder="Describe the issue and where it is"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                            ></textarea>
                        </label>

                        <div class="grid grid-cols-2 gap-4">
                            <label class="form-control">
                                <span class="label-text mb-2">"Priority"</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                            set_priority.set(p);
                                        }
                                    }
                                    prop:value=move || priority.get().as_str()
                                >
                                    {PRIORITIES
                                        .iter()
                                        .map(|(p, label)| view! { <option value=p.as_str()>{*label}</option> })
                                        .collect_view()}
                                </select>
                            </label>

                            <label class="form-control">
                                <span class="label-text mb-2">"Difficulty"</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        if let Some(d) = Difficulty::parse(&event_target_value(&ev)) {
                                            set_difficulty.set(d);
                                        }
                                    }
                                    prop:value=move || difficulty.get().as_str()
                                >
                                    {DIFFICULTIES
                                        .iter()
                                        .map(|(d, label)| view! { <option value=d.as_str()>{*label}</option> })
                                        .collect_view()}
                                </select>
                            </label>
                        </div>

                        <div class="alert">
                            <span class="material-symbols-outlined text-warning">"star"</span>
                            <span>"Estimated reward: " {move || points.get()} " points"</span>
                        </div>
                    </div>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary w-full"
                    disabled=move || submitting.get() || photo.with(Option::is_none)
                >
                    <Show when=move || submitting.get()>
                        <span class="loading loading-spinner"></span>
                    </Show>
                    {move || if submitting.get() { "Submitting..." } else { "Submit Report" }}
                </button>
            </form>
        </div>
    }
}
