use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use tankas::{log_error, log_warn};
use tankas_shared::forms::CommentRequest;
use tankas_shared::{Comment, Id, Issue};

use crate::api::{use_api, use_task_scope};
use crate::components::issue_details::CommentItem;
use crate::components::toast::use_toast;
use crate::web::Interval;
use crate::web::router::use_router;

const POLL_INTERVAL: Duration = Duration::from_secs(15);

#[component]
pub fn VolunteerDiscussionPage(id: Id) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();

    let (issue, set_issue) = signal(Option::<Issue>::None);
    let (messages, set_messages) = signal(Vec::<Comment>::new());
    let (loading, set_loading) = signal(true);
    let (draft, set_draft) = signal(String::new());
    let (show_modal, set_show_modal) = signal(false);
    let (volunteering, set_volunteering) = signal(false);

    // 初始加载
    {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        spawn_local(async move {
            let Some((issue, comments)) = scope
                .guard(async { futures::join!(api.issue(&id), api.issue_comments(&id)) })
                .await
            else {
                return;
            };

            match (issue, comments) {
                (Ok(issue), Ok(comments)) => {
                    set_issue.set(Some(issue));
                    set_messages.set(comments);
                }
                (Err(e), _) | (_, Err(e)) => {
                    log_error!("Failed to load discussion: {}", e);
                    toast.error(e.message());
                }
            }
            set_loading.set(false);
        });
    }

    // 定时刷新评论
    let poller = Interval::new(POLL_INTERVAL, {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        move || {
            let api = api.clone();
            let scope = scope.clone();
            let id = id.clone();
            spawn_local(async move {
                match scope.guard(api.issue_comments(&id)).await {
                    Some(Ok(comments)) => set_messages.set(comments),
                    Some(Err(e)) => log_warn!("Comment poll failed: {}", e),
                    None => {}
                }
            });
        }
    });
    let _poller = StoredValue::new_local(poller);

    let send_message = {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        move || {
            let Some(request) = CommentRequest::from_input(&draft.get_untracked()) else {
                return;
            };
            let api = api.clone();
            let scope = scope.clone();
            let id = id.clone();
            spawn_local(async move {
                let Some(result) = scope.guard(api.post_comment(&id, request)).await else {
                    return;
                };
                match result {
                    Ok(comment) => {
                        set_messages.update(|list| list.push(comment));
                        set_draft.set(String::new());
                    }
                    Err(e) => {
                        log_error!("Failed to send message: {}", e);
                        toast.error(e.message());
                    }
                }
            });
        }
    };

    let confirm_volunteer = move |_| {
        if volunteering.get_untracked() {
            return;
        }
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        set_volunteering.set(true);
        spawn_local(async move {
            let Some(result) = scope.guard(api.volunteer(&id)).await else {
                return;
            };
            match result {
                Ok(_) => {
                    set_show_modal.set(false);
                    toast.success("Thanks for volunteering!");
                }
                Err(e) => {
                    log_error!("Failed to volunteer: {}", e);
                    toast.error(e.message());
                }
            }
            set_volunteering.set(false);
        });
    };

    let title = move || issue.with(|i| i.as_ref().map(|i| i.title.clone()).unwrap_or_default());
    let active = move || {
        let count = issue.with(|i| i.as_ref().and_then(|i| i.volunteer_count).unwrap_or(0));
        format!("{} Active Volunteers", count)
    };

    view! {
        <div class="flex flex-col h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-none">
                    <button class="btn btn-ghost btn-square" on:click=move |_| router.back()>
                        <span class="material-symbols-outlined">"arrow_back"</span>
                    </button>
                </div>
                <div class="flex-1 flex-col items-start">
                    <h1 class="font-bold text-lg">{title}</h1>
                    <p class="text-sm text-primary">{active}</p>
                </div>
                <div class="flex-none">
                    <button
                        class="btn btn-ghost btn-square"
                        title="Volunteer"
                        on:click=move |_| set_show_modal.set(true)
                    >
                        <span class="material-symbols-outlined">"pan_tool"</span>
                    </button>
                </div>
            </div>

            <main class="flex-1 overflow-y-auto p-4 space-y-2">
                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-24">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <Show
                        when=move || messages.with(|m| !m.is_empty())
                        fallback=|| view! {
                            <p class="text-center py-12 text-base-content/60">
                                "No messages yet. Start the conversation!"
                            </p>
                        }
                    >
                        <For
                            each=move || messages.get().into_iter().enumerate()
                            key=|(index, comment)| comment.id.list_key(*index)
                            children=move |(_, comment)| view! { <CommentItem comment=comment /> }
                        />
                    </Show>
                </Show>
            </main>

            <footer class="p-3 bg-base-100 border-t border-base-300">
                <div class="flex items-center gap-2">
                    <input
                        type="text"
                        class="input input-bordered flex-1"
                        placeholder="Type a message..."
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:keydown={
                            let send_message = send_message.clone();
                            move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    send_message();
                                }
                            }
                        }
                        prop:value=draft
                    />
                    <button
                        class="btn btn-primary btn-circle"
                        disabled=move || draft.with(|d| d.trim().is_empty())
                        on:click=move |_| send_message()
                    >
                        <span class="material-symbols-outlined">"send"</span>
                    </button>
                </div>
            </footer>

            <Show when=move || show_modal.get()>
                <div class="modal modal-open">
                    <div class="modal-box">
                        <button
                            class="btn btn-sm btn-circle btn-ghost absolute right-3 top-3"
                            on:click=move |_| set_show_modal.set(false)
                        >
                            <span class="material-symbols-outlined">"close"</span>
                        </button>
                        <h3 class="text-lg font-bold">"Confirm Volunteering"</h3>
                        <p class="py-4">"Are you sure you want to volunteer for this issue?"</p>
                        <div class="modal-action">
                            <button class="btn" on:click=move |_| set_show_modal.set(false)>"Cancel"</button>
                            <button
                                class="btn btn-primary"
                                disabled=move || volunteering.get()
                                on:click=confirm_volunteer.clone()
                            >
                                "Yes, Volunteer"
                            </button>
                        </div>
                    </div>
                    <div class="modal-backdrop" on:click=move |_| set_show_modal.set(false)></div>
                </div>
            </Show>
        </div>
    }
}
