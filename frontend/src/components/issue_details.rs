use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::log_error;
use tankas_shared::format::{format_clock, format_currency};
use tankas_shared::forms::CommentRequest;
use tankas_shared::{Comment, Id, Issue, User, volunteer_count};

use crate::api::{use_api, use_task_scope};
use crate::auth::use_auth;
use crate::components::issue_card::status_badge_class;
use crate::components::page_header::PageHeader;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 单条评论，讨论页共用
#[component]
pub fn CommentItem(comment: Comment) -> impl IntoView {
    let author = comment.user.display_label().to_string();
    let avatar = comment.user.avatar.clone().unwrap_or_default();
    let time = format_clock(comment.created_at.as_deref());

    view! {
        <div class={if comment.is_own { "chat chat-end" } else { "chat chat-start" }}>
            <div class="chat-image avatar">
                <div class="w-10 rounded-full bg-base-300">
                    <img src=avatar alt={format!("{} avatar", author)} />
                </div>
            </div>
            <div class="chat-header">
                {author} <time class="text-xs opacity-50 ml-1">{time}</time>
            </div>
            <div class="chat-bubble">{comment.content}</div>
        </div>
    }
}

#[component]
pub fn IssueDetailsPage(id: Id) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let auth_ctx = use_auth();
    let scope = use_task_scope();
    let api = use_api();

    let (issue, set_issue) = signal(Option::<Issue>::None);
    let (volunteers, set_volunteers) = signal(Vec::<User>::new());
    let (comments, set_comments) = signal(Vec::<Comment>::new());
    let (loading, set_loading) = signal(true);
    let (draft, set_draft) = signal(String::new());
    let (posting, set_posting) = signal(false);

    {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        spawn_local(async move {
            let Some((issue, volunteers, comments)) = scope
                .guard(async {
                    futures::join!(
                        api.issue(&id),
                        api.issue_volunteers(&id),
                        api.issue_comments(&id)
                    )
                })
                .await
            else {
                return;
            };

            match (issue, volunteers, comments) {
                (Ok(issue), Ok(volunteers), Ok(comments)) => {
                    set_issue.set(Some(issue));
                    set_volunteers.set(volunteers);
                    set_comments.set(comments);
                }
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    log_error!("Failed to load issue details: {}", e);
                }
            }
            set_loading.set(false);
        });
    }

    let post_comment = {
        let id = id.clone();
        move || {
            let Some(request) = CommentRequest::from_input(&draft.get_untracked()) else {
                return;
            };
            if posting.get_untracked() {
                return;
            }
            let api = api.clone();
            let scope = scope.clone();
            let id = id.clone();
            set_posting.set(true);
            spawn_local(async move {
                let Some(result) = scope.guard(api.post_comment(&id, request)).await else {
                    return;
                };
                match result {
                    Ok(comment) => {
                        set_comments.update(|list| list.push(comment));
                        set_draft.set(String::new());
                    }
                    Err(e) => {
                        log_error!("Failed to post comment: {}", e);
                        toast.error(e.message());
                    }
                }
                set_posting.set(false);
            });
        }
    };

    // 未登录时先回首页登录
    let go = move |route: AppRoute| {
        if !auth_ctx.is_authenticated() {
            toast.error("Please log in to continue.");
        }
        router.navigate(route);
    };

    let volunteer_route = AppRoute::VolunteerDiscussion(id.clone());
    let resolve_route = AppRoute::ResolveIssue(id.clone());
    let pledge_route = AppRoute::Pledge(id);

    view! {
        <div class="min-h-screen bg-base-200 pb-28">
            <PageHeader title="Issue Details" />
            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-24">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || issue.with(Option::is_some)
                    fallback=|| view! { <p class="text-center py-24 text-lg">"Issue not found"</p> }
                >
                    {move || {
                        issue
                            .get()
                            .map(|issue| {
                                let count = volunteers.with(|v| volunteer_count(v.len(), Some(&issue)));
                                let pledged = format_currency(issue.pledged_amount.unwrap_or(0.0));
                                view! {
                                    <main class="p-4 space-y-6">
                                        <div class="card bg-base-100 shadow">
                                            <div class="card-body">
                                                <div class="flex items-center justify-between">
                                                    <h2 class="card-title text-2xl">{issue.title.clone()}</h2>
                                                    <span class=status_badge_class(issue.status())>
                                                        {issue.status_label()}
                                                    </span>
                                                </div>
                                                <p class="text-base-content/70">{issue.description.clone()}</p>
                                                <div class="flex items-center text-sm text-base-content/60">
                                                    <span class="material-symbols-outlined mr-2">"location_on"</span>
                                                    <span>{issue.location.clone().unwrap_or_default()}</span>
                                                </div>
                                            </div>
                                        </div>

                                        <div class="space-y-2">
                                            <h3 class="text-lg font-bold">"Pictures"</h3>
                                            <img
                                                src=issue.picture_or_placeholder().to_string()
                                                alt="Issue image"
                                                class="w-full h-56 object-cover rounded-box"
                                            />
                                        </div>

                                        <div class="stats shadow w-full bg-base-100">
                                            <div class="stat">
                                                <div class="stat-figure text-primary">
                                                    <span class="material-symbols-outlined text-3xl">"group"</span>
                                                </div>
                                                <div class="stat-value">{count}</div>
                                                <div class="stat-title">"Volunteers"</div>
                                            </div>
                                            <div class="stat">
                                                <div class="stat-figure text-primary">
                                                    <span class="material-symbols-outlined text-3xl">"volunteer_activism"</span>
                                                </div>
                                                <div class="stat-value">{pledged}</div>
                                                <div class="stat-title">"Pledged"</div>
                                            </div>
                                        </div>
                                    </main>
                                }
                            })
                    }}
                </Show>

                <section class="px-4 space-y-4">
                    <h3 class="text-lg font-bold">
                        "Comments (" {move || comments.with(Vec::len)} ")"
                    </h3>
                    <For
                        each=move || comments.get().into_iter().enumerate()
                        key=|(index, comment)| comment.id.list_key(*index)
                        children=move |(_, comment)| view! { <CommentItem comment=comment /> }
                    />
                    <div class="space-y-3 pt-2">
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="3"
                            placeholder="Add a comment..."
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            prop:value=draft
                        ></textarea>
                        <button
                            class="btn btn-primary w-full"
                            disabled=move || posting.get() || draft.with(|d| d.trim().is_empty())
                            on:click={
                                let post_comment = post_comment.clone();
                                move |_| post_comment()
                            }
                        >
                            <span class="material-symbols-outlined">"send"</span>
                            "Post Comment"
                        </button>
                    </div>
                </section>
            </Show>

            <div class="fixed bottom-0 left-0 right-0 z-10 p-4 bg-base-100/90 backdrop-blur-sm">
                <div class="flex gap-3">
                    <button
                        class="btn btn-primary flex-1"
                        on:click={
                            let go = go.clone();
                            move |_| go(volunteer_route.clone())
                        }
                    >
                        <span class="material-symbols-outlined">"pan_tool"</span>
                        "Volunteer"
                    </button>
                    <button
                        class="btn btn-secondary flex-1"
                        on:click={
                            let go = go.clone();
                            move |_| go(pledge_route.clone())
                        }
                    >
                        <span class="material-symbols-outlined">"volunteer_activism"</span>
                        "Pledge"
                    </button>
                    <button class="btn btn-success flex-1" on:click=move |_| go(resolve_route.clone())>
                        <span class="material-symbols-outlined">"done_all"</span>
                        "Resolve"
                    </button>
                </div>
            </div>
        </div>
    }
}
