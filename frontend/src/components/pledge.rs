use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::log_error;
use tankas_shared::format::{format_currency, format_datetime};
use tankas_shared::forms::{DEFAULT_REWARD_TYPE, PledgeRequest};
use tankas_shared::{Id, Issue, Pledge, User, user_pledges, volunteer_count};

use crate::api::{TankasApi, use_api, use_task_scope};
use crate::components::page_header::PageHeader;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[derive(Debug, Clone, PartialEq)]
struct PledgeData {
    issue: Issue,
    volunteers: Vec<User>,
    user: Option<User>,
}

/// 认捐列表单独加载，失败时只影响列表区域
async fn fetch_pledges(api: &TankasApi, id: &Id) -> Result<Vec<Pledge>, String> {
    api.issue_pledges(id).await.map_err(|e| {
        log_error!("Failed to load pledges: {}", e);
        "Could not load pledges.".to_string()
    })
}

#[component]
fn PledgeRow(pledge: Pledge) -> impl IntoView {
    let description = pledge
        .reward_description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No reward description provided.".to_string());
    let reward = pledge.reward_type.clone().unwrap_or_else(|| "-".to_string());
    let status = pledge.status.clone().unwrap_or_else(|| "pending".to_string());

    view! {
        <div class="border border-base-300 rounded-box p-3 space-y-1">
            <div class="flex items-center justify-between">
                <p class="text-sm font-semibold">{pledge.pledger_label()}</p>
                <span class="badge badge-primary badge-outline">{status}</span>
            </div>
            <p class="text-sm text-base-content/70">{description}</p>
            <div class="flex flex-wrap gap-3 text-xs text-base-content/60">
                <span>"Amount: " {format_currency(pledge.display_amount())}</span>
                <span>"Reward: " {reward}</span>
                <span>"Created: " {format_datetime(pledge.created_at.as_deref())}</span>
                <span>"Distributed: " {format_datetime(pledge.distributed_at.as_deref())}</span>
            </div>
        </div>
    }
}

#[component]
pub fn PledgePage(id: Id) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();

    let (data, set_data) = signal(Option::<PledgeData>::None);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (pledges, set_pledges) = signal(Vec::<Pledge>::new());
    let (pledges_error, set_pledges_error) = signal(Option::<String>::None);
    let (pledges_loading, set_pledges_loading) = signal(true);

    let (amount, set_amount) = signal(String::new());
    let (note, set_note) = signal(String::new());
    let (reward_type, set_reward_type) = signal(DEFAULT_REWARD_TYPE.to_string());
    let (reward_amount, set_reward_amount) = signal(String::new());
    let (reward_description, set_reward_description) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    // 初始加载：问题、志愿者、当前用户与认捐列表并发
    {
        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        spawn_local(async move {
            let Some((issue, volunteers, me, list)) = scope
                .guard(async {
                    futures::join!(
                        api.issue(&id),
                        api.issue_volunteers(&id),
                        api.current_user(),
                        fetch_pledges(&api, &id)
                    )
                })
                .await
            else {
                return;
            };

            match issue {
                Ok(issue) => set_data.set(Some(PledgeData {
                    issue,
                    // 志愿者与用户加载失败不阻塞页面
                    volunteers: volunteers.unwrap_or_default(),
                    user: me.ok(),
                })),
                Err(e) => {
                    log_error!("Failed to load issue: {}", e);
                    set_load_error.set(Some(e.message().to_string()));
                }
            }
            match list {
                Ok(list) => set_pledges.set(list),
                Err(message) => set_pledges_error.set(Some(message)),
            }
            set_pledges_loading.set(false);
        });
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let request = match PledgeRequest::from_inputs(
            &amount.get_untracked(),
            &note.get_untracked(),
            &reward_type.get_untracked(),
            &reward_amount.get_untracked(),
            &reward_description.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                toast.error(message);
                return;
            }
        };

        let api = api.clone();
        let scope = scope.clone();
        let id = id.clone();
        set_submitting.set(true);
        spawn_local(async move {
            let submitted = scope
                .guard(async {
                    api.pledge(&id, request).await?;
                    // 刷新问题与认捐列表后再跳转
                    let (issue, list) = futures::join!(api.issue(&id), fetch_pledges(&api, &id));
                    Ok::<_, tankas::ApiError>((issue, list))
                })
                .await;
            let Some(submitted) = submitted else {
                return;
            };

            match submitted {
                Ok((issue, list)) => {
                    toast.success("Thank you for pledging!");
                    set_amount.set(String::new());
                    set_note.set(String::new());
                    set_reward_amount.set(String::new());
                    set_reward_description.set(String::new());
                    if let Ok(issue) = issue {
                        set_data.update(|d| {
                            if let Some(d) = d {
                                d.issue = issue;
                            }
                        });
                    }
                    if let Ok(list) = list {
                        set_pledges.set(list);
                    }
                    router.navigate(AppRoute::IssueDetails(id));
                }
                Err(e) => {
                    log_error!("Failed to submit pledge: {}", e);
                    let message = match e.message() {
                        "" => "We could not complete your pledge. Please try again.",
                        m => m,
                    };
                    toast.error(message.to_string());
                }
            }
            set_submitting.set(false);
        });
    };

    let my_pledges = Memo::new(move |_| {
        let user = data.with(|d| d.as_ref().and_then(|d| d.user.clone()));
        pledges.with(|list| {
            user_pledges(list, user.as_ref())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="min-h-screen bg-base-200">
            <PageHeader title="Pledge" />

            <Show
                when=move || data.with(Option::is_some)
                fallback=move || view! {
                    <div class="flex flex-col items-center justify-center py-24 gap-4">
                        <Show
                            when=move || load_error.with(Option::is_some)
                            fallback=|| view! {
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                                <p>"Loading pledge details..."</p>
                            }
                        >
                            <p class="text-error">{move || load_error.get().unwrap_or_default()}</p>
                            <button class="btn" on:click=move |_| router.back()>"Go Back"</button>
                        </Show>
                    </div>
                }
            >
                <main class="max-w-4xl mx-auto p-4 space-y-6">
                    {move || {
                        data.get()
                            .map(|d| {
                                let count = volunteer_count(d.volunteers.len(), Some(&d.issue));
                                let category = d.issue.category.clone().unwrap_or_else(|| "Sanitation".to_string());
                                view! {
                                    <div class="card bg-base-100 shadow image-full">
                                        <figure>
                                            <img
                                                src=d.issue.picture_or_placeholder().to_string()
                                                alt="Issue image"
                                                class="w-full h-52 object-cover"
                                            />
                                        </figure>
                                        <div class="card-body justify-end">
                                            <p class="text-xs uppercase tracking-widest">{category}</p>
                                            <h2 class="card-title text-2xl">{d.issue.title.clone()}</h2>
                                            <p class="text-sm">{d.issue.location.clone().unwrap_or_default()}</p>
                                        </div>
                                    </div>
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body">
                                            <div class="flex items-center justify-between">
                                                <span class="text-sm font-semibold uppercase">"Status"</span>
                                                <span class="badge badge-warning">{d.issue.status_label()}</span>
                                            </div>
                                            <p class="text-sm text-base-content/70">{d.issue.description.clone()}</p>
                                            <div class="stats">
                                                <div class="stat px-0">
                                                    <div class="stat-title">"Volunteers"</div>
                                                    <div class="stat-value text-2xl">{count}</div>
                                                </div>
                                                <div class="stat px-0">
                                                    <div class="stat-title">"Pledged"</div>
                                                    <div class="stat-value text-2xl">
                                                        {format_currency(d.issue.pledged_amount.unwrap_or(0.0))}
                                                    </div>
                                                </div>
                                            </div>
                                        </div>
                                    </div>
                                }
                            })
                    }}

                    <form class="card bg-base-100 shadow" on:submit=on_submit.clone()>
                        <div class="card-body space-y-4">
                            <h3 class="card-title">"Support this effort"</h3>
                            <p class="text-sm text-base-content/70">
                                "All pledges go toward tools, cleanups, and volunteer coordination."
                            </p>
                            <label class="form-control">
                                <span class="label-text mb-2">"Pledge Amount (USD)"</span>
                                <input
                                    type="number"
                                    min="1"
                                    step="1"
                                    class="input input-bordered"
                                    placeholder="Enter amount"
                                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                                    prop:value=amount
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text mb-2">"Message (optional)"</span>
                                <textarea
                                    class="textarea textarea-bordered"
                                    rows="3"
                                    placeholder="Share why this issue matters to you"
                                    on:input=move |ev| set_note.set(event_target_value(&ev))
                                    prop:value=note
                                ></textarea>
                            </label>
                            <label class="form-control">
                                <span class="label-text mb-2">"Reward Type"</span>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    placeholder="Describe the reward item (e.g., custom gear, volunteer dinner)"
                                    on:input=move |ev| set_reward_type.set(event_target_value(&ev))
                                    prop:value=reward_type
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text mb-2">"Reward Amount"</span>
                                <input
                                    type="number"
                                    min="0"
                                    step="1"
                                    class="input input-bordered"
                                    placeholder="0"
                                    on:input=move |ev| set_reward_amount.set(event_target_value(&ev))
                                    prop:value=reward_amount
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text mb-2">"Reward Description (optional)"</span>
                                <textarea
                                    class="textarea textarea-bordered"
                                    rows="2"
                                    placeholder="Describe what donors receive"
                                    on:input=move |ev| set_reward_description.set(event_target_value(&ev))
                                    prop:value=reward_description
                                ></textarea>
                            </label>
                            <button type="submit" class="btn btn-primary w-full" disabled=move || submitting.get()>
                                {move || if submitting.get() { "Submitting..." } else { "Submit Pledge" }}
                            </button>
                        </div>
                    </form>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body space-y-3">
                            <h3 class="card-title">"Your Pledges"</h3>
                            <Show
                                when=move || !pledges_loading.get()
                                fallback=|| view! { <p class="text-sm">"Loading pledges..."</p> }
                            >
                                <Show
                                    when=move || pledges_error.with(Option::is_none)
                                    fallback=move || view! {
                                        <p class="text-sm text-error">{move || pledges_error.get().unwrap_or_default()}</p>
                                    }
                                >
                                    <Show
                                        when=move || my_pledges.with(|p| !p.is_empty())
                                        fallback=|| view! {
                                            <p class="text-sm text-base-content/60">
                                                "No pledges yet. Be the first to contribute!"
                                            </p>
                                        }
                                    >
                                        <For
                                            each=move || my_pledges.get().into_iter().enumerate()
                                            key=|(index, pledge)| pledge.id.list_key(*index)
                                            children=move |(_, pledge)| view! { <PledgeRow pledge=pledge /> }
                                        />
                                    </Show>
                                </Show>
                            </Show>
                        </div>
                    </div>
                </main>
            </Show>
        </div>
    }
}
