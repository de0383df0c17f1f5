use leptos::prelude::*;
use tankas_shared::{Issue, IssueStatus};

use crate::web::route::AppRoute;
use crate::web::router::use_router;

pub fn status_badge_class(status: Option<IssueStatus>) -> &'static str {
    match status {
        Some(IssueStatus::Resolved) => "badge badge-success",
        Some(IssueStatus::InProgress) => "badge badge-warning",
        _ => "badge badge-error",
    }
}

#[component]
pub fn IssueCard(issue: Issue) -> impl IntoView {
    let router = use_router();
    let id = issue.id.clone();
    let badge = status_badge_class(issue.status());
    let points = issue.points_assigned;

    view! {
        <div
            class="card bg-base-100 shadow-md hover:shadow-xl transition-all cursor-pointer"
            on:click=move |_| router.navigate(AppRoute::IssueDetails(id.clone()))
        >
            <figure>
                <img
                    src=issue.picture_or_placeholder().to_string()
                    alt=issue.title.clone()
                    class="w-full h-48 object-cover"
                />
            </figure>
            <div class="card-body p-5">
                <h3 class="card-title">{issue.title.clone()}</h3>
                <p class="text-sm text-base-content/70 line-clamp-2">{issue.description.clone()}</p>
                <div class="flex items-center justify-between mt-2">
                    <div class="flex items-center gap-2">
                        <span class=badge>{issue.status_label()}</span>
                        <Show when=move || { points > 0 }>
                            <span class="badge badge-accent">{points} " Pts"</span>
                        </Show>
                    </div>
                    <div class="flex items-center gap-1 text-sm text-base-content/60">
                        <span class="material-symbols-outlined text-lg">"group"</span>
                        <span>{issue.volunteer_count.unwrap_or(0)}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// 加载中的占位卡片
#[component]
pub fn IssueCardSkeleton() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="skeleton h-48 w-full"></div>
            <div class="card-body p-4 gap-3">
                <div class="skeleton h-6 w-full"></div>
                <div class="skeleton h-4 w-full"></div>
                <div class="skeleton h-4 w-3/4"></div>
            </div>
        </div>
    }
}
