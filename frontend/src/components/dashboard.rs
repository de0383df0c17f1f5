use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::{ClientConfig, log_error, log_info};
use tankas_shared::{DashboardStats, User};

use crate::api::{use_api, use_task_scope};
use crate::auth::{logout, use_auth};
use crate::components::bottom_nav::BottomNav;
use crate::components::toast::use_toast;
use crate::web::StorageListener;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();

    let (user, set_user) = signal(Option::<User>::None);
    let (stats, set_stats) = signal(DashboardStats::default());
    let (loading, set_loading) = signal(true);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let scope = scope.clone();
            set_loading.set(true);
            spawn_local(async move {
                let Some((me, dashboard)) = scope
                    .guard(async { futures::join!(api.current_user(), api.dashboard_stats()) })
                    .await
                else {
                    return;
                };

                match (me, dashboard) {
                    (Ok(me), Ok(dashboard)) => {
                        set_user.set(Some(me));
                        set_stats.set(dashboard);
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        log_error!("Failed to load dashboard: {}", e);
                        toast.error(e.message());
                    }
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    load();

    // 个人资料在其他标签页更新后刷新
    let profile_key = use_context::<ClientConfig>()
        .map(|c| c.profile_signal_key)
        .unwrap_or_else(|| tankas_shared::PROFILE_UPDATED_KEY.to_string());
    let listener = StorageListener::new(&profile_key, {
        let load = load.clone();
        move |_| {
            log_info!("[Dashboard] Profile updated elsewhere, reloading");
            load();
        }
    });
    let _listener = StoredValue::new_local(listener);

    let on_logout = move |_| {
        logout(&auth_ctx, &api);
        router.navigate(AppRoute::Home);
    };

    let name = move || {
        if loading.get() && user.with(Option::is_none) {
            "Loading...".to_string()
        } else {
            user.with(|u| u.as_ref().map(|u| u.display_label().to_string()).unwrap_or_default())
        }
    };
    let points = move || {
        let points = user.with(|u| u.as_ref().map(|u| u.points)).unwrap_or(0);
        format!("{} Points", points)
    };
    let avatar = move || user.with(|u| u.as_ref().and_then(|u| u.avatar.clone()));

    view! {
        <div class="min-h-screen bg-base-200 pb-20">
            <div class="navbar bg-base-100 sticky top-0 z-40 shadow-sm">
                <div class="flex-1 gap-4">
                    <div class="avatar">
                        <div class="w-12 rounded-full bg-base-300">
                            <Show when=move || avatar().is_some()>
                                <img src=move || avatar().unwrap_or_default() alt="Avatar" />
                            </Show>
                        </div>
                    </div>
                    <div>
                        <h2 class="text-lg font-bold">{name}</h2>
                        <p class="text-primary text-sm font-medium">{points}</p>
                    </div>
                </div>
                <div class="flex-none gap-2">
                    <button
                        class="btn btn-ghost btn-square"
                        disabled=move || loading.get()
                        on:click={
                            let load = load.clone();
                            move |_| load()
                        }
                    >
                        <span class=move || {
                            if loading.get() {
                                "material-symbols-outlined animate-spin"
                            } else {
                                "material-symbols-outlined"
                            }
                        }>"refresh"</span>
                    </button>
                    <button class="btn btn-ghost btn-square" on:click=on_logout>
                        <span class="material-symbols-outlined">"logout"</span>
                    </button>
                </div>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100 mt-4">
                <div class="stat">
                    <div class="stat-value">{move || stats.with(|s| s.tasks_completed)}</div>
                    <div class="stat-title">"Tasks Completed"</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{move || stats.with(|s| s.tasks_reported)}</div>
                    <div class="stat-title">"Issues Reported"</div>
                </div>
                <div class="stat">
                    <div class="stat-value">{move || stats.with(DashboardStats::rank_label)}</div>
                    <div class="stat-title">"Community Rank"</div>
                </div>
            </div>

            <div class="flex gap-4 px-4 py-3">
                <button class="btn btn-primary flex-1" on:click=move |_| router.navigate(AppRoute::ReportIssue)>
                    <span class="material-symbols-outlined">"add_circle"</span>
                    "Report Issue"
                </button>
                <button class="btn btn-secondary flex-1" on:click=move |_| router.navigate(AppRoute::AllIssues)>
                    <span class="material-symbols-outlined">"search"</span>
                    "Find a Task"
                </button>
            </div>

            <BottomNav active=AppRoute::Dashboard />
        </div>
    }
}
