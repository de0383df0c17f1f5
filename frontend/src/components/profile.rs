use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::{ClientConfig, log_error};
use tankas_shared::forms::MAX_DISPLAY_NAME_LEN;
use tankas_shared::{DashboardStats, PROFILE_UPDATED_KEY, User};

use crate::api::{use_api, use_task_scope};
use crate::auth::{logout, use_auth};
use crate::components::bottom_nav::BottomNav;
use crate::components::toast::use_toast;
use crate::web::LocalStorage;
use crate::web::{first_file, read_image};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 通知其他标签页的面板刷新
fn signal_profile_updated(key: &str) {
    LocalStorage::set(key, &js_sys::Date::now().to_string());
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();
    let profile_key = use_context::<ClientConfig>()
        .map(|c| c.profile_signal_key)
        .unwrap_or_else(|| PROFILE_UPDATED_KEY.to_string());

    let (user, set_user) = signal(Option::<User>::None);
    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (edit_mode, set_edit_mode) = signal(false);
    let (display_name, set_display_name) = signal(String::new());
    let (saving, set_saving) = signal(false);
    let (avatar_preview, set_avatar_preview) = signal(Option::<String>::None);

    {
        let api = api.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let Some((me, dashboard)) = scope
                .guard(async { futures::join!(api.current_user(), api.dashboard_stats()) })
                .await
            else {
                return;
            };

            match (me, dashboard) {
                (Ok(me), Ok(dashboard)) => {
                    set_display_name.set(me.display_label().to_string());
                    set_user.set(Some(me));
                    set_stats.set(Some(dashboard));
                }
                (Err(e), _) | (_, Err(e)) => {
                    log_error!("Failed to load profile: {}", e);
                    router.navigate(AppRoute::Home);
                }
            }
        });
    }

    let on_save = {
        let api = api.clone();
        let scope = scope.clone();
        let profile_key = profile_key.clone();
        move |_| {
            let api = api.clone();
            let scope = scope.clone();
            let profile_key = profile_key.clone();
            let name = display_name.get_untracked();
            set_saving.set(true);
            spawn_local(async move {
                let Some(result) = scope.guard(api.update_profile(&name)).await else {
                    return;
                };
                match result {
                    Ok(updated) => {
                        set_user.set(Some(updated));
                        set_edit_mode.set(false);
                        signal_profile_updated(&profile_key);
                        toast.success("Profile updated");
                    }
                    Err(e) => {
                        log_error!("Failed to save profile: {}", e);
                        toast.error(e.message());
                    }
                }
                set_saving.set(false);
            });
        }
    };

    let on_avatar_change = {
        let api = api.clone();
        move |ev: leptos::ev::Event| {
            let Some(file) = first_file(&ev) else {
                return;
            };
            let api = api.clone();
            let scope = scope.clone();
            let profile_key = profile_key.clone();
            spawn_local(async move {
                let Some(image) = read_image(file).await else {
                    toast.error("Could not read the selected image.");
                    return;
                };
                set_avatar_preview.set(Some(image.preview_url.clone()));

                let result = scope.guard(api.upload_avatar(image.part.clone())).await;
                image.release();
                let Some(result) = result else {
                    return;
                };
                set_avatar_preview.set(None);
                match result {
                    Ok(updated) => {
                        set_user.set(Some(updated));
                        signal_profile_updated(&profile_key);
                    }
                    Err(e) => {
                        log_error!("Failed to upload avatar: {}", e);
                        toast.error(e.message());
                    }
                }
            });
        }
    };

    let on_logout = move |_| {
        logout(&auth_ctx, &api);
        router.navigate(AppRoute::Home);
    };

    let shown_name = move || user.with(|u| u.as_ref().map(|u| u.display_label().to_string()).unwrap_or_default());
    let avatar_src = move || {
        avatar_preview
            .get()
            .or_else(|| user.with(|u| u.as_ref().and_then(|u| u.avatar.clone())))
            .unwrap_or_default()
    };

    view! {
        <Show
            when=move || user.with(Option::is_some) && stats.with(Option::is_some)
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <div class="min-h-screen bg-base-200 pb-20">
                <div class="bg-base-100 shadow-sm py-8">
                    <div class="max-w-md mx-auto text-center">
                        <button class="btn btn-ghost btn-square mb-4" on:click=move |_| router.back()>
                            <span class="material-symbols-outlined">"arrow_back"</span>
                        </button>
                        <div class="avatar relative">
                            <div class="w-24 rounded-full bg-base-300">
                                <img src=avatar_src alt="Profile avatar" />
                            </div>
                            <label
                                class="btn btn-circle btn-sm btn-primary absolute bottom-0 right-0"
                                title="Change avatar"
                            >
                                <span class="material-symbols-outlined">"camera_alt"</span>
                                <input
                                    type="file"
                                    accept="image/*"
                                    class="hidden"
                                    on:change=on_avatar_change.clone()
                                />
                            </label>
                        </div>
                        <h1 class="text-2xl font-bold mt-4">{shown_name}</h1>
                    </div>
                </div>

                <div class="max-w-md mx-auto p-4 space-y-4">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            {
                                let on_save = on_save.clone();
                                view! {
                                    <Show
                                        when=move || edit_mode.get()
                                        fallback=move || view! {
                                            <div class="flex justify-between">
                                                <span class="text-base-content/60">"Display Name"</span>
                                                <span class="font-medium">{shown_name}</span>
                                            </div>
                                            <button class="btn btn-secondary w-full" on:click=move |_| set_edit_mode.set(true)>
                                                <span class="material-symbols-outlined">"edit"</span>
                                                "Edit Profile"
                                            </button>
                                        }
                                    >
                                        <h2 class="card-title">"Edit Profile"</h2>
                                        <label class="form-control">
                                            <span class="label-text mb-2">"Display Name"</span>
                                            <input
                                                type="text"
                                                class="input input-bordered"
                                                placeholder="Enter your display name"
                                                maxlength=MAX_DISPLAY_NAME_LEN.to_string()
                                                on:input=move |ev| set_display_name.set(event_target_value(&ev))
                                                prop:value=display_name
                                            />
                                        </label>
                                        <div class="card-actions justify-end">
                                            <button class="btn" on:click=move |_| set_edit_mode.set(false)>"Cancel"</button>
                                            <button class="btn btn-primary" disabled=move || saving.get() on:click=on_save.clone()>
                                                {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                            </button>
                                        </div>
                                    </Show>
                                }
                            }
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">"Statistics"</h2>
                            <div class="flex justify-between">
                                <span class="text-base-content/60">"Points"</span>
                                <span>{move || user.with(|u| u.as_ref().map(|u| u.points).unwrap_or(0))}</span>
                            </div>
                            <div class="flex justify-between">
                                <span class="text-base-content/60">"Issues Reported"</span>
                                <span>{move || stats.with(|s| s.as_ref().map(|s| s.tasks_reported).unwrap_or(0))}</span>
                            </div>
                            <div class="flex justify-between">
                                <span class="text-base-content/60">"Tasks Completed"</span>
                                <span>{move || stats.with(|s| s.as_ref().map(|s| s.tasks_completed).unwrap_or(0))}</span>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">"Account"</h2>
                            <div class="flex justify-between">
                                <span class="text-base-content/60">"Username"</span>
                                <span>{move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default())}</span>
                            </div>
                            <div class="flex justify-between">
                                <span class="text-base-content/60">"Email"</span>
                                <span>{move || user.with(|u| u.as_ref().and_then(|u| u.email.clone()).unwrap_or_default())}</span>
                            </div>
                            <button class="btn btn-outline btn-error w-full mt-2" on:click=on_logout.clone()>
                                <span class="material-symbols-outlined">"logout"</span>
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>

                <BottomNav active=AppRoute::Profile />
            </div>
        </Show>
    }
}
