use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use tankas::log_error;
use tankas_shared::Issue;

use crate::api::{use_api, use_task_scope};
use crate::auth::{self, use_auth};
use crate::components::auth_modal::{AuthForm, AuthMode, AuthModal};
use crate::components::issue_card::{IssueCard, IssueCardSkeleton};
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const RECENT_ISSUE_LIMIT: u32 = 3;
const REDIRECT_DELAY: Duration = Duration::from_millis(500);

#[component]
pub fn HomePage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();
    let toast = use_toast();
    let scope = use_task_scope();
    let api = use_api();
    let is_logged_in = auth_ctx.is_authenticated_signal();

    let (recent, set_recent) = signal(Vec::<Issue>::new());
    let (loading, set_loading) = signal(true);
    let (modal, set_modal) = signal(Option::<AuthMode>::None);
    let (submitting, set_submitting) = signal(false);

    // 初始加载
    {
        let api = api.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let Some(result) = scope.guard(api.load_recent_issues(RECENT_ISSUE_LIMIT)).await else {
                return;
            };
            match result {
                Ok(issues) => set_recent.set(issues),
                Err(e) => log_error!("Failed to load issues: {}", e),
            }
            set_loading.set(false);
        });
    }

    let handle_submit = move |form: AuthForm| {
        let api = api.clone();
        let scope = scope.clone();
        set_submitting.set(true);

        spawn_local(async move {
            let outcome = match &form {
                AuthForm::Signup(req) => scope.guard(auth::signup(&auth_ctx, &api, req)).await,
                AuthForm::Login(req) => {
                    scope
                        .guard(auth::login(&auth_ctx, &api, &req.username, &req.password))
                        .await
                }
            };
            let Some(outcome) = outcome else {
                return;
            };

            match outcome {
                Ok(()) => {
                    match form {
                        AuthForm::Signup(_) => {
                            toast.success("🎉 Welcome to Tankas! Your account has been created.")
                        }
                        AuthForm::Login(_) => toast.success("👋 Welcome back to Tankas!"),
                    }
                    set_modal.set(None);
                    set_timeout(move || router.navigate(AppRoute::Dashboard), REDIRECT_DELAY);
                }
                Err(e) => {
                    let fallback = match form {
                        AuthForm::Signup(_) => "Signup failed. Please try again.",
                        AuthForm::Login(_) => "Login failed. Check your credentials.",
                    };
                    if e.message().is_empty() {
                        toast.error(fallback);
                    } else {
                        toast.error(e.message());
                    }
                }
            }
            set_submitting.set(false);
        });
    };

    let on_main_cta = move |_| {
        if is_logged_in.get_untracked() {
            router.navigate(AppRoute::Dashboard);
        } else {
            set_modal.set(Some(AuthMode::Signup));
        }
    };

    let on_login_cta = move |_| {
        if is_logged_in.get_untracked() {
            router.navigate(AppRoute::ReportIssue);
        } else {
            set_modal.set(Some(AuthMode::Login));
        }
    };

    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <div class="hero min-h-[600px] bg-[url('/assets/imgs/hero.jpg')] bg-cover bg-center">
                <div class="hero-overlay bg-black/60"></div>
                <div class="hero-content text-center text-neutral-content">
                    <div class="max-w-2xl">
                        <h1 class="text-4xl font-bold mb-6">"Cleaner Communities, Together."</h1>
                        <p class="text-xl mb-8">
                            "Report sanitation issues, volunteer for cleanups, and make a real impact in your community."
                        </p>
                        <div class="flex flex-col md:flex-row gap-4 max-w-md mx-auto">
                            <button class="btn btn-primary btn-lg flex-1" on:click=on_main_cta>
                                {move || if is_logged_in.get() { "Go to Dashboard" } else { "Join the Movement" }}
                            </button>
                            <button class="btn btn-outline btn-lg flex-1 text-white" on:click=on_login_cta>
                                {move || if is_logged_in.get() { "Report New Issue" } else { "Log In" }}
                            </button>
                        </div>
                        <div class="mt-12 flex items-center justify-center gap-2">
                            <span class="material-symbols-outlined text-warning">"star"</span>
                            <p class="text-lg italic">"\"Snap.Share.Clean!\""</p>
                        </div>
                    </div>
                </div>
            </div>

            <section class="px-4 py-16 max-w-7xl mx-auto w-full">
                <div class="text-center mb-12">
                    <h2 class="text-4xl font-bold mb-4">"Recent Community Reports"</h2>
                    <p class="text-lg text-base-content/70">"See what your neighbors are working on"</p>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <Show
                        when=move || !loading.get()
                        fallback=|| (0..RECENT_ISSUE_LIMIT).map(|_| view! { <IssueCardSkeleton /> }).collect_view()
                    >
                        <Show
                            when=move || recent.with(|r| !r.is_empty())
                            fallback=|| view! {
                                <div class="col-span-full text-center py-12 text-base-content/60 text-lg">
                                    "✨ No active reports nearby. Your community is clean!"
                                </div>
                            }
                        >
                            <For
                                each=move || recent.get().into_iter().enumerate()
                                key=|(index, issue)| issue.id.list_key(*index)
                                children=move |(_, issue)| view! { <IssueCard issue=issue /> }
                            />
                        </Show>
                    </Show>
                </div>

                <div class="text-center mt-8">
                    <button class="btn btn-primary" on:click=move |_| router.navigate(AppRoute::AllIssues)>
                        "View All Reports"
                    </button>
                </div>
            </section>

            <footer class="footer footer-center bg-base-300 p-8 mt-16">
                <p>"© 2025 Tankas. Making communities cleaner, together."</p>
            </footer>

            {move || {
                modal
                    .get()
                    .map(|mode| {
                        view! {
                            <AuthModal
                                mode=mode
                                busy=submitting
                                on_close=move |_| set_modal.set(None)
                                on_submit=handle_submit.clone()
                            />
                        }
                    })
            }}
        </div>
    }
}
