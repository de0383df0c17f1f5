//! Tankas 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: API 客户端装配（核心请求管线来自 `tankas` crate）
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod all_issues;
    pub mod auth_modal;
    pub mod bottom_nav;
    pub mod dashboard;
    pub mod home;
    pub mod issue_card;
    pub mod issue_details;
    pub mod page_header;
    pub mod pledge;
    pub mod profile;
    pub mod report_issue;
    pub mod resolve_issue;
    pub mod toast;
    pub mod volunteer_discussion;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::all_issues::AllIssuesPage;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::issue_details::IssueDetailsPage;
use crate::components::pledge::PledgePage;
use crate::components::profile::ProfilePage;
use crate::components::report_issue::ReportIssuePage;
use crate::components::resolve_issue::ResolveIssuePage;
use crate::components::toast::{ToastContext, ToastHost};
use crate::components::volunteer_discussion::VolunteerDiscussionPage;

use leptos::prelude::*;
use tankas::ClientConfig;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod file;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use file::{SelectedImage, first_file, read_image};
    pub use http::FetchHttpClient;
    pub use storage::{LocalStorage, LocalStorageTokenStore, StorageListener};
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::AllIssues => view! { <AllIssuesPage /> }.into_any(),
        AppRoute::IssueDetails(id) => view! { <IssueDetailsPage id=id /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::ReportIssue => view! { <ReportIssuePage /> }.into_any(),
        AppRoute::ResolveIssue(id) => view! { <ResolveIssuePage id=id /> }.into_any(),
        AppRoute::VolunteerDiscussion(id) => {
            view! { <VolunteerDiscussionPage id=id /> }.into_any()
        }
        AppRoute::Pledge(id) => view! { <PledgePage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <a class="btn btn-primary mt-6" href="/">"Back to Home"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置（API 地址、存储键）
    let config = ClientConfig::from_build_env();
    provide_context(config.clone());

    // 2. 全局提示
    provide_context(ToastContext::new());

    // 3. 创建认证上下文并从 LocalStorage 加载 token
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, &config);

    // 4. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
