use leptos::prelude::*;

use crate::web::router::use_router;

/// 带返回按钮的页面顶栏
#[component]
pub fn PageHeader(
    title: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let router = use_router();

    view! {
        <header class="navbar bg-base-100 sticky top-0 z-40 shadow-sm">
            <div class="navbar-start">
                <button class="btn btn-ghost btn-square" on:click=move |_| router.back()>
                    <span class="material-symbols-outlined">"arrow_back"</span>
                </button>
            </div>
            <div class="navbar-center">
                <h1 class="text-lg font-bold">{title}</h1>
            </div>
            <div class="navbar-end">{children.map(|c| c())}</div>
        </header>
    }
}
