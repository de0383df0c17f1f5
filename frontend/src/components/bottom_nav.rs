use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::use_router;

const NAV_ITEMS: [(&str, &str, AppRoute); 4] = [
    ("dashboard", "Dashboard", AppRoute::Dashboard),
    ("map", "Issues", AppRoute::AllIssues),
    ("add_circle", "Report", AppRoute::ReportIssue),
    ("person", "Profile", AppRoute::Profile),
];

#[component]
pub fn BottomNav(active: AppRoute) -> impl IntoView {
    let router = use_router();

    let items = NAV_ITEMS
        .into_iter()
        .map(|(icon, label, route)| {
            let class = if route == active { "active text-primary" } else { "" };
            view! {
                <button class=class on:click=move |_| router.navigate(route.clone())>
                    <span class="material-symbols-outlined">{icon}</span>
                    <span class="btm-nav-label text-xs">{label}</span>
                </button>
            }
        })
        .collect_view();

    view! { <nav class="btm-nav z-50 shadow-lg">{items}</nav> }
}
