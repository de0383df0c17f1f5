use leptos::prelude::*;
use leptos::task::spawn_local;
use tankas::log_error;
use tankas_shared::Issue;

use crate::api::{use_api, use_task_scope};
use crate::components::issue_card::{IssueCard, IssueCardSkeleton};
use crate::components::page_header::PageHeader;

#[component]
pub fn AllIssuesPage() -> impl IntoView {
    let scope = use_task_scope();
    let api = use_api();

    let (issues, set_issues) = signal(Vec::<Issue>::new());
    let (loading, set_loading) = signal(true);
    let (query, set_query) = signal(String::new());

    spawn_local(async move {
        let Some(result) = scope.guard(api.load_all_issues()).await else {
            return;
        };
        match result {
            Ok(data) => set_issues.set(data),
            Err(e) => log_error!("Failed to load issues: {}", e),
        }
        set_loading.set(false);
    });

    // 客户端过滤
    let filtered = Memo::new(move |_| {
        let query = query.get();
        issues.with(|list| {
            list.iter()
                .filter(|issue| issue.matches_query(&query))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <PageHeader title="All Issues" />

            <div class="py-20 text-center bg-base-100 border-b border-base-300">
                <h1 class="text-5xl font-bold mb-4">"All Community Issues"</h1>
                <p class="text-lg text-base-content/70 max-w-2xl mx-auto">
                    "Explore every reported sanitation issue and find a cleanup effort near you."
                </p>
            </div>

            <div class="px-4 py-16 max-w-7xl mx-auto w-full">
                <div class="mb-10 p-4 bg-base-100 rounded-box shadow-md flex gap-4">
                    <label class="input input-bordered flex items-center gap-2 flex-1">
                        <span class="material-symbols-outlined">"search"</span>
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by title or description..."
                            on:input=move |ev| set_query.set(event_target_value(&ev))
                            prop:value=query
                        />
                    </label>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                    <Show
                        when=move || !loading.get()
                        fallback=|| (0..4).map(|_| view! { <IssueCardSkeleton /> }).collect_view()
                    >
                        <For
                            each=move || filtered.get().into_iter().enumerate()
                            key=|(index, issue)| issue.id.list_key(*index)
                            children=move |(_, issue)| view! { <IssueCard issue=issue /> }
                        />
                    </Show>
                </div>

                <Show when=move || !loading.get() && filtered.with(Vec::is_empty)>
                    <p class="text-center mt-10 text-base-content/60">"No issues match your search."</p>
                </Show>
            </div>

            <footer class="footer footer-center bg-base-300 p-8 mt-16">
                <p>"© 2025 Tankas. Making communities cleaner, together."</p>
            </footer>
        </div>
    }
}
