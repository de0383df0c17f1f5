//! 路由服务
//!
//! 所有对 window.history / location 的访问集中在此。
//! 每次路由变化（初始加载、站内跳转、浏览器前进后退、登出）都先经过
//! `AppRoute::guarded`，被拦截时用 replace 改写地址栏。

use leptos::prelude::*;
use tankas::log_info;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

#[derive(Clone, Copy)]
enum HistoryMode {
    Push,
    Replace,
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(route: &AppRoute, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = route.to_path();
    let _ = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(&path)),
    };
}

/// 路由器服务
///
/// 认证状态以信号注入，路由层不依赖 auth 模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = AppRoute::from_path(&current_path())
            .guarded(is_authenticated.get_untracked())
            .unwrap_or_else(|redirect| {
                write_history(&redirect, HistoryMode::Replace);
                redirect
            });
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 守卫后切换路由；`mode` 决定放行时写入 history 的方式
    fn apply(&self, target: AppRoute, mode: HistoryMode) {
        let route = match target.clone().guarded(self.is_authenticated.get_untracked()) {
            Ok(route) => {
                write_history(&route, mode);
                route
            }
            Err(redirect) => {
                log_info!("[Router] {} requires login, redirecting to {}", target, redirect);
                write_history(&redirect, HistoryMode::Replace);
                redirect
            }
        };
        self.set_route.set(route);
    }

    /// 站内跳转
    pub fn navigate(&self, target: AppRoute) {
        self.apply(target, HistoryMode::Push);
    }

    /// 浏览器后退；没有可后退的记录时回首页
    pub fn back(&self) {
        let went_back = web_sys::window()
            .and_then(|w| w.history().ok())
            .is_some_and(|h| h.length().unwrap_or(0) > 1 && h.back().is_ok());

        if !went_back {
            self.navigate(AppRoute::Home);
        }
    }

    /// 浏览器前进/后退：地址栏已经变化，只需重新守卫
    fn listen_popstate(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(AppRoute::from_path(&current_path()), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与应用同寿命
        closure.forget();
    }

    /// 登出（包括其他标签页登出）时离开受保护页面
    fn follow_auth_state(&self) {
        let router = *self;
        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            if !is_auth && route.requires_auth() {
                log_info!("[Router] Logged out on {}", route);
                router.apply(route, HistoryMode::Replace);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.listen_popstate();
    router.follow_auth_state();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 路由器根组件，提供路由上下文
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 根据当前路由渲染页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}
