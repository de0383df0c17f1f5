//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use leptos::prelude::*;
use tankas::{ApiResult, ClientConfig, TokenStore, log_info};
use tankas_shared::AuthResponse;
use tankas_shared::forms::SignupRequest;

use crate::api::TankasApi;
use crate::web::{LocalStorageTokenStore, StorageListener};

/// 认证上下文
///
/// 持有当前 token 的读写信号，通过 Context 在组件间共享。
/// token 的持久化由 `LocalStorageTokenStore` 负责，信号只是它的镜像。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub token: ReadSignal<Option<String>>,
    set_token: WriteSignal<Option<String>>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (token, set_token) = signal(None);
        Self { token, set_token }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.with(|t| t.as_deref().is_some_and(|t| !t.is_empty())))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .with_untracked(|t| t.as_deref().is_some_and(|t| !t.is_empty()))
    }

    fn store(&self, api: &TankasApi, auth: &AuthResponse) {
        api.set_token(&auth.access_token);
        self.set_token.set(Some(auth.access_token.clone()));
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 加载 token，并同步其他标签页的登录/登出。
pub fn init_auth(ctx: &AuthContext, config: &ClientConfig) {
    let store = LocalStorageTokenStore::new(&config.token_key);
    ctx.set_token.set(store.get());

    let set_token = ctx.set_token;
    let listener = StorageListener::new(&config.token_key, move |value| {
        log_info!("[Auth] Token changed in another tab");
        set_token.set(value);
    });
    // 随根组件存活
    let _listener = StoredValue::new_local(listener);
}

/// 登录并保存 token
pub async fn login(
    ctx: &AuthContext,
    api: &TankasApi,
    username: &str,
    password: &str,
) -> ApiResult<()> {
    let auth = api.login(username, password).await?;
    ctx.store(api, &auth);
    Ok(())
}

/// 注册并保存 token
pub async fn signup(ctx: &AuthContext, api: &TankasApi, form: &SignupRequest) -> ApiResult<()> {
    let auth = api
        .signup(
            &form.username,
            &form.email,
            &form.password,
            form.display_name.as_deref(),
        )
        .await?;
    ctx.store(api, &auth);
    Ok(())
}

/// 注销并清除 token
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext, api: &TankasApi) {
    api.clear_token();
    ctx.set_token.set(None);
}
