//! 浏览器端 API 客户端装配
//!
//! 客户端本身无状态：token 每次请求时从 LocalStorage 读取，
//! 因此各组件可以随时构造自己的实例。

use leptos::prelude::*;
use tankas::{ApiClient, ClientConfig, TaskScope};

use crate::web::{FetchHttpClient, LocalStorageTokenStore};

pub type TankasApi = ApiClient<FetchHttpClient, LocalStorageTokenStore>;

pub fn create_api(config: &ClientConfig) -> TankasApi {
    ApiClient::new(
        config,
        FetchHttpClient,
        LocalStorageTokenStore::new(&config.token_key),
    )
}

/// 从 Context 中的配置构造 API 客户端
pub fn use_api() -> TankasApi {
    let config = use_context::<ClientConfig>().unwrap_or_else(ClientConfig::from_build_env);
    create_api(&config)
}

/// 创建随当前组件销毁而取消的任务作用域
pub fn use_task_scope() -> TaskScope {
    let scope = TaskScope::new();
    let on_unmount = scope.clone();
    on_cleanup(move || on_unmount.cancel());
    scope
}
