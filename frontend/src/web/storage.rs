//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，
//! 以及 token 存储与跨标签页 `storage` 事件监听。

use tankas::TokenStore;
use wasm_bindgen::prelude::*;
use web_sys::StorageEvent;

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 基于 LocalStorage 的 token 存储
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        LocalStorage::get(&self.key)
    }

    fn set(&self, token: &str) {
        if !LocalStorage::set(&self.key, token) {
            tankas::log_warn!("[Storage] Failed to persist token");
        }
    }

    fn remove(&self) {
        LocalStorage::delete(&self.key);
    }
}

/// 监听其他标签页对某个键的修改
///
/// `storage` 事件只在其他标签页写入时触发。drop 时移除监听器。
pub struct StorageListener {
    closure: Closure<dyn Fn(StorageEvent)>,
}

impl StorageListener {
    pub fn new<F>(key: &str, callback: F) -> Option<Self>
    where
        F: Fn(Option<String>) + 'static,
    {
        let key = key.to_string();
        let closure = Closure::<dyn Fn(StorageEvent)>::new(move |ev: StorageEvent| {
            if ev.key().as_deref() == Some(key.as_str()) {
                callback(ev.new_value());
            }
        });

        web_sys::window()?
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .ok()?;

        Some(Self { closure })
    }
}

impl Drop for StorageListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "storage",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
