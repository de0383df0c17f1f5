//! `setInterval` 封装，用于页面内的周期刷新

use std::cell::Cell;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// 周期性定时器，drop 时自动清除
pub struct Interval {
    handle: Cell<Option<i32>>,
    _callback: Closure<dyn Fn()>,
}

impl Interval {
    /// 无法获取 window 或注册失败时返回 `None`
    pub fn new<F>(period: Duration, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let callback = Closure::<dyn Fn()>::new(callback);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);

        let handle = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .ok()?;

        Some(Self {
            handle: Cell::new(Some(handle)),
            _callback: callback,
        })
    }

    /// 可重复调用
    pub fn cancel(&self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
