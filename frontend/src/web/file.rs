//! 文件选择与预览
//!
//! `web_sys::File` 不是 `Send`，不能放进信号；选中后立即读成 `FilePart`，
//! 预览使用 object URL 字符串。

use js_sys::Uint8Array;
use leptos::prelude::event_target;
use tankas::FilePart;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement, Url};

/// 已选中的图片：上传内容 + 预览地址
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub part: FilePart,
    pub preview_url: String,
}

impl SelectedImage {
    /// 释放预览地址
    pub fn release(&self) {
        let _ = Url::revoke_object_url(&self.preview_url);
    }
}

/// 取出 `<input type="file">` change 事件中的第一个文件
pub fn first_file(ev: &Event) -> Option<File> {
    let input = event_target::<HtmlInputElement>(ev);
    let file = input.files()?.get(0);
    // 允许重复选择同一个文件
    input.set_value("");
    file
}

/// 读取文件内容并生成预览地址
pub async fn read_image(file: File) -> Option<SelectedImage> {
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let preview_url = Url::create_object_url_with_blob(&file).ok()?;

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Some(SelectedImage {
        part: FilePart {
            file_name: file.name(),
            content_type,
            bytes,
        },
        preview_url,
    })
}
