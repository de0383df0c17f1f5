//! HTTP 传输模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`。
//! JSON 请求体以字符串发送；multipart 请求体转换为 `FormData`，
//! 由浏览器自行生成带 boundary 的 Content-Type。

use js_sys::{Array, Uint8Array};
use tankas::request::FormField;
use tankas::{ApiError, ApiResult, FilePart, HttpClient, HttpRequest, HttpResponse, MultipartForm, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn js_err(context: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {:?}", context, e))
}

/// 将内存中的文件转换为 Blob
fn file_to_blob(file: &FilePart) -> Result<Blob, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()).into());

    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

fn to_form_data(form: &MultipartForm) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, field) in form.fields() {
        match field {
            FormField::Text(value) => data.append_with_str(name, value)?,
            FormField::File(file) => {
                let blob = file_to_blob(file)?;
                data.append_with_blob_and_filename(name, &blob, &file.file_name)?
            }
        }
    }
    Ok(data)
}

/// 基于 window.fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    async fn read_text(response: &Response) -> ApiResult<String> {
        let promise = response
            .text()
            .map_err(|e| ApiError::decode(format!("读取响应失败: {:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::decode(format!("读取响应失败: {:?}", e)))?;

        Ok(text.as_string().unwrap_or_default())
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| js_err("创建 Headers 失败", e))?;
        for (key, value) in req.headers.iter() {
            headers
                .set(key, value)
                .map_err(|e| js_err("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Multipart(form) => {
                let data = to_form_data(form).map_err(|e| js_err("构建表单失败", e))?;
                opts.set_body(&data.into());
            }
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_err("构建请求失败", e))?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("Failed to fetch", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::decode(format!("Response 类型转换失败: {:?}", e)))?;

        let body = Self::read_text(&response).await?;

        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }
}
