//! OCR 服务客户端
//!
//! 只有一个请求：`POST /api/ocr-process`，multipart 字段 `image_file`

use crate::upload::PendingUpload;
use serde::Deserialize;
use url::Url;

pub const OCR_ENDPOINT: &str = "/api/ocr-process";
pub const IMAGE_FIELD: &str = "image_file";

/// 服务端 JSON 响应（成功带 `structured_text`，失败可能带 `error`）
#[derive(Debug, Default, Deserialize)]
struct OcrResponse {
    structured_text: Option<String>,
    error: Option<String>,
}

/// 非 2xx 且服务端没有给出 `error` 时的提示
pub fn status_message(status: u16) -> String {
    format!("HTTP 错误，状态码: {}", status)
}

#[derive(Debug, Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl OcrClient {
    pub fn new(server: &Url) -> Result<Self, String> {
        let endpoint = server
            .join(OCR_ENDPOINT)
            .map_err(|e| format!("Invalid OCR server URL {}: {}", server, e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// 提交图片，返回识别出的文本（原样，不做任何处理）
    ///
    /// 错误字符串可以直接显示给用户：优先用服务端的 `error`，
    /// 否则根据状态码生成。
    pub async fn process(&self, upload: &PendingUpload) -> Result<String, String> {
        let part = reqwest::multipart::Part::bytes(upload.data().to_vec())
            .file_name(upload.name().to_string())
            .mime_str(upload.media_type())
            .map_err(|e| format!("无效的媒体类型 {}: {}", upload.media_type(), e))?;
        let form = reqwest::multipart::Form::new().part(IMAGE_FIELD, part);

        log::info!(
            "[OcrClient] POST {} ({}, {} bytes)",
            self.endpoint,
            upload.name(),
            upload.data().len()
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("无法连接 OCR 服务: {}", e))?;

        let status = resp.status();
        let body = match resp.bytes().await {
            Ok(body) => body,
            // 错误响应的正文读不到时，至少保留状态码
            Err(e) if !status.is_success() => {
                log::warn!("[OcrClient] Failed to read error body ({}): {}", status, e);
                return Err(status_message(status.as_u16()));
            }
            Err(e) => return Err(format!("读取响应失败: {}", e)),
        };

        log::info!("[OcrClient] Response {} ({} bytes)", status, body.len());

        if !status.is_success() {
            // 错误响应不一定是 JSON（例如网关返回的 HTML）
            let parsed: OcrResponse = serde_json::from_slice(&body).unwrap_or_default();
            return Err(parsed
                .error
                .unwrap_or_else(|| status_message(status.as_u16())));
        }

        let parsed: OcrResponse =
            serde_json::from_slice(&body).map_err(|e| format!("响应格式无效: {}", e))?;

        parsed
            .structured_text
            .ok_or_else(|| "响应中缺少 structured_text".to_string())
    }
}
