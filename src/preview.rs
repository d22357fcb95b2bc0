//! 图片预览 - 把暂存文件转成可直接显示的 data URL

use crate::upload::PendingUpload;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 同步编码 `data:<type>;base64,<payload>`
pub fn data_url(media_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(data))
}

/// 异步生成预览（大图编码放到阻塞线程池，不占用事件循环）
pub async fn render(upload: &PendingUpload) -> Result<String, String> {
    let media_type = upload.media_type().to_string();
    let data = upload.data().to_vec();
    let size = data.len();

    let url = tokio::task::spawn_blocking(move || data_url(&media_type, &data))
        .await
        .map_err(|e| format!("Preview task failed: {}", e))?;

    log::debug!("[Preview] Rendered {} bytes into {} chars", size, url.len());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::PickedFile;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(data_url("image/jpeg", b""), "data:image/jpeg;base64,");
    }

    #[tokio::test]
    async fn test_render_uses_declared_type() {
        let upload =
            PendingUpload::stage(PickedFile::new("a.jpg", "image/jpg", b"hello".to_vec())).unwrap();
        let url = render(&upload).await.unwrap();
        assert_eq!(url, "data:image/jpg;base64,aGVsbG8=");
    }
}
