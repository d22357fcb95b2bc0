//! 待上传文件
//!
//! 对话框选取、拖放、命令行路径三种来源都先变成 `PickedFile`，
//! 再经 `PendingUpload::stage` 校验后才能被提交。

use crate::error::WidgetError;
use std::path::Path;

/// 允许提交的媒体类型
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// 用户选取或拖入的文件（带声明的媒体类型）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// 从磁盘读取文件，媒体类型按扩展名推断（和浏览器文件选择框的行为一致）
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| format!("Not a file path: {}", path.display()))?;

        // 无法识别的扩展名留空，后续校验会拒绝
        let media_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        log::debug!(
            "[Upload] Opened {} ({} bytes, type={:?})",
            name,
            data.len(),
            media_type
        );

        Ok(Self {
            name,
            media_type,
            data,
        })
    }
}

/// 规范化媒体类型：去掉参数和空白并转小写，不在允许列表中返回 `None`
pub fn normalize_media_type(media_type: &str) -> Option<&'static str> {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ALLOWED_MEDIA_TYPES
        .iter()
        .copied()
        .find(|allowed| *allowed == essence)
}

/// 判断媒体类型是否允许（忽略大小写和参数部分）
pub fn is_allowed_media_type(media_type: &str) -> bool {
    normalize_media_type(media_type).is_some()
}

/// 当前暂存、等待提交的文件；同一时间最多一个
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    file: PickedFile,
}

impl PendingUpload {
    /// 校验并暂存；保存规范化后的媒体类型，供 multipart 和预览直接使用
    pub fn stage(mut file: PickedFile) -> Result<Self, WidgetError> {
        match normalize_media_type(&file.media_type) {
            Some(essence) => {
                file.media_type = essence.to_string();
                Ok(Self { file })
            }
            None => Err(WidgetError::InvalidFileType(file.media_type)),
        }
    }

    pub fn name(&self) -> &str {
        &self.file.name
    }

    pub fn media_type(&self) -> &str {
        &self.file.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.file.data
    }
}
