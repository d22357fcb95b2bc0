//! 错误类型

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// 文件类型不在允许列表中
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    #[error("no file selected")]
    NoFileSelected,

    /// 网络错误、非 2xx 响应或响应格式无效
    #[error("request failed: {0}")]
    RequestFailure(String),

    /// 复制失败（只记录日志，不显示给用户）
    #[error("clipboard failure: {0}")]
    ClipboardFailure(String),

    #[error("a submission is already in flight")]
    SubmitInFlight,

    #[error("failed to read file: {0}")]
    ReadFailure(String),
}
