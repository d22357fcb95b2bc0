//! 显示层
//!
//! 状态机只通过 `View` 更新界面：状态栏、提示文字、预览、结果区域、
//! 提交按钮、复制按钮文字和拖放高亮。

use std::fmt;

pub const COPY_LABEL: &str = "复制";
pub const COPIED_LABEL: &str = "已复制";

/// 状态栏内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// 不确定进度的处理中提示
    Processing,
    Success,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Processing => write!(f, "⏳ 正在处理..."),
            Status::Success => write!(f, "✔ 处理成功"),
            Status::Error(msg) => write!(f, "❌ {}", msg),
        }
    }
}

/// 界面更新接口（所有方法只改显示，不回调状态机）
pub trait View: Send + Sync {
    fn set_status(&self, status: &Status);
    fn set_prompt(&self, text: &str);
    fn show_preview(&self, data_url: &str);
    fn set_submit_enabled(&self, enabled: bool);
    /// `None` 隐藏结果区域
    fn set_result(&self, text: Option<&str>);
    fn set_copy_label(&self, label: &str);
    fn set_drag_over(&self, active: bool);
}

/// 终端显示：状态写 stderr，识别结果写 stdout
#[derive(Debug, Default)]
pub struct TerminalView;

impl View for TerminalView {
    fn set_status(&self, status: &Status) {
        eprintln!("{}", status);
    }

    fn set_prompt(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn show_preview(&self, data_url: &str) {
        // 按字符截取，data URL 很长
        let head: String = data_url.chars().take(48).collect();
        eprintln!("预览: {}... ({} chars)", head, data_url.chars().count());
    }

    fn set_submit_enabled(&self, enabled: bool) {
        log::debug!("[View] Submit enabled: {}", enabled);
    }

    fn set_result(&self, text: Option<&str>) {
        if let Some(text) = text {
            println!("{}", text);
        }
    }

    fn set_copy_label(&self, label: &str) {
        log::debug!("[View] Copy label: {}", label);
    }

    fn set_drag_over(&self, active: bool) {
        log::debug!("[View] Drag over: {}", active);
    }
}
