//! 剪贴板 - 只需要写入纯文本

use arboard::Clipboard;

/// 剪贴板写入端
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), String>;
}

/// 系统剪贴板（每次写入时打开，不长期持有）
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), String> {
        let mut clip =
            Clipboard::new().map_err(|e| format!("Failed to open clipboard: {}", e))?;

        clip.set_text(text)
            .map_err(|e| format!("Failed to set clipboard: {}", e))?;

        log::info!(
            "[Clipboard] Text set to clipboard ({} chars)",
            text.chars().count()
        );
        Ok(())
    }
}
