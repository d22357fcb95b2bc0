//! 上传组件状态机
//!
//! Idle -> FileSelected -> Submitting -> Success | Failure
//!
//! Success / Failure 只是显示状态：暂存文件仍在，可以直接重新提交。

use crate::clipboard::ClipboardSink;
use crate::error::WidgetError;
use crate::ocr_client::OcrClient;
use crate::preview;
use crate::upload::{PendingUpload, PickedFile};
use crate::view::{Status, View, COPIED_LABEL, COPY_LABEL};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const INVALID_TYPE_MESSAGE: &str = "文件类型无效，请选择 JPG、PNG 或 JPEG";
const NO_FILE_MESSAGE: &str = "请先选择文件";

/// 组件状态
///
/// `Success` / `Failure` 表示最近一次提交的结果仍显示在界面上。
/// 此时暂存文件还在，`submit` 可以直接再次调用，效果等同于
/// 回到 `FileSelected`；重新选择文件时状态才回到 `FileSelected`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    FileSelected,
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// 复制成功后按钮显示"已复制"的时长
    pub copy_ack_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            copy_ack_delay: Duration::from_secs(2),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// 提交期间持有；提前返回或 future 被丢弃时也会复位
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct UploadWidget {
    view: Arc<dyn View>,
    client: OcrClient,
    clipboard: Arc<dyn ClipboardSink>,
    config: WidgetConfig,
    state: Mutex<WidgetState>,
    pending: Mutex<Option<Arc<PendingUpload>>>,
    /// 当前显示在结果区域的文本
    result: Mutex<Option<String>>,
    in_flight: AtomicBool,
}

impl UploadWidget {
    pub fn new(
        view: Arc<dyn View>,
        client: OcrClient,
        clipboard: Arc<dyn ClipboardSink>,
        config: WidgetConfig,
    ) -> Self {
        view.set_submit_enabled(false);
        view.set_result(None);
        view.set_copy_label(COPY_LABEL);

        Self {
            view,
            client,
            clipboard,
            config,
            state: Mutex::new(WidgetState::Idle),
            pending: Mutex::new(None),
            result: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> WidgetState {
        *lock(&self.state)
    }

    pub fn has_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }

    pub fn result_text(&self) -> Option<String> {
        lock(&self.result).clone()
    }

    fn set_state(&self, state: WidgetState) {
        let mut current = lock(&self.state);
        log::debug!("[Widget] {:?} -> {:?}", *current, state);
        *current = state;
    }

    // ============ 选择文件 ============

    /// 校验并暂存文件，然后渲染预览
    ///
    /// 类型不合法时保持原状态，不替换已暂存的文件。
    pub async fn select_file(&self, file: PickedFile) -> Result<(), WidgetError> {
        let upload = match PendingUpload::stage(file) {
            Ok(u) => Arc::new(u),
            Err(e) => {
                log::warn!("[Widget] Rejected file: {}", e);
                self.view
                    .set_status(&Status::Error(INVALID_TYPE_MESSAGE.to_string()));
                return Err(e);
            }
        };

        log::info!(
            "[Widget] File selected: {} ({}, {} bytes)",
            upload.name(),
            upload.media_type(),
            upload.data().len()
        );

        *lock(&self.pending) = Some(upload.clone());
        self.set_state(WidgetState::FileSelected);
        self.view
            .set_prompt(&format!("已选择文件: {}", upload.name()));
        self.view.set_submit_enabled(true);

        let rendered = preview::render(&upload).await;

        // 渲染期间可能已经选了别的文件，过期的预览直接丢弃
        let still_staged = lock(&self.pending)
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &upload));
        if !still_staged {
            log::debug!("[Widget] Discarding stale preview for {}", upload.name());
            return Ok(());
        }

        match rendered {
            Ok(url) => self.view.show_preview(&url),
            Err(e) => log::warn!("[Widget] Preview failed: {}", e),
        }

        Ok(())
    }

    /// 点击选择文件：取第一个
    pub async fn browse_files(&self, files: Vec<PickedFile>) -> Result<(), WidgetError> {
        match files.into_iter().next() {
            Some(file) => self.select_file(file).await,
            None => Ok(()),
        }
    }

    pub fn drag_over(&self) {
        self.view.set_drag_over(true);
    }

    pub fn drag_leave(&self) {
        self.view.set_drag_over(false);
    }

    /// 拖放：清除高亮，取第一个文件，和点击选择走同一条路径
    pub async fn drop_files(&self, files: Vec<PickedFile>) -> Result<(), WidgetError> {
        self.view.set_drag_over(false);
        self.browse_files(files).await
    }

    // ============ 提交 ============

    /// 提交暂存文件，成功时返回识别文本
    pub async fn submit(&self) -> Result<String, WidgetError> {
        let upload = match lock(&self.pending).clone() {
            Some(u) => u,
            None => {
                log::warn!("[Widget] Submit without a selected file");
                self.view
                    .set_status(&Status::Error(NO_FILE_MESSAGE.to_string()));
                return Err(WidgetError::NoFileSelected);
            }
        };

        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::warn!("[Widget] Submission already in flight");
            return Err(WidgetError::SubmitInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let tag = uuid::Uuid::new_v4();
        log::info!("[Widget] Submission {} started: {}", tag, upload.name());

        self.set_state(WidgetState::Submitting);
        self.view.set_submit_enabled(false);
        self.view.set_status(&Status::Processing);
        *lock(&self.result) = None;
        self.view.set_result(None);

        let outcome = match self.client.process(&upload).await {
            Ok(text) => {
                log::info!(
                    "[Widget] Submission {} succeeded ({} chars)",
                    tag,
                    text.chars().count()
                );
                self.set_state(WidgetState::Success);
                *lock(&self.result) = Some(text.clone());
                self.view.set_result(Some(&text));
                self.view.set_status(&Status::Success);
                Ok(text)
            }
            Err(msg) => {
                log::error!("[Widget] Submission {} failed: {}", tag, msg);
                self.set_state(WidgetState::Failure);
                self.view
                    .set_status(&Status::Error(format!("失败: {}", msg)));
                Err(WidgetError::RequestFailure(msg))
            }
        };

        self.view.set_submit_enabled(true);
        outcome
    }

    // ============ 复制结果 ============

    /// 复制当前显示的结果；成功后按钮短暂显示"已复制"再恢复
    ///
    /// 失败只记录日志，不改动界面。
    pub async fn copy_result(&self) -> Result<(), WidgetError> {
        let text = lock(&self.result).clone().unwrap_or_default();
        let clipboard = self.clipboard.clone();

        let written = tokio::task::spawn_blocking(move || clipboard.set_text(&text))
            .await
            .map_err(|e| format!("Clipboard task failed: {}", e))
            .and_then(|r| r);

        if let Err(e) = written {
            log::error!("[Widget] Copy failed: {}", e);
            return Err(WidgetError::ClipboardFailure(e));
        }

        self.view.set_copy_label(COPIED_LABEL);

        let view = self.view.clone();
        let delay = self.config.copy_ack_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.set_copy_label(COPY_LABEL);
        });

        Ok(())
    }
}
