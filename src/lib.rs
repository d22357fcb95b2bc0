//! ocrdrop - 选择图片 + 预览 + 提交 OCR 服务 + 显示/复制识别结果
//!
//! 命令行把传入的路径当作一次拖放：第一个文件进入上传组件，
//! 识别结果写到 stdout。

pub mod clipboard;
pub mod error;
pub mod ocr_client;
pub mod preview;
pub mod upload;
pub mod view;
pub mod widget;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::clipboard::SystemClipboard;
use crate::error::WidgetError;
use crate::ocr_client::OcrClient;
use crate::upload::PickedFile;
use crate::view::TerminalView;
use crate::widget::{UploadWidget, WidgetConfig};

#[derive(Debug, Parser)]
#[command(
    name = "ocrdrop",
    version,
    about = "提交图片到 OCR 服务并输出识别文本"
)]
struct Cli {
    /// OCR 服务地址（请求固定发往 /api/ocr-process）
    #[arg(long, env = "OCRDROP_SERVER", default_value = "http://127.0.0.1:5000")]
    server: Url,

    /// 识别成功后复制结果到剪贴板
    #[arg(long)]
    copy: bool,

    /// 复制后保持进程的秒数（部分平台进程退出后剪贴板内容会丢失）
    #[arg(long, default_value_t = 2)]
    copy_hold: u64,

    /// 图片路径（jpg / jpeg / png），多个时只取第一个
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

// ============ 流程 ============

async fn run_session(cli: Cli) -> Result<(), WidgetError> {
    let config = WidgetConfig::default();
    let client = OcrClient::new(&cli.server).map_err(WidgetError::RequestFailure)?;
    log::info!("[Ocrdrop] OCR endpoint: {}", client.endpoint());

    let widget = UploadWidget::new(
        Arc::new(TerminalView),
        client,
        Arc::new(SystemClipboard),
        config.clone(),
    );

    if cli.images.len() > 1 {
        log::warn!(
            "[Ocrdrop] {} paths given, only the first is submitted",
            cli.images.len()
        );
    }

    // 只读第一个文件，其余路径不读取
    let first = cli.images.first().ok_or(WidgetError::NoFileSelected)?;
    let file = PickedFile::open(first)
        .await
        .map_err(WidgetError::ReadFailure)?;

    widget.drag_over();
    widget.drop_files(vec![file]).await?;
    widget.submit().await?;

    if cli.copy {
        // 复制失败只记录日志
        if widget.copy_result().await.is_ok() {
            let hold = Duration::from_secs(cli.copy_hold).max(config.copy_ack_delay);
            log::info!("[Ocrdrop] Holding clipboard for {:?}", hold);
            tokio::time::sleep(hold).await;
        }
    }

    Ok(())
}

// ============ 入口 ============

pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("[Ocrdrop] Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_session(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[Ocrdrop] {}", e);
            ExitCode::FAILURE
        }
    }
}
