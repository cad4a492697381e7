// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::snapshot::SnapshotError;

/// 浏览器会话
///
/// 包装一个独立的无头Chromium实例及其CDP事件处理任务。
/// 每次捕获拥有自己的会话，不跨任务共享或复用，避免
/// cookie、导航状态和崩溃在任务间串扰。
pub struct BrowserSession {
    browser: Browser,
    event_task: JoinHandle<()>,
}

impl BrowserSession {
    /// 启动新的隔离浏览器实例
    ///
    /// # 返回值
    ///
    /// * `Ok(BrowserSession)` - 已启动的会话
    /// * `Err(SnapshotError)` - 浏览器启动失败
    pub async fn launch() -> Result<Self, SnapshotError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(Duration::from_secs(30))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(SnapshotError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SnapshotError::Browser(e.to_string()))?;

        // Spawn a handler to process browser events
        let event_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            event_task,
        })
    }

    /// 创建新页面
    pub async fn new_page(&self) -> Result<Page, SnapshotError> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| SnapshotError::Browser(e.to_string()))
    }

    /// 关闭浏览器并回收其子进程
    ///
    /// 消费会话，保证只释放一次。关闭阶段的错误只记录日志，
    /// 不再向上传播，捕获本身的结果优先。
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process wait after close: {}", e);
        }
        self.event_task.abort();
    }
}
