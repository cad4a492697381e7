// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tokio::fs;

use crate::snapshot::browser::BrowserSession;
use crate::snapshot::SnapshotError;

/// 捕获工件
///
/// 一次成功捕获产生的HTML与截图路径及元数据。
/// 创建后不再修改，删除由外部保留策略负责。
#[derive(Debug, Clone, Serialize)]
pub struct CaptureArtifact {
    /// 渲染后HTML文档路径
    pub html_path: PathBuf,
    /// 整页PNG截图路径
    pub image_path: PathBuf,
    /// 捕获的源URL
    pub source_url: String,
    /// 捕获开始时间（epoch毫秒）
    pub captured_at_epoch_ms: i64,
}

// Last stamp handed out by this process. Stamps are forced strictly
// increasing so two captures started in the same millisecond cannot
// collide on output file names.
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// 生成捕获时间戳
///
/// 返回单进程内严格递增的epoch毫秒时间戳，用作工件文件基础名
pub fn capture_stamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_STAMP.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// 捕获页面快照
///
/// 启动隔离浏览器会话，导航到目标URL，持久化渲染后的HTML
/// 与整页PNG截图。两个工件共享以捕获时间戳为基础名的文件名。
///
/// URL语法不做校验，由浏览器引擎决定导航是否有效。
///
/// # 参数
///
/// * `url` - 目标URL
/// * `output_dir` - 输出目录，不存在时自动创建
/// * `navigation_timeout` - 导航硬超时，超过即失败，不重试
///
/// # 返回值
///
/// * `Ok(CaptureArtifact)` - 捕获成功
/// * `Err(SnapshotError)` - 导航超时、导航失败或写入失败
pub async fn capture(
    url: &str,
    output_dir: &Path,
    navigation_timeout: Duration,
) -> Result<CaptureArtifact, SnapshotError> {
    fs::create_dir_all(output_dir).await?;
    let stamp = capture_stamp();

    let session = BrowserSession::launch().await?;
    // The session is released on every exit path: the fallible body runs
    // to completion (or error) first, the close always follows.
    let result = capture_with_session(&session, url, output_dir, stamp, navigation_timeout).await;
    session.close().await;
    result
}

async fn capture_with_session(
    session: &BrowserSession,
    url: &str,
    output_dir: &Path,
    stamp: i64,
    navigation_timeout: Duration,
) -> Result<CaptureArtifact, SnapshotError> {
    let page = session.new_page().await?;

    // Hard bound on navigation. On expiry the invocation fails as a
    // whole; a half-loaded page is never extracted.
    let navigated = tokio::time::timeout(navigation_timeout, async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok::<(), chromiumoxide::error::CdpError>(())
    })
    .await;

    match navigated {
        Err(_) => {
            return Err(SnapshotError::NavigationTimeout {
                secs: navigation_timeout.as_secs(),
            })
        }
        Ok(Err(e)) => return Err(SnapshotError::Navigation(e.to_string())),
        Ok(Ok(())) => {}
    }

    let html = page
        .content()
        .await
        .map_err(|e| SnapshotError::Browser(e.to_string()))?;
    let html_path = output_dir.join(format!("{}.html", stamp));
    write_atomic(&html_path, html.as_bytes()).await?;

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build();
    let image = page
        .screenshot(params)
        .await
        .map_err(|e| SnapshotError::Browser(e.to_string()))?;
    let image_path = output_dir.join(format!("{}.png", stamp));
    write_atomic(&image_path, &image).await?;

    Ok(CaptureArtifact {
        html_path,
        image_path,
        source_url: url.to_string(),
        captured_at_epoch_ms: stamp,
    })
}

// Write under a temp name and rename, so a concurrent reader never
// observes a truncated artifact.
async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), std::io::Error> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
#[path = "capture_test.rs"]
mod tests;
