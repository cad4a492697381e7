// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

pub mod browser;
pub mod capture;

pub use browser::BrowserSession;
pub use capture::{capture, CaptureArtifact};

/// 快照错误类型
///
/// 导航类失败与存储类失败分开上报，便于区分站点问题和磁盘问题
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// 导航超时
    #[error("Navigation timed out after {secs}s")]
    NavigationTimeout { secs: u64 },

    /// 导航失败（主机不可达、DNS失败、TLS错误）
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// 浏览器错误（启动、页面创建、内容提取、截图）
    #[error("Browser error: {0}")]
    Browser(String),

    /// 工件写入失败
    #[error("Artifact write failed: {0}")]
    Write(#[from] std::io::Error),
}
