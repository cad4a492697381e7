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

use phishguard::config::settings::Settings;
use phishguard::snapshot;
use phishguard::utils::telemetry;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

/// 快照工作器入口点
///
/// 对命令行给定的URL执行一次捕获，成功时向标准输出打印
/// 一行JSON供调度方消费，失败时以非零状态码退出。
/// 重试策略属于外部调度器，不在此处实现。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let settings = Settings::new()?;
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());
    info!("Capturing snapshot of {}", url);

    let result = snapshot::capture(
        &url,
        Path::new(&settings.snapshot.output_dir),
        Duration::from_secs(settings.snapshot.navigation_timeout_secs),
    )
    .await;

    match result {
        Ok(artifact) => {
            info!(
                "Snapshot captured at {} ({} + {})",
                artifact.captured_at_epoch_ms,
                artifact.html_path.display(),
                artifact.image_path.display()
            );
            println!(
                "{}",
                serde_json::json!({
                    "url": artifact.source_url,
                    "html": artifact.html_path,
                    "image": artifact.image_path,
                })
            );
            Ok(())
        }
        Err(e) => {
            error!("Snapshot capture failed: {}", e);
            std::process::exit(1);
        }
    }
}
