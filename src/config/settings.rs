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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// 应用程序配置设置
///
/// 包含服务器、推理服务和快照捕获等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 推理服务配置
    pub inference: InferenceSettings,
    /// 快照捕获配置
    pub snapshot: SnapshotSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 推理服务配置设置
#[derive(Debug, Deserialize)]
pub struct InferenceSettings {
    /// 推理服务基础URL
    pub base_url: String,
    /// 上游调用超时时间（秒）
    pub timeout_secs: u64,
}

/// 快照捕获配置设置
#[derive(Debug, Deserialize)]
pub struct SnapshotSettings {
    /// 快照输出目录
    pub output_dir: String,
    /// 页面导航超时时间（秒）
    pub navigation_timeout_secs: u64,
}

impl InferenceSettings {
    /// 解析推理服务基础URL
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Message(format!("invalid inference.base_url '{}': {}", self.base_url, e))
        })
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Inference defaults match the in-cluster service name
            .set_default("inference.base_url", "http://inference:8000")?
            .set_default("inference.timeout_secs", 10)?
            // Default Snapshot settings
            .set_default("snapshot.output_dir", "/srv/out")?
            .set_default("snapshot.navigation_timeout_secs", 30)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PHISHGUARD").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        // Fail fast on an unparseable upstream address
        settings.inference.base_url()?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
