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

use bytes::Bytes;
use reqwest::header;
use std::time::Duration;
use url::Url;

/// 转发结果
///
/// 区分"上游已完成HTTP交换"与"上游不可达"两种情况。
/// 上游返回4xx/5xx不属于转发错误，按原样传递。
#[derive(Debug)]
pub enum RelayOutcome {
    /// 上游完成了HTTP交换，状态码、content-type和响应体原样保留
    Forwarded {
        status: u16,
        content_type: String,
        body: Bytes,
    },
    /// 上游不可达（连接拒绝、DNS失败、超时、TLS错误、流中断）
    BackendUnreachable { cause: String },
}

/// 评分转发器
///
/// 将评分请求原样转发到推理服务的透明通道。
/// 无内部状态，可安全地并发调用。
pub struct ScoreRelay {
    client: reqwest::Client,
    base_url: Url,
}

impl ScoreRelay {
    /// 创建新的评分转发器
    ///
    /// # 参数
    ///
    /// * `base_url` - 推理服务基础URL
    /// * `timeout` - 上游调用超时时间，超时视为上游不可达
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// 转发评分请求
    ///
    /// 请求体不做任何解析或校验，由推理服务负责验证。
    ///
    /// # 返回值
    ///
    /// * `RelayOutcome::Forwarded` - 上游完成交换（任意状态码）
    /// * `RelayOutcome::BackendUnreachable` - 交换未完成
    pub async fn forward(&self, body: Bytes) -> RelayOutcome {
        let endpoint = format!(
            "{}/v1/score/url",
            self.base_url.as_str().trim_end_matches('/')
        );

        let response = match self
            .client
            .post(&endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return RelayOutcome::BackendUnreachable {
                    cause: e.to_string(),
                }
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        // A stream reset before the full body arrives counts as unreachable
        match response.bytes().await {
            Ok(body) => RelayOutcome::Forwarded {
                status,
                content_type,
                body,
            },
            Err(e) => RelayOutcome::BackendUnreachable {
                cause: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "score_relay_test.rs"]
mod tests;
