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

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::warn;

use crate::relay::{RelayOutcome, ScoreRelay};

/// 评分请求处理器
///
/// 请求体按不透明字节转发，网关不解析也不校验评分语义。
/// 上游完成交换时状态码、content-type和响应体原样镜像；
/// 上游不可达时映射为固定的502错误信封，原始传输错误
/// 永远不会泄露给客户端。
pub async fn score_url(
    Extension(relay): Extension<Arc<ScoreRelay>>,
    body: Bytes,
) -> Response {
    match relay.forward(body).await {
        RelayOutcome::Forwarded {
            status,
            content_type,
            body,
        } => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        RelayOutcome::BackendUnreachable { cause } => {
            warn!("Inference service unreachable: {}", cause);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "inference_unreachable",
                    "detail": cause
                })),
            )
                .into_response()
        }
    }
}
