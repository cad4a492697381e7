// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::handlers::{blocklist_handler, score_handler};
use crate::relay::ScoreRelay;

/// 创建应用路由
///
/// # 参数
///
/// * `relay` - 评分转发器，通过Extension注入处理器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(relay: Arc<ScoreRelay>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/score/url", post(score_handler::score_url))
        .route("/v1/lists/block", get(blocklist_handler::block_list))
        .layer(Extension(relay))
        // The extension client calls from arbitrary page origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回 `{"ok": true}`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
