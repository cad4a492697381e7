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
    body::Body,
    http::{Request, StatusCode},
};
use phishguard::presentation::routes;
use phishguard::relay::ScoreRelay;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use url::Url;

fn app() -> axum::Router {
    // The relay target does not matter for these routes
    let base = Url::parse("http://127.0.0.1:9").unwrap();
    let relay = Arc::new(ScoreRelay::new(base, Duration::from_secs(1)).unwrap());
    routes::routes(relay)
}

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "ok": true }));
}

/// 拦截列表测试
///
/// 验证拦截列表端点返回declarativeNetRequest规则形状
#[tokio::test]
async fn block_list_returns_declarative_rules() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/lists/block")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let rules: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let rules = rules.as_array().expect("block list is a JSON array");
    assert!(!rules.is_empty());
    assert_eq!(rules[0]["action"]["type"], "block");
    assert!(rules[0]["condition"]["urlFilter"].is_string());
    assert!(rules[0]["condition"]["resourceTypes"].is_array());
}
