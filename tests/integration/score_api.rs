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

use crate::helpers::start_gateway;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 评分透传测试
///
/// 验证网关将推理服务的状态码和响应体原样镜像给客户端
#[tokio::test]
async fn score_response_is_mirrored_verbatim() {
    let backend = MockServer::start().await;
    let upstream_body = r#"{"label":"phishing","prob":0.93,"reasons":["suspicious-form"]}"#;

    Mock::given(method("POST"))
        .and(path("/v1/score/url"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "application/json"))
        .mount(&backend)
        .await;

    let gateway = start_gateway(&backend.uri()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/score/url", gateway))
        .header("content-type", "application/json")
        .body(r#"{"url":"http://a","dom_features":{"form_count":2}}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body = response.bytes().await.unwrap();
    assert_eq!(body.as_ref(), upstream_body.as_bytes());
}

/// 上游错误状态透传测试
///
/// 上游4xx/5xx不是网关错误，按原样传递
#[tokio::test]
async fn upstream_error_status_is_passed_through() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/score/url"))
        .respond_with(
            ResponseTemplate::new(422).set_body_raw(r#"{"detail":"bad url"}"#, "application/json"),
        )
        .mount(&backend)
        .await;

    let gateway = start_gateway(&backend.uri()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/score/url", gateway))
        .header("content-type", "application/json")
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["detail"], "bad url");
}

/// 上游不可达测试
///
/// 验证网关把上游不可达映射为固定的502错误信封
#[tokio::test]
async fn unreachable_backend_maps_to_502_envelope() {
    // Nothing listens on this port
    let gateway = start_gateway("http://127.0.0.1:9").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/score/url", gateway))
        .header("content-type", "application/json")
        .body(r#"{"url":"http://a"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "inference_unreachable");
    assert!(json["detail"].as_str().map(|d| !d.is_empty()).unwrap_or(false));
}
