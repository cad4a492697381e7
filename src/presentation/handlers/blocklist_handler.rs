// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde::{Deserialize, Serialize};

/// 声明式拦截规则
///
/// 浏览器扩展拉取后装入declarativeNetRequest规则引擎
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRule {
    pub id: u32,
    pub priority: u32,
    pub action: RuleAction,
    pub condition: RuleCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub url_filter: String,
    pub resource_types: Vec<String>,
}

/// 静态拦截规则列表
///
/// 当前部署为固定数据；真实部署应定期从外部威胁情报源重新生成
pub fn static_rules() -> Vec<BlockRule> {
    vec![BlockRule {
        id: 1,
        priority: 1,
        action: RuleAction {
            action_type: "block".to_string(),
        },
        condition: RuleCondition {
            url_filter: "malicious.example".to_string(),
            resource_types: vec!["main_frame".to_string()],
        },
    }]
}

/// 拦截列表处理器
pub async fn block_list() -> Json<Vec<BlockRule>> {
    Json(static_rules())
}
