use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::draw::SpinWinner;

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinRequest {
    pub campaign_id: i64,
    pub prize_id: i64,
    /// 跳过名额预检（唯一性与一人一奖仍然强制）
    #[serde(default)]
    pub force: bool,
}

/// 抽中响应（phone 已脱敏）
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinWonResponse {
    pub code: String,
    pub full_name: String,
    pub phone: String,
}

impl From<SpinWinner> for SpinWonResponse {
    fn from(w: SpinWinner) -> Self {
        SpinWonResponse {
            code: w.code,
            full_name: w.full_name,
            phone: w.phone_masked,
        }
    }
}

/// 名额/候选耗尽响应 — 正常终态，HTTP 200
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinExhaustedResponse {
    pub exhausted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners_quota: Option<i64>,
}

impl SpinExhaustedResponse {
    pub fn new(winners_count: Option<i64>, winners_quota: Option<i64>) -> Self {
        SpinExhaustedResponse {
            exhausted: true,
            winners_count,
            winners_quota,
        }
    }
}
