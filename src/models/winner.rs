use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CampaignResponse;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// 缺省取最近创建的活动
    pub campaign_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnerExportQuery {
    pub campaign_id: i64,
}

/// 历史记录行（公开展示用，phone 已脱敏）
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnerHistoryItem {
    pub id: i64,
    pub prize_name: String,
    pub code: String,
    pub full_name: String,
    pub phone: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub campaign: Option<CampaignResponse>,
    pub winners: Vec<WinnerHistoryItem>,
}
