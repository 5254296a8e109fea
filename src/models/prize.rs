use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{PrizeMode, prize_entity as prizes};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrizeRequest {
    pub campaign_id: i64,
    pub name: String,
    /// 名额，默认 1
    #[serde(default = "default_quota")]
    pub winners_quota: i64,
    #[serde(default = "default_mode")]
    pub mode: PrizeMode,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_quota() -> i64 {
    1
}

fn default_mode() -> PrizeMode {
    PrizeMode::Random
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeQuery {
    pub campaign_id: i64,
}

/// 奖品展示视图（winners_count 由中奖记录实时统计）
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub winners_quota: i64,
    pub mode: PrizeMode,
    pub winners_count: i64,
}

impl PrizeResponse {
    pub fn from_model(m: prizes::Model, winners_count: i64) -> Self {
        PrizeResponse {
            id: m.id,
            campaign_id: m.campaign_id,
            name: m.name,
            image_url: m.image_url,
            winners_quota: m.winners_quota,
            mode: m.mode,
            winners_count,
        }
    }
}
