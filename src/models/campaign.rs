use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::campaign_entity as campaigns;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    /// 同一参与者在整个活动内最多中奖一次，缺省开启
    #[serde(default = "default_one_win")]
    pub one_win_per_person: bool,
    #[serde(default)]
    pub background_url: Option<String>,
}

fn default_one_win() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: i64,
    pub name: String,
    pub background_url: Option<String>,
    pub one_win_per_person: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<campaigns::Model> for CampaignResponse {
    fn from(m: campaigns::Model) -> Self {
        CampaignResponse {
            id: m.id,
            name: m.name,
            background_url: m.background_url,
            one_win_per_person: m.one_win_per_person,
            created_at: m.created_at,
        }
    }
}
