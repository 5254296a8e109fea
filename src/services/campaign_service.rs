use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::campaign_entity as campaigns;
use crate::error::{AppError, AppResult};
use crate::models::{CampaignResponse, CreateCampaignRequest};

#[derive(Clone)]
pub struct CampaignService {
    pool: DatabaseConnection,
}

impl CampaignService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建活动（管理端）
    pub async fn create_campaign(&self, req: &CreateCampaignRequest) -> AppResult<i64> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("name required".to_string()));
        }
        let created = campaigns::ActiveModel {
            name: Set(req.name.trim().to_string()),
            background_url: Set(req.background_url.clone()),
            one_win_per_person: Set(req.one_win_per_person),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.id)
    }

    /// 活动列表（新建在前）
    pub async fn list_campaigns(&self) -> AppResult<Vec<CampaignResponse>> {
        let list = campaigns::Entity::find()
            .order_by_desc(campaigns::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_campaign(&self, id: i64) -> AppResult<CampaignResponse> {
        campaigns::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Campaign {id} not found")))
    }

    /// 最近创建的活动（历史页缺省目标）
    pub async fn latest_campaign(&self) -> AppResult<Option<CampaignResponse>> {
        let latest = campaigns::Entity::find()
            .order_by_desc(campaigns::Column::Id)
            .one(&self.pool)
            .await?;
        Ok(latest.map(Into::into))
    }
}
