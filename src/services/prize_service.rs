use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{
    campaign_entity as campaigns, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, PrizeResponse};

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建奖品（管理端）；名额必须为正
    pub async fn create_prize(&self, req: &CreatePrizeRequest) -> AppResult<i64> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("name required".to_string()));
        }
        if req.winners_quota <= 0 {
            return Err(AppError::ValidationError(
                "winnersQuota must be positive".to_string(),
            ));
        }
        campaigns::Entity::find_by_id(req.campaign_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Campaign {} not found", req.campaign_id))
            })?;

        let created = prizes::ActiveModel {
            campaign_id: Set(req.campaign_id),
            name: Set(req.name.trim().to_string()),
            image_url: Set(req.image_url.clone()),
            winners_quota: Set(req.winners_quota),
            mode: Set(req.mode),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.id)
    }

    /// 活动下的奖品列表，附带已产生中奖数
    pub async fn list_prizes(&self, campaign_id: i64) -> AppResult<Vec<PrizeResponse>> {
        campaigns::Entity::find_by_id(campaign_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

        let prize_list = prizes::Entity::find()
            .filter(prizes::Column::CampaignId.eq(campaign_id))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(prize_list.len());
        for prize in prize_list {
            let winners_count = winners::Entity::find()
                .filter(winners::Column::PrizeId.eq(prize.id))
                .count(&self.pool)
                .await? as i64;
            out.push(PrizeResponse::from_model(prize, winners_count));
        }
        Ok(out)
    }
}
