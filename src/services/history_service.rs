use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{
    campaign_entity as campaigns, entry_entity as entries, person_entity as people,
    prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{HistoryResponse, WinnerHistoryItem};
use crate::utils::{csv, mask_phone};

/// 中奖历史查询与管理端导出
#[derive(Clone)]
pub struct HistoryService {
    pool: DatabaseConnection,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 活动中奖历史（新中奖在前）；campaign_id 缺省取最近创建的活动
    pub async fn history(&self, campaign_id: Option<i64>) -> AppResult<HistoryResponse> {
        let campaign = match campaign_id {
            Some(id) => campaigns::Entity::find_by_id(id).one(&self.pool).await?,
            None => {
                campaigns::Entity::find()
                    .order_by_desc(campaigns::Column::Id)
                    .one(&self.pool)
                    .await?
            }
        };
        let Some(campaign) = campaign else {
            return Ok(HistoryResponse {
                campaign: None,
                winners: vec![],
            });
        };

        let items = self.winner_rows(campaign.id).await?;
        Ok(HistoryResponse {
            campaign: Some(campaign.into()),
            winners: items,
        })
    }

    /// 管理端导出：campaign_id,prize_title,winner_code,winner_name（不脱敏）
    pub async fn export_winners_csv(&self, campaign_id: i64) -> AppResult<String> {
        campaigns::Entity::find_by_id(campaign_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

        let rows = self.winner_rows(campaign_id).await?;
        let mut out = String::from("campaign_id,prize_title,winner_code,winner_name\n");
        let campaign_cell = campaign_id.to_string();
        for row in rows {
            out.push_str(&csv::write_row(&[
                &campaign_cell,
                &row.prize_name,
                &row.code,
                &row.full_name,
            ]));
            out.push('\n');
        }
        Ok(out)
    }

    async fn winner_rows(&self, campaign_id: i64) -> AppResult<Vec<WinnerHistoryItem>> {
        let winner_list = winners::Entity::find()
            .filter(winners::Column::CampaignId.eq(campaign_id))
            .order_by_desc(winners::Column::Id)
            .all(&self.pool)
            .await?;

        let prize_ids: Vec<i64> = winner_list.iter().map(|w| w.prize_id).collect();
        let entry_ids: Vec<i64> = winner_list.iter().map(|w| w.entry_id).collect();

        let prize_map: HashMap<i64, prizes::Model> = prizes::Entity::find()
            .filter(prizes::Column::Id.is_in(prize_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let entry_map: HashMap<i64, entries::Model> = entries::Entity::find()
            .filter(entries::Column::Id.is_in(entry_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
        let person_ids: Vec<i64> = entry_map.values().map(|e| e.person_id).collect();
        let person_map: HashMap<i64, people::Model> = people::Entity::find()
            .filter(people::Column::Id.is_in(person_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items = Vec::with_capacity(winner_list.len());
        for w in winner_list {
            let Some(entry) = entry_map.get(&w.entry_id) else {
                continue;
            };
            let Some(person) = person_map.get(&entry.person_id) else {
                continue;
            };
            let prize_name = prize_map
                .get(&w.prize_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            items.push(WinnerHistoryItem {
                id: w.id,
                prize_name,
                code: entry.code.clone(),
                full_name: person.full_name.clone(),
                phone: mask_phone(person.phone.as_deref().unwrap_or_default()),
                created_at: w.created_at,
            });
        }
        Ok(items)
    }
}
