use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::entities::{
    campaign_entity as campaigns, entry_entity as entries, person_entity as people,
    preset_assignment_entity as presets, prize_entity as prizes,
};
use crate::error::{AppError, AppResult};
use crate::models::ImportResult;
use crate::utils::csv;

/// CSV 名单导入
///
/// 重复码 / 未知码静默跳过，只汇报入库行数 —
/// 名单多次重放导入是常规操作，不应整批报错
#[derive(Clone)]
pub struct ImportService {
    pool: DatabaseConnection,
}

impl ImportService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 导入抽奖码：列 full_name,phone,code（首行表头可选）
    /// 参与者按 (full_name, phone) 去重复用
    pub async fn import_entries(&self, campaign_id: i64, content: &str) -> AppResult<ImportResult> {
        campaigns::Entity::find_by_id(campaign_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

        let rows = csv::parse_rows(content);
        let start = csv::data_start_index(&rows, "full_name");

        let mut inserted = 0u64;
        for row in &rows[start.min(rows.len())..] {
            let full_name = row.first().map(String::as_str).unwrap_or("");
            let phone = row.get(1).map(String::as_str).filter(|p| !p.is_empty());
            let code = row.get(2).map(String::as_str).unwrap_or("");
            if full_name.is_empty() || code.is_empty() {
                continue;
            }

            let person_id = self.find_or_create_person(full_name, phone).await?;

            // 同一活动内码唯一；重复行静默跳过
            let exists = entries::Entity::find()
                .filter(entries::Column::CampaignId.eq(campaign_id))
                .filter(entries::Column::Code.eq(code))
                .one(&self.pool)
                .await?;
            if exists.is_some() {
                continue;
            }

            let insert = entries::ActiveModel {
                campaign_id: Set(campaign_id),
                person_id: Set(person_id),
                code: Set(code.to_string()),
                consumed: Set(false),
                ..Default::default()
            }
            .insert(&self.pool)
            .await;

            match insert {
                Ok(_) => inserted += 1,
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    // 并发导入竞到同一码，同样静默跳过
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("Imported {inserted} entries into campaign {campaign_id}");
        Ok(ImportResult { inserted })
    }

    /// 导入预设名单：单列 code（首行表头可选），按行序登记
    /// 码在奖品所属活动内解析，未知码跳过
    pub async fn import_presets(&self, prize_id: i64, content: &str) -> AppResult<ImportResult> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;

        let rows = csv::parse_rows(content);
        let start = csv::data_start_index(&rows, "code");

        let mut inserted = 0u64;
        for row in &rows[start.min(rows.len())..] {
            let code = row.first().map(String::as_str).unwrap_or("");
            if code.is_empty() {
                continue;
            }

            let Some(entry) = entries::Entity::find()
                .filter(entries::Column::CampaignId.eq(prize.campaign_id))
                .filter(entries::Column::Code.eq(code))
                .one(&self.pool)
                .await?
            else {
                continue;
            };

            let exists = presets::Entity::find()
                .filter(presets::Column::PrizeId.eq(prize_id))
                .filter(presets::Column::EntryId.eq(entry.id))
                .one(&self.pool)
                .await?;
            if exists.is_some() {
                continue;
            }

            let insert = presets::ActiveModel {
                prize_id: Set(prize_id),
                entry_id: Set(entry.id),
                ..Default::default()
            }
            .insert(&self.pool)
            .await;

            match insert {
                Ok(_) => inserted += 1,
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("Imported {inserted} preset assignments for prize {prize_id}");
        Ok(ImportResult { inserted })
    }

    async fn find_or_create_person(&self, full_name: &str, phone: Option<&str>) -> AppResult<i64> {
        let mut query = people::Entity::find().filter(people::Column::FullName.eq(full_name));
        query = match phone {
            Some(p) => query.filter(people::Column::Phone.eq(p)),
            None => query.filter(people::Column::Phone.is_null()),
        };
        if let Some(person) = query.one(&self.pool).await? {
            return Ok(person.id);
        }

        let created = people::ActiveModel {
            full_name: Set(full_name.to_string()),
            phone: Set(phone.map(str::to_string)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(created.id)
    }
}
