use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::entities::{
    campaign_entity as campaigns, entry_entity as entries, person_entity as people,
    preset_assignment_entity as presets, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::store::{Candidate, ConflictKind, DrawStore, WinCommit};

/// 生产存储：sea-orm 连接池之上的 DrawStore 实现
///
/// record_win 先对奖品行加排它锁，使同一奖品的提交串行化；
/// (prize_id, entry_id) 唯一索引作为锁之外的最终防线。
/// 不同奖品之间不共享任何锁。
#[derive(Clone)]
pub struct DbStore {
    pool: DatabaseConnection,
}

impl DbStore {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn load_candidate(
        &self,
        entry: &entries::Model,
    ) -> AppResult<Candidate> {
        let person = people::Entity::find_by_id(entry.person_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Entry {} references missing person", entry.id))
            })?;
        Ok(Candidate {
            entry_id: entry.id,
            person_id: person.id,
            code: entry.code.clone(),
            full_name: person.full_name,
            phone: person.phone,
        })
    }

    /// 一人一奖检查：该码持有者在活动内是否已有中奖记录（事务内执行）
    async fn person_already_won(
        txn: &DatabaseTransaction,
        campaign_id: i64,
        person_id: i64,
    ) -> AppResult<bool> {
        let sibling_ids: Vec<i64> = entries::Entity::find()
            .filter(entries::Column::CampaignId.eq(campaign_id))
            .filter(entries::Column::PersonId.eq(person_id))
            .all(txn)
            .await?
            .into_iter()
            .map(|e| e.id)
            .collect();

        if sibling_ids.is_empty() {
            return Ok(false);
        }

        let won = winners::Entity::find()
            .filter(winners::Column::CampaignId.eq(campaign_id))
            .filter(winners::Column::EntryId.is_in(sibling_ids))
            .count(txn)
            .await?;

        Ok(won > 0)
    }
}

#[async_trait]
impl DrawStore for DbStore {
    async fn find_campaign(&self, campaign_id: i64) -> AppResult<Option<campaigns::Model>> {
        Ok(campaigns::Entity::find_by_id(campaign_id)
            .one(&self.pool)
            .await?)
    }

    async fn find_prize(
        &self,
        campaign_id: i64,
        prize_id: i64,
    ) -> AppResult<Option<prizes::Model>> {
        Ok(prizes::Entity::find()
            .filter(prizes::Column::Id.eq(prize_id))
            .filter(prizes::Column::CampaignId.eq(campaign_id))
            .one(&self.pool)
            .await?)
    }

    async fn count_winners(&self, prize_id: i64) -> AppResult<i64> {
        let count = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize_id))
            .count(&self.pool)
            .await?;
        Ok(count as i64)
    }

    async fn next_preset(&self, campaign_id: i64, prize_id: i64) -> AppResult<Option<Candidate>> {
        let won_entry_ids: HashSet<i64> = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|w| w.entry_id)
            .collect();

        // 登记顺序即发放顺序
        let assignments = presets::Entity::find()
            .filter(presets::Column::PrizeId.eq(prize_id))
            .order_by_asc(presets::Column::Id)
            .all(&self.pool)
            .await?;

        for assignment in assignments {
            if won_entry_ids.contains(&assignment.entry_id) {
                continue;
            }
            // 跨活动登记的预设码跳过
            let entry = entries::Entity::find()
                .filter(entries::Column::Id.eq(assignment.entry_id))
                .filter(entries::Column::CampaignId.eq(campaign_id))
                .one(&self.pool)
                .await?;
            if let Some(entry) = entry {
                return Ok(Some(self.load_candidate(&entry).await?));
            }
        }

        Ok(None)
    }

    async fn eligible_candidates(
        &self,
        campaign_id: i64,
        prize_id: i64,
        one_per_person: bool,
    ) -> AppResult<Vec<Candidate>> {
        let won_this_prize: HashSet<i64> = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(prize_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|w| w.entry_id)
            .collect();

        let excluded_people: HashSet<i64> = if one_per_person {
            let won_entry_ids: Vec<i64> = winners::Entity::find()
                .filter(winners::Column::CampaignId.eq(campaign_id))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|w| w.entry_id)
                .collect();
            if won_entry_ids.is_empty() {
                HashSet::new()
            } else {
                entries::Entity::find()
                    .filter(entries::Column::Id.is_in(won_entry_ids))
                    .all(&self.pool)
                    .await?
                    .into_iter()
                    .map(|e| e.person_id)
                    .collect()
            }
        } else {
            HashSet::new()
        };

        // id 升序保证同一库状态下候选顺序稳定（配合固定种子可复现）
        let entry_list = entries::Entity::find()
            .filter(entries::Column::CampaignId.eq(campaign_id))
            .order_by_asc(entries::Column::Id)
            .all(&self.pool)
            .await?;

        let person_ids: Vec<i64> = entry_list.iter().map(|e| e.person_id).collect();
        let person_map: HashMap<i64, people::Model> = people::Entity::find()
            .filter(people::Column::Id.is_in(person_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut candidates = Vec::new();
        for entry in entry_list {
            if won_this_prize.contains(&entry.id) {
                continue;
            }
            if excluded_people.contains(&entry.person_id) {
                continue;
            }
            let Some(person) = person_map.get(&entry.person_id) else {
                continue;
            };
            candidates.push(Candidate {
                entry_id: entry.id,
                person_id: person.id,
                code: entry.code,
                full_name: person.full_name.clone(),
                phone: person.phone.clone(),
            });
        }

        Ok(candidates)
    }

    async fn record_win(
        &self,
        commit: &WinCommit,
    ) -> AppResult<Result<winners::Model, ConflictKind>> {
        let txn = self.pool.begin().await?;

        // 同一奖品的提交在奖品行排它锁下串行化；不同奖品互不阻塞
        prizes::Entity::find()
            .filter(prizes::Column::Id.eq(commit.prize_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {} not found", commit.prize_id)))?;

        // (prize, entry) 唯一
        let duplicate = winners::Entity::find()
            .filter(winners::Column::PrizeId.eq(commit.prize_id))
            .filter(winners::Column::EntryId.eq(commit.entry_id))
            .count(&txn)
            .await?;
        if duplicate > 0 {
            txn.rollback().await?;
            return Ok(Err(ConflictKind::EntryAlreadyWon));
        }

        let entry = entries::Entity::find()
            .filter(entries::Column::Id.eq(commit.entry_id))
            .filter(entries::Column::CampaignId.eq(commit.campaign_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", commit.entry_id)))?;

        if commit.one_per_person
            && Self::person_already_won(&txn, commit.campaign_id, entry.person_id).await?
        {
            txn.rollback().await?;
            return Ok(Err(ConflictKind::PersonAlreadyWon));
        }

        if let Some(quota) = commit.quota_limit {
            let current = winners::Entity::find()
                .filter(winners::Column::PrizeId.eq(commit.prize_id))
                .count(&txn)
                .await? as i64;
            if current >= quota {
                txn.rollback().await?;
                return Ok(Err(ConflictKind::QuotaFilled));
            }
        }

        let inserted = winners::ActiveModel {
            campaign_id: Set(commit.campaign_id),
            prize_id: Set(commit.prize_id),
            entry_id: Set(commit.entry_id),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let record = match inserted {
            Ok(record) => record,
            Err(e) => {
                // 唯一索引兜底：竞到同一码映射为冲突而不是 500
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    txn.rollback().await?;
                    return Ok(Err(ConflictKind::EntryAlreadyWon));
                }
                return Err(e.into());
            }
        };

        // consumed 与中奖记录同一事务翻转，两者同生同灭
        entries::Entity::update_many()
            .col_expr(entries::Column::Consumed, Expr::value(true))
            .filter(entries::Column::Id.eq(commit.entry_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(Ok(record))
    }
}
