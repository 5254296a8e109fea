use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::DrawStore;

/// 某奖品的名额占用快照
#[derive(Debug, Clone, Copy)]
pub struct PrizeUsage {
    pub quota: i64,
    pub winners_count: i64,
}

impl PrizeUsage {
    pub fn remaining(&self) -> i64 {
        self.quota - self.winners_count
    }
}

/// 奖品目录只读视图：剩余名额 = 名额 - 已产生中奖数
pub struct PrizeCatalog {
    store: Arc<dyn DrawStore>,
}

impl PrizeCatalog {
    pub fn new(store: Arc<dyn DrawStore>) -> Self {
        Self { store }
    }

    /// 奖品不存在或不属于该活动时返回 NotFound
    pub async fn remaining_slots(&self, campaign_id: i64, prize_id: i64) -> AppResult<PrizeUsage> {
        let prize = self
            .store
            .find_prize(campaign_id, prize_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let winners_count = self.store.count_winners(prize_id).await?;
        Ok(PrizeUsage {
            quota: prize.winners_quota,
            winners_count,
        })
    }
}
