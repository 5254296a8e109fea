use std::sync::Arc;

use crate::error::AppResult;
use crate::store::{Candidate, DrawStore};

/// 抽奖码登记表 + 资格过滤
///
/// 候选条件（以当前 winners 状态评估）:
/// 1. 码属于该活动
/// 2. 码未在本奖品下中奖
/// 3. 一人一奖开启时，持有者未在活动内中过任何奖
pub struct EntryRegistry {
    store: Arc<dyn DrawStore>,
}

impl EntryRegistry {
    pub fn new(store: Arc<dyn DrawStore>) -> Self {
        Self { store }
    }

    pub async fn eligible_candidates(
        &self,
        campaign_id: i64,
        prize_id: i64,
        one_per_person: bool,
    ) -> AppResult<Vec<Candidate>> {
        self.store
            .eligible_candidates(campaign_id, prize_id, one_per_person)
            .await
    }
}
