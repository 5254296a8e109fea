use std::sync::Arc;

use crate::entities::winner_entity as winners;
use crate::error::AppResult;
use crate::store::{ConflictKind, DrawStore, WinCommit};

/// 中奖台账：winners 记录的唯一写入方
///
/// try_record_win 的存在性检查（码未中本奖、一人一奖、名额未满）
/// 与插入构成单个原子单元；拒绝以 ConflictKind 返回，
/// 调用方据此区分 Exhausted 与 Conflict，二者绝不互相转换
pub struct WinnerLedger {
    store: Arc<dyn DrawStore>,
}

impl WinnerLedger {
    pub fn new(store: Arc<dyn DrawStore>) -> Self {
        Self { store }
    }

    pub async fn try_record_win(
        &self,
        commit: &WinCommit,
    ) -> AppResult<Result<winners::Model, ConflictKind>> {
        self.store.record_win(commit).await
    }
}
