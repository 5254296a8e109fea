use std::sync::Arc;

use crate::error::AppResult;
use crate::store::{Candidate, DrawStore};

/// 预设名单解析：按登记顺序给出下一个未被消费的预设码
///
/// 本组件只读；"已消费"始终以 winners 记录为准，
/// 消费动作只发生在 WinnerLedger 的提交里
pub struct PresetResolver {
    store: Arc<dyn DrawStore>,
}

impl PresetResolver {
    pub fn new(store: Arc<dyn DrawStore>) -> Self {
        Self { store }
    }

    /// 预设全部用尽时返回 None，调用方回落随机选取
    pub async fn next_preset(
        &self,
        campaign_id: i64,
        prize_id: i64,
    ) -> AppResult<Option<Candidate>> {
        self.store.next_preset(campaign_id, prize_id).await
    }
}
