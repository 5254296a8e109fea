use std::sync::{Arc, Mutex};

use crate::draw::catalog::PrizeCatalog;
use crate::draw::ledger::WinnerLedger;
use crate::draw::preset::PresetResolver;
use crate::draw::registry::EntryRegistry;
use crate::draw::rng::RandomSource;
use crate::error::{AppError, AppResult};
use crate::store::{Candidate, DrawStore, WinCommit};
use crate::utils::mask_phone;

/// 抽中结果（phone 已脱敏，可直接越过信任边界展示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinWinner {
    pub entry_id: i64,
    pub code: String,
    pub full_name: String,
    pub phone_masked: String,
    pub prize_id: i64,
    pub prize_name: String,
}

/// 单次 spin 的两种正常终态
///
/// Exhausted 是预期结果而非失败：名额预检触发时带名额统计，
/// 候选集为空触发时不带
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinOutcome {
    Won(SpinWinner),
    Exhausted {
        winners_count: Option<i64>,
        winners_quota: Option<i64>,
    },
}

/// 抽奖引擎：单次 spin 的编排者
///
/// 流程: 名额预检 -> 预设优先 -> 随机候选 -> 原子提交。
/// 提交被并发拒绝时在预算内整轮重试（候选每次重新计算），
/// 预算耗尽后以 Conflict 上浮，由调用方决定是否整体重试。
pub struct DrawEngine {
    store: Arc<dyn DrawStore>,
    catalog: PrizeCatalog,
    presets: PresetResolver,
    registry: EntryRegistry,
    ledger: WinnerLedger,
    rng: Mutex<Box<dyn RandomSource>>,
    retry_budget: u32,
}

impl DrawEngine {
    pub fn new(store: Arc<dyn DrawStore>, rng: Box<dyn RandomSource>, retry_budget: u32) -> Self {
        Self {
            catalog: PrizeCatalog::new(store.clone()),
            presets: PresetResolver::new(store.clone()),
            registry: EntryRegistry::new(store.clone()),
            ledger: WinnerLedger::new(store.clone()),
            store,
            rng: Mutex::new(rng),
            retry_budget: retry_budget.max(1),
        }
    }

    /// 执行一次抽奖
    ///
    /// force=true 仅跳过名额预检与提交时的名额复查；
    /// (prize, entry) 唯一与一人一奖始终在提交时强制
    pub async fn spin(
        &self,
        campaign_id: i64,
        prize_id: i64,
        force: bool,
    ) -> AppResult<SpinOutcome> {
        let campaign = self
            .store
            .find_campaign(campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;
        let prize = self
            .store
            .find_prize(campaign_id, prize_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let one_per_person = campaign.one_win_per_person;

        for attempt in 1..=self.retry_budget {
            let usage = self.catalog.remaining_slots(campaign_id, prize_id).await?;
            if usage.remaining() <= 0 && !force {
                return Ok(SpinOutcome::Exhausted {
                    winners_count: Some(usage.winners_count),
                    winners_quota: Some(usage.quota),
                });
            }

            // 预设优先；预设用尽后回落随机
            let chosen = match self.presets.next_preset(campaign_id, prize_id).await? {
                Some(preset) => preset,
                None => {
                    let mut pool = self
                        .registry
                        .eligible_candidates(campaign_id, prize_id, one_per_person)
                        .await?;
                    if pool.is_empty() {
                        return Ok(SpinOutcome::Exhausted {
                            winners_count: None,
                            winners_quota: None,
                        });
                    }
                    let idx = self.pick_index(pool.len())?;
                    pool.swap_remove(idx)
                }
            };

            let commit = WinCommit {
                campaign_id,
                prize_id,
                entry_id: chosen.entry_id,
                one_per_person,
                quota_limit: (!force).then_some(prize.winners_quota),
            };

            match self.ledger.try_record_win(&commit).await? {
                Ok(_record) => {
                    return Ok(SpinOutcome::Won(Self::winner_view(&prize.name, prize_id, chosen)));
                }
                Err(kind) => {
                    // 并发方先提交了同一码/最后名额；整轮重来，候选重新计算
                    log::warn!(
                        "Spin commit rejected ({kind:?}) for prize {prize_id}, attempt {attempt}/{}",
                        self.retry_budget
                    );
                    continue;
                }
            }
        }

        Err(AppError::Conflict(format!(
            "Spin for prize {prize_id} lost the allocation race after {} attempts",
            self.retry_budget
        )))
    }

    fn pick_index(&self, len: usize) -> AppResult<usize> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::InternalError("Random source lock poisoned".to_string()))?;
        Ok(rng.pick_index(len))
    }

    fn winner_view(prize_name: &str, prize_id: i64, chosen: Candidate) -> SpinWinner {
        SpinWinner {
            entry_id: chosen.entry_id,
            code: chosen.code,
            full_name: chosen.full_name,
            phone_masked: chosen.phone.as_deref().map(mask_phone).unwrap_or_default(),
            prize_id,
            prize_name: prize_name.to_string(),
        }
    }
}
