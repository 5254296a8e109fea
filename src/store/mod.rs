use async_trait::async_trait;

use crate::entities::{campaigns, prizes, winners};
use crate::error::AppResult;

pub mod db;
pub mod memory;

pub use db::DbStore;
pub use memory::MemoryStore;

/// 候选抽奖码（附带展示所需的参与者信息）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub entry_id: i64,
    pub person_id: i64,
    pub code: String,
    pub full_name: String,
    pub phone: Option<String>,
}

/// 中奖提交请求
#[derive(Debug, Clone)]
pub struct WinCommit {
    pub campaign_id: i64,
    pub prize_id: i64,
    pub entry_id: i64,
    /// 活动级"一人一奖"规则，person 级检查必须进同一原子单元
    pub one_per_person: bool,
    /// Some(quota) 时在提交前复查名额；force 抽奖传 None
    pub quota_limit: Option<i64>,
}

/// 提交被拒绝的原因（正常并发结果，不是错误）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// 该码已在本奖品下中奖
    EntryAlreadyWon,
    /// 一人一奖开启时，该码的持有者已在本活动中奖
    PersonAlreadyWon,
    /// 名额在读取与提交之间被并发占满
    QuotaFilled,
}

/// 抽奖核心的存储抽象
///
/// record_win 的检查与写入必须构成对同一奖品的原子单元：
/// 两个并发 spin 在只剩一个名额时不可同时成功，也不可对同一码双发。
/// 生产实现用数据库事务 + (prize_id, entry_id) 唯一索引兜底，
/// 测试实现用单把锁串行化。
#[async_trait]
pub trait DrawStore: Send + Sync {
    async fn find_campaign(&self, campaign_id: i64) -> AppResult<Option<campaigns::Model>>;

    /// 奖品必须属于给定活动，否则视作不存在
    async fn find_prize(&self, campaign_id: i64, prize_id: i64)
    -> AppResult<Option<prizes::Model>>;

    async fn count_winners(&self, prize_id: i64) -> AppResult<i64>;

    /// 下一个未被消费的预设：按登记顺序，跳过已有中奖记录的
    async fn next_preset(&self, campaign_id: i64, prize_id: i64) -> AppResult<Option<Candidate>>;

    /// 随机候选集：属于活动、未在本奖品中奖、
    /// 一人一奖开启时其持有者未在活动内中过任何奖
    async fn eligible_candidates(
        &self,
        campaign_id: i64,
        prize_id: i64,
        one_per_person: bool,
    ) -> AppResult<Vec<Candidate>>;

    /// 原子提交：写入中奖记录并翻转 consumed，或给出拒绝原因
    async fn record_win(&self, commit: &WinCommit)
    -> AppResult<Result<winners::Model, ConflictKind>>;
}
