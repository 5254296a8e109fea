use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::entities::{
    PrizeMode, campaign_entity as campaigns, entry_entity as entries, person_entity as people,
    preset_assignment_entity as presets, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::store::{Candidate, ConflictKind, DrawStore, WinCommit};

#[derive(Default)]
struct MemoryState {
    campaigns: Vec<campaigns::Model>,
    people: Vec<people::Model>,
    entries: Vec<entries::Model>,
    prizes: Vec<prizes::Model>,
    presets: Vec<presets::Model>,
    winners: Vec<winners::Model>,
    next_id: i64,
}

impl MemoryState {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn person_of(&self, entry: &entries::Model) -> Option<&people::Model> {
        self.people.iter().find(|p| p.id == entry.person_id)
    }

    fn candidate(&self, entry: &entries::Model) -> Option<Candidate> {
        let person = self.person_of(entry)?;
        Some(Candidate {
            entry_id: entry.id,
            person_id: person.id,
            code: entry.code.clone(),
            full_name: person.full_name.clone(),
            phone: person.phone.clone(),
        })
    }
}

/// 测试与演示用内存存储
///
/// 全部读写在同一把锁下完成，record_win 的检查+写入天然原子，
/// 与生产实现满足同一份 DrawStore 契约。
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AppError::InternalError("Memory store lock poisoned".to_string()))
    }

    // ---------- 种子数据 ----------

    pub fn add_campaign(&self, name: &str, one_win_per_person: bool) -> i64 {
        let mut state = self.state.lock().expect("memory store lock");
        let id = state.alloc_id();
        state.campaigns.push(campaigns::Model {
            id,
            name: name.to_string(),
            background_url: None,
            one_win_per_person,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn add_person(&self, full_name: &str, phone: Option<&str>) -> i64 {
        let mut state = self.state.lock().expect("memory store lock");
        let id = state.alloc_id();
        state.people.push(people::Model {
            id,
            full_name: full_name.to_string(),
            phone: phone.map(str::to_string),
        });
        id
    }

    pub fn add_entry(&self, campaign_id: i64, person_id: i64, code: &str) -> i64 {
        let mut state = self.state.lock().expect("memory store lock");
        let id = state.alloc_id();
        state.entries.push(entries::Model {
            id,
            campaign_id,
            person_id,
            code: code.to_string(),
            consumed: false,
        });
        id
    }

    pub fn add_prize(&self, campaign_id: i64, name: &str, quota: i64, mode: PrizeMode) -> i64 {
        let mut state = self.state.lock().expect("memory store lock");
        let id = state.alloc_id();
        state.prizes.push(prizes::Model {
            id,
            campaign_id,
            name: name.to_string(),
            image_url: None,
            winners_quota: quota,
            mode,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn add_preset(&self, prize_id: i64, entry_id: i64) -> i64 {
        let mut state = self.state.lock().expect("memory store lock");
        let id = state.alloc_id();
        state.presets.push(presets::Model {
            id,
            prize_id,
            entry_id,
        });
        id
    }

    // ---------- 断言辅助 ----------

    pub fn winners_snapshot(&self) -> Vec<winners::Model> {
        self.state.lock().expect("memory store lock").winners.clone()
    }

    pub fn entry_snapshot(&self, entry_id: i64) -> Option<entries::Model> {
        self.state
            .lock()
            .expect("memory store lock")
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .cloned()
    }
}

#[async_trait]
impl DrawStore for MemoryStore {
    async fn find_campaign(&self, campaign_id: i64) -> AppResult<Option<campaigns::Model>> {
        let state = self.lock()?;
        Ok(state.campaigns.iter().find(|c| c.id == campaign_id).cloned())
    }

    async fn find_prize(
        &self,
        campaign_id: i64,
        prize_id: i64,
    ) -> AppResult<Option<prizes::Model>> {
        let state = self.lock()?;
        Ok(state
            .prizes
            .iter()
            .find(|p| p.id == prize_id && p.campaign_id == campaign_id)
            .cloned())
    }

    async fn count_winners(&self, prize_id: i64) -> AppResult<i64> {
        let state = self.lock()?;
        Ok(state.winners.iter().filter(|w| w.prize_id == prize_id).count() as i64)
    }

    async fn next_preset(&self, campaign_id: i64, prize_id: i64) -> AppResult<Option<Candidate>> {
        let state = self.lock()?;
        let won: HashSet<i64> = state
            .winners
            .iter()
            .filter(|w| w.prize_id == prize_id)
            .map(|w| w.entry_id)
            .collect();

        // presets 按插入顺序存放，登记顺序即发放顺序
        for assignment in state.presets.iter().filter(|a| a.prize_id == prize_id) {
            if won.contains(&assignment.entry_id) {
                continue;
            }
            let entry = state
                .entries
                .iter()
                .find(|e| e.id == assignment.entry_id && e.campaign_id == campaign_id);
            if let Some(entry) = entry {
                return Ok(state.candidate(entry));
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
        let state = self.lock()?;
        let won_this_prize: HashSet<i64> = state
            .winners
            .iter()
            .filter(|w| w.prize_id == prize_id)
            .map(|w| w.entry_id)
            .collect();

        let excluded_people: HashSet<i64> = if one_per_person {
            let entry_owner: HashMap<i64, i64> =
                state.entries.iter().map(|e| (e.id, e.person_id)).collect();
            state
                .winners
                .iter()
                .filter(|w| w.campaign_id == campaign_id)
                .filter_map(|w| entry_owner.get(&w.entry_id).copied())
                .collect()
        } else {
            HashSet::new()
        };

        Ok(state
            .entries
            .iter()
            .filter(|e| e.campaign_id == campaign_id)
            .filter(|e| !won_this_prize.contains(&e.id))
            .filter(|e| !excluded_people.contains(&e.person_id))
            .filter_map(|e| state.candidate(e))
            .collect())
    }

    async fn record_win(
        &self,
        commit: &WinCommit,
    ) -> AppResult<Result<winners::Model, ConflictKind>> {
        let mut state = self.lock()?;

        if state
            .winners
            .iter()
            .any(|w| w.prize_id == commit.prize_id && w.entry_id == commit.entry_id)
        {
            return Ok(Err(ConflictKind::EntryAlreadyWon));
        }

        let person_id = state
            .entries
            .iter()
            .find(|e| e.id == commit.entry_id && e.campaign_id == commit.campaign_id)
            .map(|e| e.person_id)
            .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", commit.entry_id)))?;

        if commit.one_per_person {
            let sibling_ids: HashSet<i64> = state
                .entries
                .iter()
                .filter(|e| e.campaign_id == commit.campaign_id && e.person_id == person_id)
                .map(|e| e.id)
                .collect();
            if state
                .winners
                .iter()
                .any(|w| w.campaign_id == commit.campaign_id && sibling_ids.contains(&w.entry_id))
            {
                return Ok(Err(ConflictKind::PersonAlreadyWon));
            }
        }

        if let Some(quota) = commit.quota_limit {
            let current = state
                .winners
                .iter()
                .filter(|w| w.prize_id == commit.prize_id)
                .count() as i64;
            if current >= quota {
                return Ok(Err(ConflictKind::QuotaFilled));
            }
        }

        let id = state.alloc_id();
        let record = winners::Model {
            id,
            campaign_id: commit.campaign_id,
            prize_id: commit.prize_id,
            entry_id: commit.entry_id,
            created_at: Some(Utc::now()),
        };
        state.winners.push(record.clone());
        if let Some(entry) = state.entries.iter_mut().find(|e| e.id == commit.entry_id) {
            entry.consumed = true;
        }

        Ok(Ok(record))
    }
}
