use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::draw::rng::RandomSource;

/// 显示池为空时的回退字符集
const FALLBACK_POOL: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// 播报调度表：tick 进度越过各阈值后间隔逐档放慢
///
/// 取代"回调里取消并重建定时器"的自引用写法；
/// interval_at 是纯函数，节奏可以离线验证
#[derive(Debug, Clone)]
pub struct RevealSchedule {
    pub total_ticks: u32,
    /// 显示窗口大小
    pub slots: usize,
    /// 最终帧中奖值固定落位的下标
    pub winner_slot: usize,
    pub base_interval: Duration,
    /// (总进度阈值, 该段间隔)，按阈值升序
    pub slowdown: [(f64, Duration); 3],
}

impl Default for RevealSchedule {
    fn default() -> Self {
        Self {
            total_ticks: 60,
            slots: 5,
            winner_slot: 2,
            base_interval: Duration::from_millis(50),
            slowdown: [
                (0.6, Duration::from_millis(120)),
                (0.8, Duration::from_millis(220)),
                (0.9, Duration::from_millis(420)),
            ],
        }
    }
}

impl RevealSchedule {
    /// 第 tick 次跳动前等待的间隔（tick 从 1 计）
    pub fn interval_at(&self, tick: u32) -> Duration {
        let progress = f64::from(tick) / f64::from(self.total_ticks);
        let mut interval = self.base_interval;
        for (threshold, slowed) in self.slowdown {
            if progress > threshold {
                interval = slowed;
            }
        }
        interval
    }
}

/// 播报状态机：Idle -> Spinning -> Settling -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Spinning,
    Settling,
}

/// 单次跳动推送给显示端的帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    pub tick: u32,
    pub phase: RevealPhase,
    pub slots: Vec<String>,
}

fn effective_pool(pool: Vec<String>) -> Vec<String> {
    if pool.is_empty() {
        FALLBACK_POOL.iter().map(|s| s.to_string()).collect()
    } else {
        pool
    }
}

/// 滚动帧：窗口各格从显示池均匀随机取值
fn rolling_window(rng: &mut dyn RandomSource, pool: &[String], slots: usize) -> Vec<String> {
    (0..slots)
        .map(|_| pool[rng.pick_index(pool.len())].clone())
        .collect()
}

/// 最终帧：中奖值强制落在 winner_slot，其余格保持随机
fn settled_window(
    rng: &mut dyn RandomSource,
    pool: &[String],
    slots: usize,
    winner_slot: usize,
    winner: &str,
) -> Vec<String> {
    let mut window = rolling_window(rng, pool, slots);
    if winner_slot < window.len() {
        window[winner_slot] = winner.to_string();
    }
    window
}

/// 播报序列器：一个显示位同一时刻至多一条活动序列
///
/// start 先同步取消旧序列再启动新任务，不留挂起的 tick；
/// 正确性与中奖分配无关，仅负责展示节奏
pub struct RevealSequencer {
    schedule: RevealSchedule,
    active: Option<JoinHandle<()>>,
}

impl RevealSequencer {
    pub fn new(schedule: RevealSchedule) -> Self {
        Self {
            schedule,
            active: None,
        }
    }

    /// 启动一条新序列，返回帧接收端
    ///
    /// 帧序列: Spinning x (total_ticks - 1) -> Settling(中奖值落位) -> Idle
    pub fn start(
        &mut self,
        winner: String,
        display_pool: Vec<String>,
        mut rng: Box<dyn RandomSource>,
    ) -> mpsc::UnboundedReceiver<RevealFrame> {
        self.cancel();

        let (tx, rx) = mpsc::unbounded_channel();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            let pool = effective_pool(display_pool);
            for tick in 1..=schedule.total_ticks {
                tokio::time::sleep(schedule.interval_at(tick)).await;

                if tick < schedule.total_ticks {
                    let frame = RevealFrame {
                        tick,
                        phase: RevealPhase::Spinning,
                        slots: rolling_window(rng.as_mut(), &pool, schedule.slots),
                    };
                    if tx.send(frame).is_err() {
                        return;
                    }
                } else {
                    let settle = RevealFrame {
                        tick,
                        phase: RevealPhase::Settling,
                        slots: settled_window(
                            rng.as_mut(),
                            &pool,
                            schedule.slots,
                            schedule.winner_slot,
                            &winner,
                        ),
                    };
                    if tx.send(settle.clone()).is_err() {
                        return;
                    }
                    let _ = tx.send(RevealFrame {
                        tick,
                        phase: RevealPhase::Idle,
                        slots: settle.slots,
                    });
                }
            }
        });

        self.active = Some(handle);
        rx
    }

    /// 显式、立即取消当前序列（若有）
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RevealSequencer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::rng::SeededRandom;

    #[test]
    fn test_interval_slows_at_thresholds() {
        let schedule = RevealSchedule::default();
        assert_eq!(schedule.interval_at(1), Duration::from_millis(50));
        assert_eq!(schedule.interval_at(36), Duration::from_millis(50));
        assert_eq!(schedule.interval_at(37), Duration::from_millis(120));
        assert_eq!(schedule.interval_at(49), Duration::from_millis(220));
        assert_eq!(schedule.interval_at(55), Duration::from_millis(420));
        assert_eq!(schedule.interval_at(60), Duration::from_millis(420));
    }

    #[test]
    fn test_fallback_pool_when_empty() {
        let pool = effective_pool(vec![]);
        assert_eq!(pool.len(), FALLBACK_POOL.len());
        assert_eq!(pool[0], "0");
    }

    #[test]
    fn test_settled_window_forces_winner_slot() {
        let mut rng = SeededRandom::new(9);
        let pool = vec!["a".to_string(), "b".to_string()];
        let window = settled_window(&mut rng, &pool, 5, 2, "CODE-7");
        assert_eq!(window.len(), 5);
        assert_eq!(window[2], "CODE-7");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_settles_then_idles() {
        let schedule = RevealSchedule {
            total_ticks: 10,
            ..Default::default()
        };
        let winner_slot = schedule.winner_slot;
        let mut sequencer = RevealSequencer::new(schedule);

        let mut rx = sequencer.start(
            "CODE-7".to_string(),
            vec!["x".to_string(), "y".to_string()],
            Box::new(SeededRandom::new(1)),
        );

        let mut frames = Vec::new();
        while let Some(frame) = rx.recv().await {
            frames.push(frame);
        }

        // 9 个滚动帧 + 落定帧 + 回到空闲
        assert_eq!(frames.len(), 11);
        assert!(
            frames[..9]
                .iter()
                .all(|f| f.phase == RevealPhase::Spinning)
        );
        let settle = &frames[9];
        assert_eq!(settle.phase, RevealPhase::Settling);
        assert_eq!(settle.slots[winner_slot], "CODE-7");
        assert_eq!(frames[10].phase, RevealPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_prior_sequence() {
        let mut sequencer = RevealSequencer::new(RevealSchedule {
            total_ticks: 10,
            ..Default::default()
        });

        let mut first = sequencer.start(
            "FIRST".to_string(),
            vec![],
            Box::new(SeededRandom::new(1)),
        );
        let mut second = sequencer.start(
            "SECOND".to_string(),
            vec![],
            Box::new(SeededRandom::new(2)),
        );

        // 被取消的序列绝不落定
        let mut first_frames = Vec::new();
        while let Some(frame) = first.recv().await {
            first_frames.push(frame);
        }
        assert!(
            first_frames
                .iter()
                .all(|f| f.phase != RevealPhase::Settling)
        );

        let mut settled = false;
        while let Some(frame) = second.recv().await {
            if frame.phase == RevealPhase::Settling {
                assert_eq!(frame.slots[2], "SECOND");
                settled = true;
            }
        }
        assert!(settled);
    }
}
