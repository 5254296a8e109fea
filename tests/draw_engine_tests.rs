use std::collections::HashSet;
use std::sync::Arc;

use luckydraw_backend::draw::{DrawEngine, SeededRandom, SpinOutcome};
use luckydraw_backend::entities::PrizeMode;
use luckydraw_backend::error::AppError;
use luckydraw_backend::store::MemoryStore;

fn engine_with(store: Arc<MemoryStore>, seed: u64) -> DrawEngine {
    DrawEngine::new(store, Box::new(SeededRandom::new(seed)), 3)
}

/// 三个码抢两个名额：两次抽中不同的码，第三次名额耗尽
#[tokio::test]
async fn quota_exhaustion_carries_counts() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("年会", false);
    let prize = store.add_prize(campaign, "手机", 2, PrizeMode::Random);
    for i in 0..3 {
        let person = store.add_person(&format!("参与者{i}"), Some("0901234567"));
        store.add_entry(campaign, person, &format!("CODE-{i}"));
    }
    let engine = engine_with(store.clone(), 7);

    let mut codes = HashSet::new();
    for _ in 0..2 {
        match engine.spin(campaign, prize, false).await.unwrap() {
            SpinOutcome::Won(w) => assert!(codes.insert(w.code)),
            other => panic!("expected a winner, got {other:?}"),
        }
    }

    match engine.spin(campaign, prize, false).await.unwrap() {
        SpinOutcome::Exhausted {
            winners_count,
            winners_quota,
        } => {
            assert_eq!(winners_count, Some(2));
            assert_eq!(winners_quota, Some(2));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(store.winners_snapshot().len(), 2);
}

/// 预设名单按登记顺序优先发放，用尽后回落随机
#[tokio::test]
async fn presets_win_before_random_pool() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("路演", false);
    let prize = store.add_prize(campaign, "音箱", 3, PrizeMode::PresetFirst);

    let mut entry_ids = Vec::new();
    for i in 0..4 {
        let person = store.add_person(&format!("嘉宾{i}"), None);
        entry_ids.push(store.add_entry(campaign, person, &format!("G-{i}")));
    }
    // 登记顺序与插入顺序相反，发放顺序必须跟登记顺序走
    store.add_preset(prize, entry_ids[2]);
    store.add_preset(prize, entry_ids[0]);

    let engine = engine_with(store.clone(), 11);

    let first = engine.spin(campaign, prize, false).await.unwrap();
    let second = engine.spin(campaign, prize, false).await.unwrap();
    match (first, second) {
        (SpinOutcome::Won(a), SpinOutcome::Won(b)) => {
            assert_eq!(a.code, "G-2");
            assert_eq!(b.code, "G-0");
        }
        other => panic!("expected two preset winners, got {other:?}"),
    }

    // 预设用尽，第三次从剩余池随机
    match engine.spin(campaign, prize, false).await.unwrap() {
        SpinOutcome::Won(w) => assert!(w.code == "G-1" || w.code == "G-3"),
        other => panic!("expected a random winner, got {other:?}"),
    }
}

/// 一人一奖：同一人的其它码在后续奖品中被排除
#[tokio::test]
async fn one_win_per_person_excludes_sibling_entries() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("内购会", true);
    let prize_a = store.add_prize(campaign, "一等奖", 1, PrizeMode::Random);
    let prize_b = store.add_prize(campaign, "二等奖", 1, PrizeMode::Random);

    // 同一人持有两个码，是两个奖品唯一的候选
    let person = store.add_person("王老板", Some("0987654321"));
    store.add_entry(campaign, person, "VIP-1");
    store.add_entry(campaign, person, "VIP-2");

    let engine = engine_with(store.clone(), 3);

    match engine.spin(campaign, prize_a, false).await.unwrap() {
        SpinOutcome::Won(_) => {}
        other => panic!("expected a winner, got {other:?}"),
    }

    // 第二个奖品的候选集因一人一奖而为空，不带名额统计
    match engine.spin(campaign, prize_b, false).await.unwrap() {
        SpinOutcome::Exhausted {
            winners_count,
            winners_quota,
        } => {
            assert_eq!(winners_count, None);
            assert_eq!(winners_quota, None);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(store.winners_snapshot().len(), 1);
}

/// force 仅跳过名额检查，(prize, entry) 唯一仍然强制
#[tokio::test]
async fn force_bypasses_quota_but_not_uniqueness() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("加场", false);
    let prize = store.add_prize(campaign, "加码奖", 1, PrizeMode::Random);
    for i in 0..2 {
        let person = store.add_person(&format!("观众{i}"), None);
        store.add_entry(campaign, person, &format!("X-{i}"));
    }
    let engine = engine_with(store.clone(), 5);

    // 占满名额
    assert!(matches!(
        engine.spin(campaign, prize, false).await.unwrap(),
        SpinOutcome::Won(_)
    ));
    assert!(matches!(
        engine.spin(campaign, prize, false).await.unwrap(),
        SpinOutcome::Exhausted { .. }
    ));

    // force 突破名额，但只能选中尚未中奖的码
    match engine.spin(campaign, prize, true).await.unwrap() {
        SpinOutcome::Won(_) => {}
        other => panic!("expected a forced winner, got {other:?}"),
    }
    let winners = store.winners_snapshot();
    assert_eq!(winners.len(), 2);
    let entry_ids: HashSet<i64> = winners.iter().map(|w| w.entry_id).collect();
    assert_eq!(entry_ids.len(), 2);

    // 两个码都已中奖，force 也无候选可选
    assert!(matches!(
        engine.spin(campaign, prize, true).await.unwrap(),
        SpinOutcome::Exhausted { .. }
    ));
}

/// 同一库状态 + 同一种子 => 同一中奖码
#[tokio::test]
async fn seeded_spins_are_deterministic() {
    let mut winning_codes = Vec::new();
    for _ in 0..2 {
        let store = Arc::new(MemoryStore::new());
        let campaign = store.add_campaign("复现", false);
        let prize = store.add_prize(campaign, "样品", 1, PrizeMode::Random);
        for i in 0..10 {
            let person = store.add_person(&format!("用户{i}"), None);
            store.add_entry(campaign, person, &format!("R-{i}"));
        }
        let engine = engine_with(store, 2024);
        match engine.spin(campaign, prize, false).await.unwrap() {
            SpinOutcome::Won(w) => winning_codes.push(w.code),
            other => panic!("expected a winner, got {other:?}"),
        }
    }
    assert_eq!(winning_codes[0], winning_codes[1]);
}

/// 中奖同时标记码已消耗，同一原子单元内完成
#[tokio::test]
async fn winning_marks_entry_consumed() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("消耗", false);
    let prize = store.add_prize(campaign, "盲盒", 1, PrizeMode::Random);
    let person = store.add_person("独苗", Some("0912345678"));
    let entry = store.add_entry(campaign, person, "ONLY");
    let engine = engine_with(store.clone(), 1);

    match engine.spin(campaign, prize, false).await.unwrap() {
        SpinOutcome::Won(w) => {
            assert_eq!(w.code, "ONLY");
            // 尾三位脱敏
            assert_eq!(w.phone_masked, "0912345xxx");
        }
        other => panic!("expected a winner, got {other:?}"),
    }
    let snapshot = store.entry_snapshot(entry).unwrap();
    assert!(snapshot.consumed);
}

/// 活动或奖品不存在时不产生任何写入
#[tokio::test]
async fn unknown_ids_are_not_found() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("空壳", false);
    let engine = engine_with(store.clone(), 1);

    assert!(matches!(
        engine.spin(999, 1, false).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        engine.spin(campaign, 999, false).await,
        Err(AppError::NotFound(_))
    ));
    assert!(store.winners_snapshot().is_empty());
}

/// 并发抢最后一个名额：恰好一个成功，其余观察到名额耗尽
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_spins_never_exceed_quota() {
    let store = Arc::new(MemoryStore::new());
    let campaign = store.add_campaign("并发", false);
    let prize = store.add_prize(campaign, "压轴奖", 1, PrizeMode::Random);
    for i in 0..16 {
        let person = store.add_person(&format!("抢夺者{i}"), None);
        store.add_entry(campaign, person, &format!("C-{i}"));
    }
    let engine = Arc::new(engine_with(store.clone(), 99));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.spin(campaign, prize, false).await
        }));
    }

    let mut won = 0;
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(SpinOutcome::Won(_)) => won += 1,
            Ok(SpinOutcome::Exhausted { .. }) => exhausted += 1,
            // 重试预算耗尽属于允许的并发结果，但不能多发奖
            Err(AppError::Conflict(_)) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(won, 1);
    assert!(exhausted >= 1);
    assert_eq!(store.winners_snapshot().len(), 1);
}
