use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 可注入随机源：在候选列表上做均匀下标选取
///
/// 调用前提 len > 0，由 DrawEngine 在空候选集时提前返回保证
pub trait RandomSource: Send {
    fn pick_index(&mut self, len: usize) -> usize;
}

/// 生产默认：线程本地 RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// 固定种子随机源：同一库状态 + 同一种子 => 同一选取结果
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_repeatable() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        let picks_a: Vec<usize> = (0..10).map(|_| a.pick_index(7)).collect();
        let picks_b: Vec<usize> = (0..10).map(|_| b.pick_index(7)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_pick_in_bounds() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
        }
        let mut thread = ThreadRandom;
        assert_eq!(thread.pick_index(1), 0);
    }
}
