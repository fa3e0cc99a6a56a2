use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Tracks which question indices were used in the current cycle.
///
/// Every index is drawn exactly once per cycle, in random order, before any repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPool {
    len: usize,
    consumed: HashSet<usize>,
    cycle: u32,
}

impl QuestionPool {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            consumed: HashSet::with_capacity(len),
            cycle: 0,
        }
    }

    /// Forget the current cycle.
    pub fn reset(&mut self) {
        self.consumed.clear();
        self.cycle = 0;
    }

    /// Draw a not-yet-consumed index uniformly at random, starting a new cycle first
    /// when everything has been consumed. Returns `None` only for an empty pool.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.consumed.len() >= self.len {
            self.consumed.clear();
            self.cycle = self.cycle.saturating_add(1);
        }

        let available: Vec<usize> = (0..self.len)
            .filter(|index| !self.consumed.contains(index))
            .collect();
        let index = *available.choose(rng)?;
        self.consumed.insert(index);
        Some(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed.len()
    }

    #[must_use]
    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.contains(&index)
    }

    /// Number of completed cycles since the last reset.
    #[must_use]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn each_cycle_covers_every_index_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = QuestionPool::new(6);

        for cycle in 0..25 {
            let mut seen: Vec<usize> = (0..6).map(|_| pool.draw(&mut rng).unwrap()).collect();
            assert_eq!(pool.cycle(), cycle);
            seen.sort_unstable();
            assert_eq!(seen, [0, 1, 2, 3, 4, 5], "cycle {cycle} repeated an index");
        }
    }

    #[test]
    fn consumed_set_stays_in_range_and_resets_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = QuestionPool::new(2);

        let first = pool.draw(&mut rng).unwrap();
        let second = pool.draw(&mut rng).unwrap();
        assert_ne!(first, second);
        assert_eq!(pool.consumed(), 2);
        assert!(pool.is_consumed(0) && pool.is_consumed(1));

        let third = pool.draw(&mut rng).unwrap();
        assert!(third < 2);
        assert_eq!(pool.consumed(), 1);
        assert_eq!(pool.cycle(), 1);
    }

    #[test]
    fn order_varies_between_cycles() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut pool = QuestionPool::new(8);
        let orders: Vec<Vec<usize>> = (0..10)
            .map(|_| (0..8).map(|_| pool.draw(&mut rng).unwrap()).collect())
            .collect();
        assert!(orders.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn empty_pool_never_draws() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = QuestionPool::new(0);
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), None);
    }

    #[test]
    fn reset_clears_cycle_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = QuestionPool::new(3);
        for _ in 0..4 {
            pool.draw(&mut rng);
        }
        pool.reset();
        assert_eq!(pool.consumed(), 0);
        assert_eq!(pool.cycle(), 0);
        assert_eq!(pool.len(), 3);
    }
}
