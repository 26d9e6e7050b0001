use rand::Rng;

use crate::generation_engine::models::{Entry, NumberSet};

/// A multiset of candidate numbers to draw from without replacement.
///
/// A number that appears in several seeds appears that many times here, so
/// it is proportionally more likely to be drawn.
#[derive(Debug, Clone, Default)]
pub struct NumberPool {
    numbers: Vec<u8>,
}

impl NumberPool {
    /// Every number of every seed, duplicates kept.
    pub fn from_seeds(seeds: &[Entry]) -> Self {
        NumberPool {
            numbers: seeds.iter().flat_map(|e| e.numbers()).collect(),
        }
    }

    /// Each member of `set` exactly once.
    pub fn from_set(set: NumberSet) -> Self {
        NumberPool { numbers: set.iter().collect() }
    }

    /// Numbers in 1..=60 that appear in no seed.
    pub fn novel(seeds: &[Entry]) -> Self {
        let used = seeds
            .iter()
            .fold(NumberSet::EMPTY, |acc, e| acc.union(e.number_set()));
        NumberPool::from_set(used.complement())
    }

    /// Pool size, duplicates included.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Distinct numbers in the pool.
    pub fn distinct(&self) -> NumberSet {
        self.numbers.iter().copied().collect()
    }

    /// Draw `k` slots without replacement, uniformly over the pool at each
    /// draw. Returns `None` when the pool holds fewer than `k` slots.
    ///
    /// Values may repeat when the pool itself holds repeats.
    pub fn sample<R: Rng>(&self, rng: &mut R, k: usize) -> Option<Vec<u8>> {
        if k > self.numbers.len() {
            return None;
        }
        let mut scratch = self.numbers.clone();

        // Partial Fisher-Yates: the first k slots end up as the sample.
        for i in 0..k {
            let j = rng.gen_range(i..scratch.len());
            scratch.swap(i, j);
        }
        scratch.truncate(k);
        Some(scratch)
    }
}
