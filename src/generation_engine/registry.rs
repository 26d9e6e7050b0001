use std::collections::HashSet;

use crate::generation_engine::models::{Entry, NumberSet};

/// Identities accepted so far in one generation run.
///
/// Append-only. Each run builds its own registry; it is never shared
/// between runs.
#[derive(Debug, Default)]
pub struct UniquenessRegistry {
    seen: HashSet<NumberSet>,
}

impl UniquenessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry`'s identity. Returns `false` without changing anything
    /// if the same number set was already registered.
    pub fn register(&mut self, entry: &Entry) -> bool {
        self.seen.insert(entry.number_set())
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.seen.contains(&entry.number_set())
    }

    /// Number of distinct identities registered.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
