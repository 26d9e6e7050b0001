use std::fmt;
use std::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

use crate::generation_engine::errors::{RequestError, StructuralError};

// ---------------------------------------------------------------------------
// Number primitives
// ---------------------------------------------------------------------------

/// Smallest and largest playable number.
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 60;

/// Numbers per entry.
pub const ENTRY_SIZE: usize = 6;

/// Longest label kept on an entry, in characters.
pub const MAX_LABEL_CHARS: usize = 50;

const fn range_mask(lo: u8, hi: u8) -> u64 {
    let mut mask = 0u64;
    let mut n = lo;
    while n <= hi {
        mask |= 1 << n;
        n += 1;
    }
    mask
}

/// Bits 1..=60.
pub const FULL_MASK: u64 = range_mask(MIN_NUMBER, MAX_NUMBER);
/// Low half, 1..=30.
pub const LOW_MASK: u64 = range_mask(1, 30);
/// High half, 31..=60.
pub const HIGH_MASK: u64 = range_mask(31, 60);

/// One mask per decade bucket `n / 10`; bucket 6 holds only 60.
pub const DECADE_MASKS: [u64; 7] = {
    let mut masks = [0u64; 7];
    let mut n = MIN_NUMBER;
    while n <= MAX_NUMBER {
        masks[(n / 10) as usize] |= 1 << n;
        n += 1;
    }
    masks
};

/// One mask per terminal digit `n % 10`.
pub const TERMINAL_MASKS: [u64; 10] = {
    let mut masks = [0u64; 10];
    let mut n = MIN_NUMBER;
    while n <= MAX_NUMBER {
        masks[(n % 10) as usize] |= 1 << n;
        n += 1;
    }
    masks
};

/// A set of numbers in 1..=60 stored as a bitmask (bit `n` = number `n`).
///
/// This is the identity of an [`Entry`]: two entries are the same entry iff
/// their `NumberSet`s are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NumberSet(u64);

impl NumberSet {
    pub const EMPTY: NumberSet = NumberSet(0);
    pub const ALL: NumberSet = NumberSet(FULL_MASK);

    /// Build from numbers already known to be in range. Out-of-range values
    /// are ignored.
    pub fn from_numbers<I: IntoIterator<Item = u8>>(numbers: I) -> Self {
        let bits = numbers
            .into_iter()
            .filter(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n))
            .fold(0u64, |acc, n| acc | (1 << n));
        NumberSet(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, n: u8) -> bool {
        (MIN_NUMBER..=MAX_NUMBER).contains(&n) && self.0 & (1 << n) != 0
    }

    pub fn insert(&mut self, n: u8) -> bool {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) || self.contains(n) {
            return false;
        }
        self.0 |= 1 << n;
        true
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: NumberSet) -> NumberSet {
        NumberSet(self.0 | other.0)
    }

    pub fn difference(self, other: NumberSet) -> NumberSet {
        NumberSet(self.0 & !other.0)
    }

    /// Every number in 1..=60 not in `self`.
    pub fn complement(self) -> NumberSet {
        NumberSet(FULL_MASK & !self.0)
    }

    /// How many members fall inside `mask`.
    pub fn count_in(self, mask: u64) -> u8 {
        (self.0 & mask).count_ones() as u8
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (MIN_NUMBER..=MAX_NUMBER).filter(move |&n| self.0 & (1 << n) != 0)
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        NumberSet::from_numbers(iter)
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Which generator produced an entry. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Supplied by the user, passed through verbatim.
    Seed,
    /// Composed only of seed numbers.
    Derived,
    /// One or two seed numbers mixed with numbers absent from every seed.
    Exploratory,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Seed        => write!(f, "Seed"),
            Provenance::Derived     => write!(f, "Derived"),
            Provenance::Exploratory => write!(f, "Exploratory"),
        }
    }
}

/// Six distinct numbers in 1..=60 plus an optional label.
///
/// Equality and hashing use the number set only; label and provenance are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    set: NumberSet,
    label: String,
    provenance: Provenance,
}

impl Entry {
    /// Validate `numbers` and build a `Seed` entry.
    ///
    /// Checks run in order: count, range, duplicates. The label is cut to
    /// [`MAX_LABEL_CHARS`] characters and then trimmed; it is never rejected.
    pub fn new<I>(numbers: I, label: &str) -> Result<Entry, StructuralError>
    where
        I: IntoIterator<Item = u32>,
    {
        let raw: Vec<u32> = numbers.into_iter().collect();
        if raw.len() != ENTRY_SIZE {
            return Err(StructuralError::WrongCount { found: raw.len() });
        }
        if let Some(&value) = raw
            .iter()
            .find(|&&v| v < MIN_NUMBER as u32 || v > MAX_NUMBER as u32)
        {
            return Err(StructuralError::OutOfRange { value });
        }

        let mut set = NumberSet::EMPTY;
        for &value in &raw {
            let n = value as u8;
            if !set.insert(n) {
                return Err(StructuralError::Duplicate { value: n });
            }
        }

        Ok(Entry {
            set,
            label: clean_label(label),
            provenance: Provenance::Seed,
        })
    }

    /// Build an unlabeled entry for a generator.
    pub fn generated(numbers: &[u8], provenance: Provenance) -> Result<Entry, StructuralError> {
        Entry::new(numbers.iter().map(|&n| n as u32), "").map(|e| e.with_provenance(provenance))
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Entry {
        self.provenance = provenance;
        self
    }

    /// Numbers in ascending order.
    pub fn numbers(&self) -> [u8; ENTRY_SIZE] {
        let mut out = [0u8; ENTRY_SIZE];
        for (slot, n) in out.iter_mut().zip(self.set.iter()) {
            *slot = n;
        }
        out
    }

    pub fn number_set(&self) -> NumberSet {
        self.set
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn profile(&self) -> DistributionProfile {
        DistributionProfile::of(self.set)
    }

    /// Six zero-padded two-digit tokens, e.g. `"03 08 11 14 16 29"`.
    pub fn numbers_str(&self) -> String {
        self.set
            .iter()
            .map(|n| format!("{n:02}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.set.hash(state);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numbers_str())
    }
}

fn clean_label(label: &str) -> String {
    let cut: String = label.chars().take(MAX_LABEL_CHARS).collect();
    cut.trim().to_string()
}

/// Wire shape of an [`Entry`]; decoding re-runs structural validation.
#[derive(Serialize, Deserialize)]
struct EntryRecord {
    numbers: Vec<u32>,
    #[serde(default)]
    label: String,
    provenance: Provenance,
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        EntryRecord {
            numbers: entry.set.iter().map(u32::from).collect(),
            label: entry.label,
            provenance: entry.provenance,
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = StructuralError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        Entry::new(record.numbers, &record.label).map(|e| e.with_provenance(record.provenance))
    }
}

// ---------------------------------------------------------------------------
// Distribution profile
// ---------------------------------------------------------------------------

/// Bucket counts for one number set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionProfile {
    /// Numbers in 1..=30.
    pub low: u8,
    /// Numbers in 31..=60.
    pub high: u8,
    /// Count per decade bucket `n / 10`.
    pub decades: [u8; 7],
    /// Count per terminal digit `n % 10`.
    pub terminals: [u8; 10],
}

impl DistributionProfile {
    pub fn of(set: NumberSet) -> Self {
        DistributionProfile {
            low: set.count_in(LOW_MASK),
            high: set.count_in(HIGH_MASK),
            decades: DECADE_MASKS.map(|m| set.count_in(m)),
            terminals: TERMINAL_MASKS.map(|m| set.count_in(m)),
        }
    }

    /// Fullest decade bucket as `(bucket, count)`; lowest bucket wins ties.
    pub fn max_decade(&self) -> (u8, u8) {
        max_bucket(&self.decades)
    }

    /// Most repeated terminal digit as `(digit, count)`; lowest digit wins ties.
    pub fn max_terminal(&self) -> (u8, u8) {
        max_bucket(&self.terminals)
    }
}

fn max_bucket(counts: &[u8]) -> (u8, u8) {
    counts
        .iter()
        .enumerate()
        .fold((0u8, 0u8), |best, (i, &c)| if c > best.1 { (i as u8, c) } else { best })
}

// ---------------------------------------------------------------------------
// Generation request / response types
// ---------------------------------------------------------------------------

/// Caller-facing configuration of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Total entries requested = seed count × multiplier.
    pub multiplier: u32,
    /// Price charged per entry actually produced.
    pub unit_price: u64,
    /// `Some` makes the run fully reproducible; `None` draws from entropy.
    pub rng_seed: Option<u64>,
    /// Consecutive rejected attempts a sampling strategy tolerates before
    /// giving up.
    pub retry_budget: u32,
}

pub const DEFAULT_UNIT_PRICE: u64 = 5;
pub const DEFAULT_RETRY_BUDGET: u32 = 1000;

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            multiplier: 1,
            unit_price: DEFAULT_UNIT_PRICE,
            rng_seed: None,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl GenerationRequest {
    /// Minimal constructor; everything but the multiplier takes its default.
    pub fn new(multiplier: u32) -> Self {
        GenerationRequest { multiplier, ..Default::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_unit_price(mut self, unit_price: u64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Decode a request from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        let request: GenerationRequest = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.multiplier == 0 {
            return Err(RequestError::ZeroMultiplier);
        }
        Ok(())
    }
}

/// Requested size of each batch for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchPlan {
    pub total: usize,
    pub seeds: usize,
    pub derived: usize,
    pub exploratory: usize,
}

impl BatchPlan {
    /// `total = seeds × multiplier`, `derived = ⌊total·¾⌋ − seeds`,
    /// `exploratory = total − seeds − derived`.
    ///
    /// Only the requested `derived` count is clamped at zero; `exploratory`
    /// uses the unclamped value, so it is always `total − ⌊total·¾⌋`. At 1×
    /// that asks for exploratory entries on top of the seeds.
    pub fn for_seeds(seed_count: usize, multiplier: u32) -> Self {
        let total = seed_count * multiplier as usize;
        let three_quarters = total * 3 / 4;
        let derived = three_quarters.saturating_sub(seed_count);
        let exploratory = total - three_quarters;
        BatchPlan { total, seeds: seed_count, derived, exploratory }
    }

    /// Sum of the three requested batch sizes. Exceeds `total` at 1×.
    pub fn requested(&self) -> usize {
        self.seeds + self.derived + self.exploratory
    }
}

/// Why a sampling strategy stopped before reaching its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExhaustionCause {
    /// `attempts` consecutive draws were rejected.
    RetryBudget { attempts: u32 },
    /// The candidate pool cannot supply a full draw.
    PoolTooSmall { needed: usize, available: usize },
}

/// A strategy produced fewer entries than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartialYield {
    pub provenance: Provenance,
    pub requested: usize,
    pub produced: usize,
    pub cause: ExhaustionCause,
}

impl PartialYield {
    pub fn shortfall(&self) -> usize {
        self.requested - self.produced
    }
}

impl fmt::Display for PartialYield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} batch produced {} of {} requested entries",
            self.provenance, self.produced, self.requested
        )?;
        match self.cause {
            ExhaustionCause::RetryBudget { attempts } => {
                write!(f, " (gave up after {attempts} rejected attempts)")
            }
            ExhaustionCause::PoolTooSmall { needed, available } => {
                write!(f, " (needed {needed} candidate numbers, only {available} available)")
            }
        }
    }
}

/// Entries produced per provenance class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub seeds: usize,
    pub derived: usize,
    pub exploratory: usize,
}

/// Everything one generation run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub plan: BatchPlan,
    pub seeds: Vec<Entry>,
    pub derived: Vec<Entry>,
    pub exploratory: Vec<Entry>,
    /// One warning per strategy that under-yielded.
    pub warnings: Vec<PartialYield>,
    /// Seeds left out because an earlier seed had the same numbers.
    pub absorbed_seeds: usize,
    pub unit_price: u64,
}

impl GenerationReport {
    pub fn counts(&self) -> ClassCounts {
        ClassCounts {
            seeds: self.seeds.len(),
            derived: self.derived.len(),
            exploratory: self.exploratory.len(),
        }
    }

    /// Entries actually produced across all three batches.
    pub fn yielded(&self) -> usize {
        self.seeds.len() + self.derived.len() + self.exploratory.len()
    }

    /// Cost of the entries actually produced, never of the requested total.
    pub fn cost(&self) -> u64 {
        self.yielded() as u64 * self.unit_price
    }

    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// All entries in output order: seeds, derived, exploratory.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.seeds.iter().chain(&self.derived).chain(&self.exploratory)
    }
}
