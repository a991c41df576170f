use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Rejected attempt to build a histogram from raw counts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistogramError {
    #[error("Histogram key {key:?} has a zero count")]
    ZeroCount { key: String },
}

/// Occurrence counts keyed by n-gram key
///
/// Serializes as a plain JSON object, the same shape a JS tracer's `hist`
/// object produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: HashMap<String, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`, creating it with count 1 if absent
    pub fn increment(&mut self, key: String) -> u64 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of n-grams observed
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Calculate key coverage (unique keys vs total occurrences)
    ///
    /// High coverage indicates diverse instruction patterns.
    /// Low coverage indicates repetitive patterns (tight loops).
    pub fn coverage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        self.counts.len() as f64 / total as f64
    }

    /// Find the `k` most frequent keys (useful for identifying hot paths)
    ///
    /// Ties are broken by key so the result is deterministic.
    pub fn top(&self, k: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(k);
        entries
    }

    pub fn into_inner(self) -> HashMap<String, u64> {
        self.counts
    }
}

/// Counts must all be positive; a key is only present once it was seen
impl TryFrom<HashMap<String, u64>> for Histogram {
    type Error = HistogramError;

    fn try_from(counts: HashMap<String, u64>) -> Result<Self, Self::Error> {
        if let Some((key, _)) = counts.iter().find(|(_, count)| **count == 0) {
            return Err(HistogramError::ZeroCount { key: key.clone() });
        }
        Ok(Self { counts })
    }
}
