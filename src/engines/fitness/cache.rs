use super::score::FitnessScore;
use crate::catalog::ItemId;
use crate::config::EvalConfigKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Identity of a scored ordering: the item ids in order plus the scoring parameters.
pub type CacheKey = (Vec<ItemId>, EvalConfigKey);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Run-scoped memo of fitness scores, shared across scoring threads.
///
/// Entries are never evicted. Two threads racing on the same key both compute
/// the same score, so whichever insert lands is correct.
#[derive(Debug, Default)]
pub struct EvaluationCache {
    data: Mutex<HashMap<CacheKey, FitnessScore>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<FitnessScore> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        let found = data.get(key).copied();
        drop(data);

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub fn insert(&self, key: CacheKey, score: FitnessScore) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.entry(key).or_insert(score);
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
