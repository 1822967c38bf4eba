use super::cache::{CacheStats, EvaluationCache};
use super::score::{score_genres, FitnessScore};
use crate::catalog::Catalog;
use crate::config::EvalConfig;
use crate::engines::generation::Sequence;
use rayon::prelude::*;
use std::sync::Arc;

/// Scores sequences of one catalog under one immutable [`EvalConfig`].
///
/// Each evaluator owns its cache, so concurrent runs never share memoized scores.
pub struct FitnessEvaluator {
    catalog: Arc<Catalog>,
    config: EvalConfig,
    cache: EvaluationCache,
}

impl FitnessEvaluator {
    pub fn new(catalog: Arc<Catalog>, config: EvalConfig) -> Self {
        Self {
            catalog,
            config,
            cache: EvaluationCache::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(&self, sequence: &Sequence) -> FitnessScore {
        let key = (sequence.ids(&self.catalog), self.config.cache_key());
        if let Some(score) = self.cache.get(&key) {
            return score;
        }

        let genres: Vec<u32> = sequence
            .positions()
            .iter()
            .map(|&p| self.catalog.genre_code(p))
            .collect();
        let score = score_genres(&genres, &self.config);

        self.cache.insert(key, score);
        score
    }

    /// Scores a population, preserving its order.
    pub fn evaluate_all(&self, population: &[Sequence], parallel: bool) -> Vec<FitnessScore> {
        if parallel {
            population.par_iter().map(|s| self.evaluate(s)).collect()
        } else {
            population.iter().map(|s| self.evaluate(s)).collect()
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
