use crate::config::EvalConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Breakdown of a sequence's genre-diversity score. Lower `total` is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessScore {
    /// Adjacent pairs sharing a genre.
    pub penalty: usize,
    /// Pairs sharing a genre within the `close_range` window.
    pub close_penalty: usize,
    /// Sum of pairwise position distances between same-genre items.
    pub distance: u64,
    pub max_distance: u64,
    pub distance_term: u64,
    /// Distinct ordered adjacent genre pairs. Reported only; not part of `total`.
    pub transitions: usize,
    pub total: f64,
}

impl FitnessScore {
    /// Score of a sequence with nothing to optimize (length 0 or 1).
    pub fn zero() -> Self {
        Self {
            penalty: 0,
            close_penalty: 0,
            distance: 0,
            max_distance: 0,
            distance_term: 0,
            transitions: 0,
            total: 0.0,
        }
    }

    /// Total order used wherever a better individual is chosen.
    ///
    /// `Less` means `self` is preferable: lower total, then fewer adjacent
    /// repeats, then fewer near repeats, then larger spread.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.total
            .total_cmp(&other.total)
            .then(self.penalty.cmp(&other.penalty))
            .then(self.close_penalty.cmp(&other.close_penalty))
            .then(other.distance.cmp(&self.distance))
    }

    pub fn is_better(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }
}

/// Scores a sequence of genre labels.
pub fn score_genres<G: Eq + Hash>(genres: &[G], config: &EvalConfig) -> FitnessScore {
    let n = genres.len();
    if n <= 1 {
        return FitnessScore::zero();
    }

    let penalty = genres.windows(2).filter(|w| w[0] == w[1]).count();

    let mut close_penalty = 0;
    for i in 0..n {
        let window_end = i.saturating_add(config.close_range).min(n).max(i + 1);
        close_penalty += genres[i + 1..window_end]
            .iter()
            .filter(|g| **g == genres[i])
            .count();
    }

    let transitions = genres
        .windows(2)
        .map(|w| (&w[0], &w[1]))
        .collect::<HashSet<_>>()
        .len();

    let mut positions: HashMap<&G, Vec<usize>> = HashMap::new();
    for (idx, genre) in genres.iter().enumerate() {
        positions.entry(genre).or_default().push(idx);
    }
    let distance: u64 = positions.values().map(|pos| pairwise_distance_sum(pos)).sum();

    let max_distance = (n * (n - 1) / 2) as u64;
    let distance_term = max_distance.saturating_sub(distance);

    let total = penalty as f64 * config.penalty_weight
        + close_penalty as f64 * config.close_weight
        + distance_term as f64 * config.distance_weight;

    FitnessScore {
        penalty,
        close_penalty,
        distance,
        max_distance,
        distance_term,
        transitions,
        total,
    }
}

/// Sum of `|p_j - p_i|` over all pairs of an ascending position list.
///
/// The k-th smallest position is added `k` times and subtracted `m - 1 - k` times.
fn pairwise_distance_sum(sorted_positions: &[usize]) -> u64 {
    let m = sorted_positions.len() as i64;
    let sum: i64 = sorted_positions
        .iter()
        .enumerate()
        .map(|(k, &pos)| pos as i64 * (2 * k as i64 - (m - 1)))
        .sum();
    sum as u64
}
