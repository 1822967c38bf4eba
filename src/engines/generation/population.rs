use crate::config::EvolutionConfig;
use crate::engines::fitness::FitnessScore;
use crate::engines::generation::operators::{mutate, pmx_crossover, tournament_selection};
use crate::engines::generation::sequence::Sequence;
use rand::Rng;
use std::collections::HashSet;

/// Bookkeeping from assembling one population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreedStats {
    pub elites: usize,
    pub offspring: usize,
    pub duplicates_removed: usize,
    pub replenished: usize,
}

/// Elitism, offspring generation, duplicate elimination and replenishment.
pub struct PopulationManager {
    population_size: usize,
    elite_count: usize,
    tournament_size: usize,
    mutation_rate: f64,
    sequence_len: usize,
}

impl PopulationManager {
    pub fn new(config: &EvolutionConfig, sequence_len: usize) -> Self {
        Self {
            population_size: config.population_size,
            elite_count: config.elite_count(),
            tournament_size: config.tournament_size,
            mutation_rate: config.mutation_rate,
            sequence_len,
        }
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// `population_size` independent random permutations.
    pub fn initial_population<R: Rng>(&self, rng: &mut R) -> Vec<Sequence> {
        (0..self.population_size)
            .map(|_| Sequence::random(self.sequence_len, rng))
            .collect()
    }

    /// Pairs each individual with its score, best first.
    ///
    /// The sort is stable, so equally scored individuals keep population order
    /// no matter in which order their scores were computed.
    pub fn rank(
        population: Vec<Sequence>,
        scores: Vec<FitnessScore>,
    ) -> Vec<(Sequence, FitnessScore)> {
        debug_assert_eq!(population.len(), scores.len());
        let mut ranked: Vec<(Sequence, FitnessScore)> = population.into_iter().zip(scores).collect();
        ranked.sort_by(|a, b| a.1.compare(&b.1));
        ranked
    }

    /// Builds the next population from a ranked one.
    pub fn next_generation<R: Rng>(
        &self,
        ranked: &[(Sequence, FitnessScore)],
        rng: &mut R,
    ) -> (Vec<Sequence>, BreedStats) {
        let mut stats = BreedStats::default();
        let mut candidates: Vec<Sequence> = Vec::with_capacity(self.population_size);

        for (sequence, _) in ranked.iter().take(self.elite_count) {
            candidates.push(sequence.clone());
        }
        stats.elites = candidates.len();

        while candidates.len() < self.population_size {
            let parent1 = tournament_selection(ranked, self.tournament_size, rng);
            let parent2 = tournament_selection(ranked, self.tournament_size, rng);
            let child = mutate(pmx_crossover(parent1, parent2, rng), self.mutation_rate, rng);
            debug_assert!(child.is_permutation_of(self.sequence_len));
            candidates.push(child);
            stats.offspring += 1;
        }

        let before = candidates.len();
        let mut next = Self::deduplicate(candidates);
        stats.duplicates_removed = before - next.len();
        stats.replenished = self.replenish(&mut next, rng);

        (next, stats)
    }

    /// Keeps the first occurrence of every distinct ordering.
    pub fn deduplicate(population: Vec<Sequence>) -> Vec<Sequence> {
        let mut seen: HashSet<Sequence> = HashSet::with_capacity(population.len());
        population
            .into_iter()
            .filter(|sequence| seen.insert(sequence.clone()))
            .collect()
    }

    /// Appends fresh random permutations up to `population_size`; returns how many.
    pub fn replenish<R: Rng>(&self, population: &mut Vec<Sequence>, rng: &mut R) -> usize {
        let missing = self.population_size.saturating_sub(population.len());
        population.extend((0..missing).map(|_| Sequence::random(self.sequence_len, rng)));
        missing
    }
}
