use crate::catalog::{Catalog, ItemId};
use crate::config::{ConfigSection, EvalConfig, EvolutionConfig};
use crate::engines::fitness::{CacheStats, FitnessEvaluator, FitnessScore};
use crate::engines::generation::population::PopulationManager;
use crate::engines::generation::sequence::Sequence;
use crate::error::QuizseqError;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the generational loop stands. Generation indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Initializing,
    Evolving(usize),
    Done,
}

/// Best individual of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best: Sequence,
    pub best_ids: Vec<ItemId>,
    pub score: FitnessScore,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    pub best: Sequence,
    pub best_ids: Vec<ItemId>,
    pub best_score: FitnessScore,
    /// Generation in which `best` was first found; 0 when no generation ran.
    pub best_generation: usize,
    /// Best `total` of every generation, in order.
    pub trace: Vec<f64>,
    pub history: Vec<GenerationRecord>,
    /// Genres of `best` in sequence order.
    pub genre_labels: Vec<String>,
    pub cache: CacheStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, record: &GenerationRecord);
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        (**self).on_generation_complete(record);
    }
}

pub struct EvolutionEngine {
    catalog: Arc<Catalog>,
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    population_manager: PopulationManager,
    rng: StdRng,
    phase: EnginePhase,
    population: Vec<Sequence>,
    global_best: Option<(Sequence, FitnessScore, usize)>,
    history: Vec<GenerationRecord>,
    started_at: DateTime<Utc>,
}

impl EvolutionEngine {
    /// Validates both configs before anything runs.
    pub fn new(
        catalog: Arc<Catalog>,
        config: EvolutionConfig,
        eval_config: EvalConfig,
    ) -> Result<Self, QuizseqError> {
        config.validate()?;
        eval_config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let evaluator = FitnessEvaluator::new(Arc::clone(&catalog), eval_config);
        let population_manager = PopulationManager::new(&config, catalog.len());

        Ok(Self {
            catalog,
            config,
            evaluator,
            population_manager,
            rng,
            phase: EnginePhase::Initializing,
            population: Vec::new(),
            global_best: None,
            history: Vec::new(),
            started_at: Utc::now(),
        })
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn population(&self) -> &[Sequence] {
        &self.population
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Index of the generation the next [`step`](Self::step) will run.
    pub fn upcoming_generation(&self) -> Option<usize> {
        match self.phase {
            EnginePhase::Initializing if self.catalog.len() <= 1 => None,
            EnginePhase::Initializing => Some(1),
            EnginePhase::Evolving(generation) => Some(generation),
            EnginePhase::Done => None,
        }
    }

    fn initialize(&mut self) {
        self.started_at = Utc::now();
        if self.catalog.len() <= 1 {
            // Nothing to reorder: the catalog order is the only sequence.
            let only = Sequence::identity(self.catalog.len());
            self.global_best = Some((only, FitnessScore::zero(), 0));
            self.phase = EnginePhase::Done;
            log::debug!("Catalog has {} item(s), skipping evolution", self.catalog.len());
            return;
        }

        self.population = self.population_manager.initial_population(&mut self.rng);
        self.phase = EnginePhase::Evolving(1);
    }

    /// Runs one generation and returns its best individual.
    ///
    /// Returns `None` once the configured generation count has been reached,
    /// or immediately for catalogs of fewer than two items.
    pub fn step(&mut self) -> Option<GenerationRecord> {
        if self.phase == EnginePhase::Initializing {
            self.initialize();
        }
        let generation = match self.phase {
            EnginePhase::Evolving(generation) => generation,
            EnginePhase::Initializing | EnginePhase::Done => return None,
        };

        let population = std::mem::take(&mut self.population);
        let scores = self.evaluator.evaluate_all(&population, self.config.parallel);
        let ranked = PopulationManager::rank(population, scores);

        let (best, best_score) = &ranked[0];
        let improved = match &self.global_best {
            Some((_, global_score, _)) => best_score.is_better(global_score),
            None => true,
        };
        if improved {
            self.global_best = Some((best.clone(), *best_score, generation));
        }

        let record = GenerationRecord {
            generation,
            best: best.clone(),
            best_ids: best.ids(&self.catalog),
            score: *best_score,
        };
        self.history.push(record.clone());

        if generation >= self.config.generations {
            self.population = ranked.into_iter().map(|(sequence, _)| sequence).collect();
            self.phase = EnginePhase::Done;
        } else {
            let (next, stats) = self.population_manager.next_generation(&ranked, &mut self.rng);
            log::debug!(
                "Generation {}: best total {:.3}, {} elites, {} duplicates removed, {} replenished",
                generation,
                best_score.total,
                stats.elites,
                stats.duplicates_removed,
                stats.replenished
            );
            self.population = next;
            self.phase = EnginePhase::Evolving(generation + 1);
        }

        Some(record)
    }

    /// Runs every remaining generation and returns the best sequence ever seen.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> EvolutionResult {
        if self.phase == EnginePhase::Initializing && self.catalog.len() <= 1 {
            self.initialize();
        }

        while let Some(generation) = self.upcoming_generation() {
            callback.on_generation_start(generation);
            if let Some(record) = self.step() {
                callback.on_generation_complete(&record);
            }
        }

        self.result()
    }

    /// Snapshot of the run so far.
    pub fn result(&self) -> EvolutionResult {
        let (best, best_score, best_generation) = match &self.global_best {
            Some((sequence, score, generation)) => (sequence.clone(), *score, *generation),
            None => (Sequence::identity(self.catalog.len()), FitnessScore::zero(), 0),
        };

        EvolutionResult {
            best_ids: best.ids(&self.catalog),
            genre_labels: best.genre_labels(&self.catalog),
            best,
            best_score,
            best_generation,
            trace: self.history.iter().map(|r| r.score.total).collect(),
            history: self.history.clone(),
            cache: self.evaluator.cache_stats(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
