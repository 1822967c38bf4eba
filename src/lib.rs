//! Genre-diversifying quiz sequencer.
//!
//! Reorders a fixed catalog of quiz questions so that questions of the same
//! genre are neither adjacent nor clustered, using a generational genetic
//! algorithm over permutations (tournament selection, PMX crossover,
//! swap/scramble/inversion mutation, elitism with duplicate elimination).
//!
//! - [`catalog`]: items and the immutable catalog being sequenced
//! - [`config`]: validated configuration sections and file loading
//! - [`engines::fitness`]: scoring, comparator and evaluation cache
//! - [`engines::generation`]: operators, population management and the loop

pub mod catalog;
pub mod config;
pub mod engines;
pub mod error;

pub use catalog::{Catalog, Item, ItemId};
pub use config::{AppConfig, CatalogConfig, ConfigManager, EvalConfig, EvolutionConfig};
pub use engines::fitness::{FitnessEvaluator, FitnessScore};
pub use engines::generation::{EvolutionEngine, EvolutionResult, ProgressCallback, Sequence};
pub use error::{QuizseqError, Result};
