pub mod score;
pub mod cache;
pub mod evaluator;

pub use score::{score_genres, FitnessScore};
pub use cache::{CacheStats, EvaluationCache};
pub use evaluator::FitnessEvaluator;
