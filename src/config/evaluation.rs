use super::traits::{section_error, ConfigSection};
use crate::error::QuizseqError;
use serde::{Deserialize, Serialize};

/// Weighting and window parameters governing fitness for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Width of the sliding window used for the proximity penalty.
    pub close_range: usize,
    pub penalty_weight: f64,
    pub close_weight: f64,
    pub distance_weight: f64,
}

/// Hashable identity of an [`EvalConfig`]; weights are keyed by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvalConfigKey {
    close_range: usize,
    penalty_weight: u64,
    close_weight: u64,
    distance_weight: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            close_range: 5,
            penalty_weight: 1000.0,
            close_weight: 500.0,
            distance_weight: 0.1,
        }
    }
}

impl EvalConfig {
    pub fn cache_key(&self) -> EvalConfigKey {
        EvalConfigKey {
            close_range: self.close_range,
            penalty_weight: self.penalty_weight.to_bits(),
            close_weight: self.close_weight.to_bits(),
            distance_weight: self.distance_weight.to_bits(),
        }
    }
}

impl ConfigSection for EvalConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<(), QuizseqError> {
        if self.close_range == 0 {
            return Err(section_error::<Self>("Close range must be positive"));
        }
        let weights = [
            ("penalty_weight", self.penalty_weight),
            ("close_weight", self.close_weight),
            ("distance_weight", self.distance_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(section_error::<Self>(&format!(
                    "{} must be a finite non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}
