use super::traits::{section_error, ConfigSection};
use crate::error::QuizseqError;
use serde::{Deserialize, Serialize};

/// Parameters of the generational loop. Fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub elite_ratio: f64,
    pub tournament_size: usize,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Score individuals on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            population_size: 40,
            mutation_rate: 0.1,
            elite_ratio: 0.1,
            tournament_size: 3,
            seed: None,
            parallel: true,
        }
    }
}

impl EvolutionConfig {
    /// Number of top individuals carried unchanged into the next generation.
    pub fn elite_count(&self) -> usize {
        let count = (self.population_size as f64 * self.elite_ratio).floor() as usize;
        count.max(1).min(self.population_size)
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), QuizseqError> {
        if self.generations == 0 {
            return Err(section_error::<Self>("Generation count must be positive"));
        }
        if self.population_size == 0 {
            return Err(section_error::<Self>("Population size must be positive"));
        }
        if self.tournament_size == 0 {
            return Err(section_error::<Self>("Tournament size must be positive"));
        }
        if self.tournament_size > self.population_size {
            return Err(section_error::<Self>(&format!(
                "Tournament size {} exceeds population size {}",
                self.tournament_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(section_error::<Self>("Mutation rate must be between 0 and 1"));
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(section_error::<Self>("Elite ratio must be between 0 and 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.elite_count(), 4);
    }

    #[test]
    fn test_elite_count_is_at_least_one() {
        let config = EvolutionConfig {
            population_size: 5,
            elite_ratio: 0.0,
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 1);
    }

    #[test]
    fn test_rejects_tournament_larger_than_population() {
        let config = EvolutionConfig {
            population_size: 2,
            tournament_size: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(QuizseqError::Configuration(_))));
    }

    #[test]
    fn test_rejects_zero_counts() {
        for config in [
            EvolutionConfig { generations: 0, ..Default::default() },
            EvolutionConfig { population_size: 0, ..Default::default() },
            EvolutionConfig { tournament_size: 0, ..Default::default() },
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let bad_mutation = EvolutionConfig { mutation_rate: 1.5, ..Default::default() };
        let bad_elite = EvolutionConfig { elite_ratio: -0.1, ..Default::default() };
        assert!(bad_mutation.validate().is_err());
        assert!(bad_elite.validate().is_err());
    }
}
