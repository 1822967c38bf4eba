use super::{
    catalog::CatalogConfig,
    evaluation::EvalConfig,
    evolution::EvolutionConfig,
    traits::ConfigSection,
};
use crate::error::QuizseqError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `QUIZSEQ__EVOLUTION__GENERATIONS=200`.
pub const ENV_PREFIX: &str = "QUIZSEQ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub evaluation: EvalConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), QuizseqError> {
        self.evolution.validate()?;
        self.evaluation.validate()?;
        self.catalog.validate()?;
        Ok(())
    }

    /// Layers a TOML or JSON file (format from extension) under environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuizseqError> {
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), QuizseqError> {
        let config = AppConfig::from_file(&path)?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), QuizseqError> {
        let toml_str = {
            let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
            toml::to_string_pretty(&*config)?
        };

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), QuizseqError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
