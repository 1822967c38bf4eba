use super::traits::{section_error, ConfigSection};
use crate::error::QuizseqError;
use serde::{Deserialize, Serialize};

/// Which record fields the ingestion layer resolves into ids and genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub genre_field: String,
    /// When absent, sequential ids are synthesized.
    pub id_field: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            genre_field: "genre".to_string(),
            id_field: None,
        }
    }
}

impl ConfigSection for CatalogConfig {
    fn section_name() -> &'static str {
        "catalog"
    }

    fn validate(&self) -> Result<(), QuizseqError> {
        if self.genre_field.trim().is_empty() {
            return Err(section_error::<Self>("Genre field must not be empty"));
        }
        if matches!(&self.id_field, Some(field) if field.trim().is_empty()) {
            return Err(section_error::<Self>("Id field must not be empty when set"));
        }
        Ok(())
    }
}
