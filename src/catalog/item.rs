use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ItemId = u64;

/// One quiz question. The optimizer reads only `id` and `genre`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub genre: String,
    /// Passthrough fields from the source record.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl Item {
    pub fn new(id: ItemId, genre: impl Into<String>) -> Self {
        Self {
            id,
            genre: genre.into(),
            payload: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }
}
