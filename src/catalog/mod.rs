//! The fixed set of items being sequenced.
//!
//! A [`Catalog`] is built once before a run and never changes afterwards.
//! Genres are interned to dense codes at construction so that scoring
//! compares integers instead of strings.

mod item;

pub use item::{Item, ItemId};

use crate::error::{QuizseqError, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    genre_codes: Vec<u32>,
    genre_names: Vec<String>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(QuizseqError::Catalog(format!(
                    "Duplicate item id {}",
                    item.id
                )));
            }
        }

        let mut codes_by_name: HashMap<&str, u32> = HashMap::new();
        let mut genre_names = Vec::new();
        let mut genre_codes = Vec::with_capacity(items.len());
        for item in &items {
            let code = *codes_by_name.entry(item.genre.as_str()).or_insert_with(|| {
                genre_names.push(item.genre.clone());
                (genre_names.len() - 1) as u32
            });
            genre_codes.push(code);
        }

        Ok(Self {
            items,
            genre_codes,
            genre_names,
        })
    }

    /// Materializes items from JSON objects whose genre column has already been chosen.
    ///
    /// Ids come from `id_field` when given; otherwise they are numbered `1..=n`
    /// in record order. Every field of the record is kept as the item payload.
    pub fn from_json_records(
        records: Vec<Map<String, Value>>,
        genre_field: &str,
        id_field: Option<&str>,
    ) -> Result<Self> {
        if id_field.is_none() {
            log::warn!("No id field configured, synthesizing sequential ids");
        }

        let items = records
            .into_iter()
            .enumerate()
            .map(|(row, record)| -> Result<Item> {
                let genre = genre_label(record.get(genre_field)).ok_or_else(|| {
                    QuizseqError::Catalog(format!(
                        "Record {} has no usable '{}' value",
                        row + 1,
                        genre_field
                    ))
                })?;

                let id = match id_field {
                    Some(field) => record.get(field).and_then(Value::as_u64).ok_or_else(|| {
                        QuizseqError::Catalog(format!(
                            "Record {} has no non-negative integer '{}' value",
                            row + 1,
                            field
                        ))
                    })?,
                    None => row as ItemId + 1,
                };

                Ok(Item::new(id, genre).with_payload(record))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, position: usize) -> &Item {
        &self.items[position]
    }

    /// Interned genre of the item at `position`.
    pub fn genre_code(&self, position: usize) -> u32 {
        self.genre_codes[position]
    }

    pub fn genre_name(&self, code: u32) -> &str {
        &self.genre_names[code as usize]
    }

    /// Distinct genres in first-seen order.
    pub fn genres(&self) -> &[String] {
        &self.genre_names
    }
}

fn genre_label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
