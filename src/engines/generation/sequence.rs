//! Permutation representation of a candidate ordering.
//!
//! A [`Sequence`] stores catalog positions rather than items, so operators
//! shuffle plain indices and the catalog stays the single owner of item data.

use crate::catalog::{Catalog, Item, ItemId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One candidate ordering of the catalog.
///
/// Every sequence produced by the operators contains each position in
/// `0..catalog.len()` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(Vec<usize>);

impl Sequence {
    /// Catalog order.
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let mut positions: Vec<usize> = (0..len).collect();
        positions.shuffle(rng);
        Self(positions)
    }

    pub fn from_positions(positions: Vec<usize>) -> Self {
        Self(positions)
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn into_positions(self) -> Vec<usize> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self, catalog: &Catalog) -> Vec<ItemId> {
        self.0.iter().map(|&p| catalog.item(p).id).collect()
    }

    pub fn items<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Item> {
        self.0.iter().map(|&p| catalog.item(p)).collect()
    }

    pub fn genre_labels(&self, catalog: &Catalog) -> Vec<String> {
        self.0
            .iter()
            .map(|&p| catalog.item(p).genre.clone())
            .collect()
    }

    /// True when every position in `0..len` occurs exactly once.
    pub fn is_permutation_of(&self, len: usize) -> bool {
        if self.0.len() != len {
            return false;
        }
        let mut seen = vec![false; len];
        for &p in &self.0 {
            if p >= len || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }
}
