//! Manager-entered item scores and the competency average.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

/// Highest score an item can receive.
pub const MAX_ITEM_SCORE: u8 = 10;

/// A whole-number score from 0 to 10 for one template item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct ItemScore(u8);

impl ItemScore {
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > MAX_ITEM_SCORE {
            return Err(ValidationError::out_of_range(
                "score",
                0.0,
                MAX_ITEM_SCORE as f64,
                value as f64,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for ItemScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=MAX_ITEM_SCORE as f64).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score",
                0.0,
                MAX_ITEM_SCORE as f64,
                value,
            ));
        }
        if value.fract() != 0.0 {
            return Err(ValidationError::invalid_format("score", "must be a whole number"));
        }
        Ok(Self(value as u8))
    }
}

impl From<ItemScore> for u8 {
    fn from(score: ItemScore) -> Self {
        score.0
    }
}

/// Scores keyed by template item position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemScores(BTreeMap<usize, ItemScore>);

impl ItemScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, score: ItemScore) {
        self.0.insert(index, score);
    }

    pub fn get(&self, index: usize) -> Option<ItemScore> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ItemScore)> + '_ {
        self.0.iter().map(|(i, s)| (*i, *s))
    }

    /// Requires exactly one score per item of a template with `item_count` items.
    pub fn ensure_complete(&self, item_count: usize) -> Result<(), ValidationError> {
        if let Some(missing) = (0..item_count).find(|i| !self.0.contains_key(i)) {
            return Err(ValidationError::invalid_format(
                "scores",
                format!("item {} has no score", missing + 1),
            ));
        }
        if let Some(extra) = self.0.keys().find(|i| **i >= item_count) {
            return Err(ValidationError::invalid_format(
                "scores",
                format!("item {} does not exist in the template", extra + 1),
            ));
        }
        Ok(())
    }

    /// Arithmetic mean of all present scores; 0 for an empty map.
    pub fn average(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let total: u32 = self.0.values().map(|s| s.0 as u32).sum();
        total as f64 / self.0.len() as f64
    }
}

impl FromIterator<(usize, ItemScore)> for ItemScores {
    fn from_iter<T: IntoIterator<Item = (usize, ItemScore)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
