//! Ordered bonus tier tables.
//!
//! Tables built with [`BonusTable::new`] are sorted by `min_score` and have
//! disjoint intervals. Tables read back from storage with
//! [`BonusTable::from_stored`] keep their original order. In both cases
//! lookup returns the first rule, in table order, whose interval contains the
//! score. Scores falling in a gap between tiers match nothing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::foundation::ValidationError;

use super::ScoreBand;

/// An ordered list of score bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusTable<R> {
    rules: Vec<R>,
}

impl<R: ScoreBand + Clone> BonusTable<R> {
    /// Validates and sorts `rules`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` when there are no rules
    /// - `InvalidFormat` for non-finite bounds, `min > max` or overlapping bands
    /// - `OutOfRange` for negative payout values or performance bounds outside 0-10
    pub fn new(mut rules: Vec<R>) -> Result<Self, ValidationError> {
        if rules.is_empty() {
            return Err(ValidationError::empty_field("rules"));
        }
        for rule in &rules {
            if !rule.min_score().is_finite() || !rule.max_score().is_finite() {
                return Err(ValidationError::invalid_format(
                    "rules",
                    "score bounds must be finite numbers",
                ));
            }
            if rule.min_score() > rule.max_score() {
                return Err(ValidationError::invalid_format(
                    "rules",
                    format!(
                        "min_score {} is greater than max_score {}",
                        rule.min_score(),
                        rule.max_score()
                    ),
                ));
            }
            rule.validate_values()?;
        }

        rules.sort_by(|a, b| {
            a.min_score()
                .partial_cmp(&b.min_score())
                .unwrap_or(Ordering::Equal)
        });

        for pair in rules.windows(2) {
            if pair[1].min_score() <= pair[0].max_score() {
                return Err(ValidationError::invalid_format(
                    "rules",
                    format!(
                        "band [{}, {}] overlaps band [{}, {}]",
                        pair[0].min_score(),
                        pair[0].max_score(),
                        pair[1].min_score(),
                        pair[1].max_score()
                    ),
                ));
            }
        }

        Ok(Self { rules })
    }

    /// Wraps a persisted list as-is.
    pub fn from_stored(rules: Vec<R>) -> Self {
        Self { rules }
    }

    /// First rule containing `score`.
    pub fn resolve(&self, score: f64) -> Option<&R> {
        self.rules.iter().find(|rule| rule.contains(score))
    }

    pub fn rules(&self) -> &[R] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<R> {
        self.rules
    }
}
