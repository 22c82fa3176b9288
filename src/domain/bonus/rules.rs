//! Bonus tier rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BonusAudience, ValidationError};
use crate::domain::review::MAX_ITEM_SCORE;

/// A closed score interval `[min_score, max_score]`.
pub trait ScoreBand {
    fn min_score(&self) -> f64;
    fn max_score(&self) -> f64;

    /// Checks the rule's payout values.
    fn validate_values(&self) -> Result<(), ValidationError>;

    fn contains(&self, score: f64) -> bool {
        self.min_score() <= score && score <= self.max_score()
    }
}

/// Maps a competency average to a percentage of the KPI bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBonusRule {
    pub min_score: f64,
    pub max_score: f64,
    pub bonus_percentage: f64,
}

impl PerformanceBonusRule {
    pub fn new(min_score: f64, max_score: f64, bonus_percentage: f64) -> Self {
        Self {
            min_score,
            max_score,
            bonus_percentage,
        }
    }
}

impl ScoreBand for PerformanceBonusRule {
    fn min_score(&self) -> f64 {
        self.min_score
    }

    fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Bounds must lie on the 0-10 competency scale.
    fn validate_values(&self) -> Result<(), ValidationError> {
        let max = MAX_ITEM_SCORE as f64;
        for (field, value) in [("min_score", self.min_score), ("max_score", self.max_score)] {
            if !(0.0..=max).contains(&value) {
                return Err(ValidationError::out_of_range(field, 0.0, max, value));
            }
        }
        non_negative("bonus_percentage", self.bonus_percentage)
    }
}

/// Maps a KPI score to a monetary bonus, per audience.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiBonusRule {
    pub min_score: f64,
    pub max_score: f64,
    pub bonus_value_leader: f64,
    pub bonus_value_led: f64,
}

impl KpiBonusRule {
    pub fn new(min_score: f64, max_score: f64, leader: f64, led: f64) -> Self {
        Self {
            min_score,
            max_score,
            bonus_value_leader: leader,
            bonus_value_led: led,
        }
    }

    pub fn value_for(&self, audience: BonusAudience) -> f64 {
        match audience {
            BonusAudience::Leader => self.bonus_value_leader,
            BonusAudience::Led => self.bonus_value_led,
        }
    }
}

impl ScoreBand for KpiBonusRule {
    fn min_score(&self) -> f64 {
        self.min_score
    }

    fn max_score(&self) -> f64 {
        self.max_score
    }

    fn validate_values(&self) -> Result<(), ValidationError> {
        non_negative("bonus_value_leader", self.bonus_value_leader)?;
        non_negative("bonus_value_led", self.bonus_value_led)
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_closed_on_both_ends() {
        let rule = PerformanceBonusRule::new(4.0, 6.99, 50.0);
        assert!(rule.contains(4.0));
        assert!(rule.contains(6.99));
        assert!(!rule.contains(3.999));
        assert!(!rule.contains(7.0));
        assert!(!rule.contains(f64::NAN));
    }

    #[test]
    fn kpi_rule_selects_column_by_audience() {
        let rule = KpiBonusRule::new(5.0, 7.99, 250.0, 150.0);
        assert_eq!(rule.value_for(BonusAudience::Leader), 250.0);
        assert_eq!(rule.value_for(BonusAudience::Led), 150.0);
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(PerformanceBonusRule::new(0.0, 1.0, -5.0).validate_values().is_err());
        assert!(KpiBonusRule::new(0.0, 1.0, 10.0, -1.0).validate_values().is_err());
        assert!(KpiBonusRule::new(0.0, 1.0, 10.0, 0.0).validate_values().is_ok());
    }

    #[test]
    fn performance_bands_stay_on_the_competency_scale() {
        assert!(PerformanceBonusRule::new(0.0, 10.0, 100.0).validate_values().is_ok());
        assert!(PerformanceBonusRule::new(-1.0, 3.99, 0.0).validate_values().is_err());
        assert!(PerformanceBonusRule::new(7.0, 10.5, 100.0).validate_values().is_err());
        assert!(KpiBonusRule::new(-20.0, 40.0, 10.0, 5.0).validate_values().is_ok());
    }
}
