//! Bonus tier resolution.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::BonusAudience;

use super::{BonusTable, KpiBonusRule, PerformanceBonusRule};

/// Performance tiers used until an administrator saves their own.
pub static DEFAULT_PERFORMANCE_RULES: Lazy<BonusTable<PerformanceBonusRule>> = Lazy::new(|| {
    BonusTable::from_stored(vec![
        PerformanceBonusRule::new(0.0, 3.99, 0.0),
        PerformanceBonusRule::new(4.0, 6.99, 50.0),
        PerformanceBonusRule::new(7.0, 10.0, 100.0),
    ])
});

/// KPI tiers used until an administrator saves their own.
pub static DEFAULT_KPI_RULES: Lazy<BonusTable<KpiBonusRule>> = Lazy::new(|| {
    BonusTable::from_stored(vec![
        KpiBonusRule::new(0.0, 4.99, 0.0, 0.0),
        KpiBonusRule::new(5.0, 7.99, 250.0, 150.0),
        KpiBonusRule::new(8.0, 10.0, 500.0, 300.0),
    ])
});

/// Outcome of resolving both bonus tables for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusResolution {
    pub performance_bonus_percentage: f64,
    pub base_kpi_bonus: f64,
    pub final_kpi_bonus: f64,
}

/// The two tier tables together.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusParameters {
    pub performance: BonusTable<PerformanceBonusRule>,
    pub kpi: BonusTable<KpiBonusRule>,
}

impl BonusParameters {
    pub fn new(
        performance: BonusTable<PerformanceBonusRule>,
        kpi: BonusTable<KpiBonusRule>,
    ) -> Self {
        Self { performance, kpi }
    }

    /// Percentage of the first performance tier containing `average_score`, else 0.
    pub fn performance_percentage(&self, average_score: f64) -> f64 {
        self.performance
            .resolve(average_score)
            .map(|rule| rule.bonus_percentage)
            .unwrap_or(0.0)
    }

    /// Unscaled KPI bonus of the first tier containing `kpi_score`, else 0.
    pub fn kpi_bonus_value(&self, kpi_score: f64, audience: BonusAudience) -> f64 {
        self.kpi
            .resolve(kpi_score)
            .map(|rule| rule.value_for(audience))
            .unwrap_or(0.0)
    }

    /// Resolves both tiers and scales the KPI bonus by the performance percentage.
    pub fn resolve(
        &self,
        average_score: f64,
        kpi_score: f64,
        audience: BonusAudience,
    ) -> BonusResolution {
        let performance_bonus_percentage = self.performance_percentage(average_score);
        let base_kpi_bonus = self.kpi_bonus_value(kpi_score, audience);
        BonusResolution {
            performance_bonus_percentage,
            base_kpi_bonus,
            final_kpi_bonus: base_kpi_bonus * (performance_bonus_percentage / 100.0),
        }
    }
}

impl Default for BonusParameters {
    fn default() -> Self {
        Self::new(DEFAULT_PERFORMANCE_RULES.clone(), DEFAULT_KPI_RULES.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collaborator_with_full_performance_gets_full_led_bonus() {
        let params = BonusParameters::default();
        let r = params.resolve(7.5, 6.0, BonusAudience::Led);
        assert_eq!(r.performance_bonus_percentage, 100.0);
        assert_eq!(r.base_kpi_bonus, 150.0);
        assert_eq!(r.final_kpi_bonus, 150.0);
    }

    #[test]
    fn manager_uses_leader_column_scaled_by_performance() {
        let params = BonusParameters::default();
        let r = params.resolve(5.0, 9.0, BonusAudience::Leader);
        assert_eq!(r.performance_bonus_percentage, 50.0);
        assert_eq!(r.base_kpi_bonus, 500.0);
        assert_eq!(r.final_kpi_bonus, 250.0);
    }

    #[test]
    fn zero_performance_tier_zeroes_kpi_bonus() {
        let params = BonusParameters::default();
        let r = params.resolve(2.0, 9.5, BonusAudience::Leader);
        assert_eq!(r.base_kpi_bonus, 500.0);
        assert_eq!(r.final_kpi_bonus, 0.0);
    }

    #[test]
    fn unmatched_scores_default_to_zero() {
        let params = BonusParameters::default();
        assert_eq!(params.performance_percentage(3.995), 0.0);
        assert_eq!(params.kpi_bonus_value(-3.0, BonusAudience::Led), 0.0);
        assert_eq!(params.kpi_bonus_value(12.0, BonusAudience::Leader), 0.0);
    }

    #[test]
    fn default_tables_are_valid_under_strict_construction() {
        assert!(BonusTable::new(DEFAULT_PERFORMANCE_RULES.rules().to_vec()).is_ok());
        assert!(BonusTable::new(DEFAULT_KPI_RULES.rules().to_vec()).is_ok());
    }

    proptest! {
        #[test]
        fn final_bonus_never_exceeds_base_with_default_tables(
            avg in 0f64..=10.0,
            kpi in -5f64..15.0,
            leader in any::<bool>(),
        ) {
            let audience = if leader { BonusAudience::Leader } else { BonusAudience::Led };
            let r = BonusParameters::default().resolve(avg, kpi, audience);
            prop_assert!(r.final_kpi_bonus >= 0.0);
            prop_assert!(r.final_kpi_bonus <= r.base_kpi_bonus);
        }
    }
}
