//! Department KPI model and the score aggregator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DepartmentId, KpiModelId, Timestamp, ValidationError};

use super::KpiIndicator;

/// Measured results keyed by indicator position in the model.
pub type KpiResults = BTreeMap<usize, f64>;

/// Sums the contribution of every indicator against `results`.
///
/// Missing positions contribute zero. The total is not clamped and may be
/// negative when detractors are missed.
pub fn kpi_score(indicators: &[KpiIndicator], results: &KpiResults) -> f64 {
    indicators
        .iter()
        .enumerate()
        .map(|(index, indicator)| indicator.contribution(results.get(&index).copied()))
        .sum()
}

/// Ordered indicator list for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiModel {
    id: KpiModelId,
    department_id: DepartmentId,
    indicators: Vec<KpiIndicator>,
    updated_at: Timestamp,
}

impl KpiModel {
    /// Creates a model; at least one indicator is required.
    pub fn new(
        department_id: DepartmentId,
        indicators: Vec<KpiIndicator>,
    ) -> Result<Self, ValidationError> {
        Self::ensure_indicators(&indicators)?;
        Ok(Self {
            id: KpiModelId::new(),
            department_id,
            indicators,
            updated_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a model from storage without validation.
    pub fn reconstitute(
        id: KpiModelId,
        department_id: DepartmentId,
        indicators: Vec<KpiIndicator>,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            department_id,
            indicators,
            updated_at,
        }
    }

    pub fn id(&self) -> KpiModelId {
        self.id
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn indicators(&self) -> &[KpiIndicator] {
        &self.indicators
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Replaces the indicator list, keeping the model identity.
    pub fn replace_indicators(
        &mut self,
        indicators: Vec<KpiIndicator>,
    ) -> Result<(), ValidationError> {
        Self::ensure_indicators(&indicators)?;
        self.indicators = indicators;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Score of this model for the given results.
    pub fn score(&self, results: &KpiResults) -> f64 {
        kpi_score(&self.indicators, results)
    }

    fn ensure_indicators(indicators: &[KpiIndicator]) -> Result<(), ValidationError> {
        if indicators.is_empty() {
            return Err(ValidationError::empty_field("indicators"));
        }
        Ok(())
    }
}
