//! KPI indicator definition and its point contribution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum length of an indicator name.
pub const INDICATOR_NAME_MIN_CHARS: usize = 3;

/// How a met or missed goal affects the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// Earns its weight when the goal is met.
    Accelerator,
    /// Costs its weight when the goal is missed.
    Detractor,
    /// Scored like an accelerator.
    Neutral,
}

impl IndicatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::Accelerator => "accelerator",
            IndicatorType::Detractor => "detractor",
            IndicatorType::Neutral => "neutral",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction in which a result must sit relative to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCondition {
    /// Result must be `>= goal`.
    Above,
    /// Result must be `<= goal`.
    Below,
}

impl GoalCondition {
    pub fn is_met(&self, result: f64, goal: f64) -> bool {
        match self {
            GoalCondition::Above => result >= goal,
            GoalCondition::Below => result <= goal,
        }
    }
}

/// One weighted goal inside a department's KPI model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiIndicator {
    #[serde(rename = "indicator_name")]
    name: String,
    weight: f64,
    goal: f64,
    #[serde(rename = "type")]
    indicator_type: IndicatorType,
    condition: GoalCondition,
}

impl KpiIndicator {
    /// Creates a validated indicator.
    ///
    /// # Errors
    ///
    /// - `TooShort`/`EmptyField` if the name has fewer than 3 characters
    /// - `OutOfRange` if the weight is not a positive finite number
    /// - `InvalidFormat` if the goal is not finite
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        goal: f64,
        indicator_type: IndicatorType,
        condition: GoalCondition,
    ) -> Result<Self, ValidationError> {
        let name =
            ValidationError::require_min_chars("indicator_name", &name.into(), INDICATOR_NAME_MIN_CHARS)?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::out_of_range(
                "weight",
                f64::MIN_POSITIVE,
                f64::MAX,
                weight,
            ));
        }
        if !goal.is_finite() {
            return Err(ValidationError::invalid_format("goal", "must be a finite number"));
        }
        Ok(Self {
            name,
            weight,
            goal,
            indicator_type,
            condition,
        })
    }

    /// Re-runs construction checks on an indicator that arrived deserialized.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Self::new(self.name, self.weight, self.goal, self.indicator_type, self.condition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    pub fn indicator_type(&self) -> IndicatorType {
        self.indicator_type
    }

    pub fn condition(&self) -> GoalCondition {
        self.condition
    }

    /// Signed points this indicator contributes for a measured `result`.
    ///
    /// Absent and NaN results contribute nothing.
    pub fn contribution(&self, result: Option<f64>) -> f64 {
        let Some(result) = result.filter(|r| !r.is_nan()) else {
            return 0.0;
        };
        let met = self.condition.is_met(result, self.goal);
        match (self.indicator_type, met) {
            (IndicatorType::Accelerator | IndicatorType::Neutral, true) => self.weight,
            (IndicatorType::Accelerator | IndicatorType::Neutral, false) => 0.0,
            (IndicatorType::Detractor, true) => 0.0,
            (IndicatorType::Detractor, false) => -self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indicator(weight: f64, goal: f64, t: IndicatorType, c: GoalCondition) -> KpiIndicator {
        KpiIndicator::new("Vendas", weight, goal, t, c).unwrap()
    }

    #[test]
    fn deserialized_indicators_are_checked_again() {
        let raw = serde_json::json!({
            "indicator_name": "NPS",
            "weight": 0.0,
            "goal": 70.0,
            "type": IndicatorType::Accelerator,
            "condition": GoalCondition::Above,
        });
        let ind: KpiIndicator = serde_json::from_value(raw).unwrap();
        assert!(ind.validated().is_err());
        assert!(indicator(1.0, 5.0, IndicatorType::Neutral, GoalCondition::Below)
            .validated()
            .is_ok());
    }

    #[test]
    fn accelerator_above_earns_weight_when_reached() {
        let ind = indicator(2.0, 80.0, IndicatorType::Accelerator, GoalCondition::Above);
        assert_eq!(ind.contribution(Some(85.0)), 2.0);
        assert_eq!(ind.contribution(Some(80.0)), 2.0);
        assert_eq!(ind.contribution(Some(79.9)), 0.0);
    }

    #[test]
    fn detractor_below_penalises_when_missed() {
        let ind = indicator(1.0, 5.0, IndicatorType::Detractor, GoalCondition::Below);
        assert_eq!(ind.contribution(Some(10.0)), -1.0);
        assert_eq!(ind.contribution(Some(5.0)), 0.0);
        assert_eq!(ind.contribution(Some(3.0)), 0.0);
    }

    #[test]
    fn neutral_behaves_like_accelerator() {
        let ind = indicator(3.0, 10.0, IndicatorType::Neutral, GoalCondition::Below);
        assert_eq!(ind.contribution(Some(9.0)), 3.0);
        assert_eq!(ind.contribution(Some(11.0)), 0.0);
    }

    #[test]
    fn absent_or_nan_result_contributes_zero() {
        let ind = indicator(4.0, 1.0, IndicatorType::Detractor, GoalCondition::Above);
        assert_eq!(ind.contribution(None), 0.0);
        assert_eq!(ind.contribution(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn rejects_non_positive_weight() {
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = KpiIndicator::new("Vendas", w, 1.0, IndicatorType::Accelerator, GoalCondition::Above);
            assert!(err.is_err(), "weight {} should be rejected", w);
        }
    }

    #[test]
    fn rejects_short_name_and_infinite_goal() {
        assert!(KpiIndicator::new("Ab", 1.0, 1.0, IndicatorType::Neutral, GoalCondition::Above).is_err());
        assert!(KpiIndicator::new("Abc", 1.0, f64::INFINITY, IndicatorType::Neutral, GoalCondition::Above).is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let ind = indicator(2.0, 80.0, IndicatorType::Accelerator, GoalCondition::Above);
        let json = serde_json::to_value(&ind).unwrap();
        assert_eq!(json["indicator_name"], "Vendas");
        assert_eq!(json["type"], "accelerator");
        assert_eq!(json["condition"], "above");
    }

    fn any_type() -> impl Strategy<Value = IndicatorType> {
        prop_oneof![
            Just(IndicatorType::Accelerator),
            Just(IndicatorType::Detractor),
            Just(IndicatorType::Neutral),
        ]
    }

    fn any_condition() -> impl Strategy<Value = GoalCondition> {
        prop_oneof![Just(GoalCondition::Above), Just(GoalCondition::Below)]
    }

    proptest! {
        #[test]
        fn contribution_is_determined_by_type_and_goal_status(
            weight in 0.01f64..1000.0,
            goal in -1e6f64..1e6,
            result in -1e6f64..1e6,
            t in any_type(),
            c in any_condition(),
        ) {
            let ind = KpiIndicator::new("Meta", weight, goal, t, c).unwrap();
            let met = c.is_met(result, goal);
            let expected = match t {
                IndicatorType::Detractor => if met { 0.0 } else { -weight },
                _ => if met { weight } else { 0.0 },
            };
            prop_assert_eq!(ind.contribution(Some(result)), expected);
        }

        #[test]
        fn contribution_magnitude_never_exceeds_weight(
            weight in 0.01f64..1000.0,
            goal in -1e3f64..1e3,
            result in proptest::option::of(-1e3f64..1e3),
            t in any_type(),
            c in any_condition(),
        ) {
            let ind = KpiIndicator::new("Meta", weight, goal, t, c).unwrap();
            prop_assert!(ind.contribution(result).abs() <= weight);
        }
    }
}
