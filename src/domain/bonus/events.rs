//! Bonus parameter events.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

/// Which of the two tier tables changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTableKind {
    Performance,
    Kpi,
}

impl fmt::Display for BonusTableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusTableKind::Performance => write!(f, "performance"),
            BonusTableKind::Kpi => write!(f, "kpi"),
        }
    }
}

/// Published when an administrator replaces a tier table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusParametersUpdated {
    pub event_id: EventId,
    pub table: BonusTableKind,
    pub rule_count: usize,
    pub updated_by: UserId,
    pub updated_at: Timestamp,
}

domain_event!(
    BonusParametersUpdated,
    event_type = "bonus.parameters_updated.v1",
    aggregate_id = table,
    aggregate_type = "BonusParameters",
    occurred_at = updated_at,
    event_id = event_id
);
