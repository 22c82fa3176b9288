//! Review lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a performance review is in its approval flow.
///
/// ```text
/// Pending ──submit──▶ AwaitingApproval ──approve / KPI──▶ Completed
///                       ▲         │
///              resubmit │         │ request adjustment
///                       │         ▼
///                   AdjustmentRequested
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    AwaitingApproval,
    AdjustmentRequested,
    Completed,
}

impl ReviewStatus {
    /// Returns true if the manager may still (re)submit scores.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, ReviewStatus::Pending | ReviewStatus::AdjustmentRequested)
    }

    /// Portuguese label shown in the product.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pendente",
            ReviewStatus::AwaitingApproval => "Em Aprovação",
            ReviewStatus::AdjustmentRequested => "Ajuste Solicitado",
            ReviewStatus::Completed => "Concluída",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::AwaitingApproval => "awaiting_approval",
            ReviewStatus::AdjustmentRequested => "adjustment_requested",
            ReviewStatus::Completed => "completed",
        }
    }

    /// Parses the snake_case storage name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReviewStatus::Pending),
            "awaiting_approval" => Some(ReviewStatus::AwaitingApproval),
            "adjustment_requested" => Some(ReviewStatus::AdjustmentRequested),
            "completed" => Some(ReviewStatus::Completed),
            _ => None,
        }
    }
}

impl StateMachine for ReviewStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, target),
            (Pending, AwaitingApproval)
                | (AdjustmentRequested, AwaitingApproval)
                | (AwaitingApproval, AdjustmentRequested)
                | (AwaitingApproval, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReviewStatus::*;
        match self {
            Pending => vec![AwaitingApproval],
            AwaitingApproval => vec![AdjustmentRequested, Completed],
            AdjustmentRequested => vec![AwaitingApproval],
            Completed => vec![],
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
