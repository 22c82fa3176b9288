//! User roles and the capabilities they grant.
//!
//! Role checks are never re-derived at call sites: handlers and aggregators
//! receive an [`Actor`] and ask its [`Capabilities`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Organisational role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Manager,
    #[default]
    Collaborator,
}

impl Role {
    /// Portuguese label shown in the product.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Manager => "Gerente",
            Role::Collaborator => "Colaborador",
        }
    }

    /// Parses either the snake_case wire name or the product label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "administrator" | "Administrador" => Some(Role::Administrator),
            "manager" | "Gerente" => Some(Role::Manager),
            "collaborator" | "Colaborador" => Some(Role::Collaborator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Manager => "manager",
            Role::Collaborator => "collaborator",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(*self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which column of the KPI bonus table applies to a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusAudience {
    Leader,
    Led,
}

/// What an actor may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Edit bonus tables, KPI models, templates and departments.
    pub manage_configuration: bool,
    /// Process and delete KPI assessments.
    pub process_kpi: bool,
    /// Approve reviews or send them back for adjustment.
    pub approve_reviews: bool,
    /// Create, submit and annotate reviews for one's own team.
    pub manage_team_reviews: bool,
    /// See every review regardless of manager.
    pub view_all_reviews: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Administrator => Self {
                manage_configuration: true,
                process_kpi: true,
                approve_reviews: true,
                manage_team_reviews: true,
                view_all_reviews: true,
            },
            Role::Manager => Self {
                manage_configuration: false,
                process_kpi: false,
                approve_reviews: false,
                manage_team_reviews: true,
                view_all_reviews: false,
            },
            Role::Collaborator => Self {
                manage_configuration: false,
                process_kpi: false,
                approve_reviews: false,
                manage_team_reviews: false,
                view_all_reviews: false,
            },
        }
    }
}

impl BonusAudience {
    /// Managers are paid from the leader column, everyone else from the led column.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Manager => BonusAudience::Leader,
            Role::Administrator | Role::Collaborator => BonusAudience::Led,
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    /// True when the actor is `user_id` or can act on everyone's reviews.
    pub fn is_self_or_admin(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id || self.capabilities().view_all_reviews
    }
}
