//! Dashboard summaries for administrators and managers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::foundation::{Actor, Period, ReviewId, Role, UserId, ValidationError};
use crate::domain::org::{Employee, OrgChart};
use crate::domain::review::{PerformanceReview, ReviewStatus};

/// Current-period review status of one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummaryRow {
    pub employee_id: UserId,
    pub employee_name: String,
    pub employee_role: Role,
    pub status: ReviewStatus,
    pub average_score: Option<f64>,
    pub review_id: Option<ReviewId>,
}

/// Best completed review of a manager's team in a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHighlight {
    pub employee_id: UserId,
    pub employee_name: String,
    pub role: Option<Role>,
    pub average_score: f64,
    pub reason: String,
}

/// Dashboard card set by an administrator for everyone outside management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeOfTheMonth {
    pub name: String,
    /// Free-text job title, not a [`Role`].
    pub role: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EmployeeOfTheMonth {
    /// Trims every field; a blank image URL counts as none.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        reason: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let card = Self {
            name: name.into().trim().to_string(),
            role: role.into().trim().to_string(),
            reason: reason.into().trim().to_string(),
            image_url: image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        };
        card.validate()?;
        Ok(card)
    }

    /// Placeholder shown until an administrator picks someone.
    pub fn awaiting_hr() -> Self {
        Self {
            name: "Funcionário do Mês".to_string(),
            role: "Definir no painel".to_string(),
            reason: "Aguardando definição do RH.".to_string(),
            image_url: None,
        }
    }

    /// Card for a manager's dashboard, built from the team's best review.
    pub fn from_highlight(highlight: &TeamHighlight) -> Self {
        Self {
            name: highlight.employee_name.clone(),
            role: highlight
                .role
                .map(|r| r.label().to_string())
                .unwrap_or_else(|| "Não encontrado".to_string()),
            reason: highlight.reason.clone(),
            image_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("name", &self.name), ("role", &self.role), ("reason", &self.reason)] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        if let Some(url) = &self.image_url {
            let rest = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"));
            if rest.map_or(true, |host| host.is_empty() || host.contains(char::is_whitespace)) {
                return Err(ValidationError::invalid_format("image_url", "must be an http(s) URL"));
            }
        }
        Ok(())
    }
}

/// People whose reviews `actor` oversees: everyone for administrators, the
/// team for managers, nobody for collaborators.
pub fn people_in_scope<'a>(actor: &Actor, chart: &'a OrgChart) -> Vec<&'a Employee> {
    if actor.capabilities().view_all_reviews {
        chart.employees().iter().collect()
    } else if actor.capabilities().manage_team_reviews {
        chart.team_of(&actor.user_id)
    } else {
        Vec::new()
    }
}

/// Status board for `period`; people without a review show as pending.
pub fn review_summary(
    actor: &Actor,
    chart: &OrgChart,
    reviews: &[PerformanceReview],
    period: Period,
) -> Vec<ReviewSummaryRow> {
    let mut rows: Vec<ReviewSummaryRow> = people_in_scope(actor, chart)
        .into_iter()
        .map(|person| {
            let review = reviews
                .iter()
                .find(|r| r.period() == period && r.employee_id() == &person.id);
            ReviewSummaryRow {
                employee_id: person.id.clone(),
                employee_name: person.name.clone(),
                employee_role: person.role,
                status: review.map(|r| r.status()).unwrap_or_default(),
                average_score: review.and_then(|r| r.average_score()),
                review_id: review.map(|r| r.id()),
            }
        })
        .collect();
    rows.sort_by(|a, b| super::compare_names(&a.employee_name, &b.employee_name));
    rows
}

/// Highest completed average among the manager's team in `period`.
pub fn team_highlight(
    manager_id: &UserId,
    chart: &OrgChart,
    reviews: &[PerformanceReview],
    period: Period,
) -> Option<TeamHighlight> {
    let team = chart.team_of(manager_id);
    // Reversed so that ties resolve to the earliest review.
    let top = reviews
        .iter()
        .rev()
        .filter(|r| r.period() == period && r.is_completed())
        .filter(|r| team.iter().any(|m| &m.id == r.employee_id()))
        .max_by(|a, b| {
            a.average_score()
                .unwrap_or(0.0)
                .partial_cmp(&b.average_score().unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        })?;

    let average_score = top.average_score().unwrap_or(0.0);
    let employee = chart.employee(top.employee_id());
    Some(TeamHighlight {
        employee_id: top.employee_id().clone(),
        employee_name: employee
            .map(|e| e.name.clone())
            .unwrap_or_else(|| top.employee_name().to_string()),
        role: employee.map(|e| e.role),
        average_score,
        reason: format!("Destaque do mês na equipe com nota {:.1}.", average_score),
    })
}
