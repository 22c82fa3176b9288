//! Dashboard settings store port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::reports::EmployeeOfTheMonth;

/// Persists the administrator-chosen employee of the month.
///
/// There is one card at a time; saving replaces it.
#[async_trait]
pub trait DashboardSettingsStore: Send + Sync {
    /// `None` until an administrator has saved a card.
    async fn load_employee_of_the_month(&self) -> Result<Option<EmployeeOfTheMonth>, DomainError>;

    async fn save_employee_of_the_month(&self, card: &EmployeeOfTheMonth) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_settings_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn DashboardSettingsStore) {}
    }
}
