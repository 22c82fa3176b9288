use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::reports::EmployeeOfTheMonth;
use crate::ports::DashboardSettingsStore;

use super::InMemoryStore;

#[async_trait]
impl DashboardSettingsStore for InMemoryStore {
    async fn load_employee_of_the_month(&self) -> Result<Option<EmployeeOfTheMonth>, DomainError> {
        Ok(self.read()?.employee_of_the_month.clone())
    }

    async fn save_employee_of_the_month(&self, card: &EmployeeOfTheMonth) -> Result<(), DomainError> {
        self.write()?.employee_of_the_month = Some(card.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saving_replaces_the_card() {
        let store = InMemoryStore::new();
        assert!(store.load_employee_of_the_month().await.unwrap().is_none());

        let first = EmployeeOfTheMonth::new("Ana", "Vendedora", "Meta batida", None).unwrap();
        let second = EmployeeOfTheMonth::new("Bruno", "Analista", "Projeto entregue", None).unwrap();
        store.save_employee_of_the_month(&first).await.unwrap();
        store.save_employee_of_the_month(&second).await.unwrap();

        assert_eq!(store.load_employee_of_the_month().await.unwrap(), Some(second));
    }
}
