//! Department maintenance and listing.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Actor, CommandMetadata, DepartmentId, DomainError, ErrorCode, UserId};
use crate::domain::org::Department;
use crate::ports::OrgDirectory;

/// A department with its leader's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentView {
    pub id: DepartmentId,
    pub name: String,
    pub leader_id: UserId,
    pub leader_name: Option<String>,
    pub member_count: usize,
}

#[derive(Debug, Clone)]
pub struct ListDepartmentsQuery {
    pub actor: Actor,
}

/// Creates (`department_id: None`) or updates a department.
#[derive(Debug, Clone)]
pub struct SaveDepartmentCommand {
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub leader_id: UserId,
}

#[derive(Debug, Clone)]
pub struct DeleteDepartmentCommand {
    pub department_id: DepartmentId,
}

pub struct DepartmentHandler {
    directory: Arc<dyn OrgDirectory>,
}

impl DepartmentHandler {
    pub fn new(directory: Arc<dyn OrgDirectory>) -> Self {
        Self { directory }
    }

    /// Sorted by name.
    pub async fn list(&self, query: ListDepartmentsQuery) -> Result<Vec<DepartmentView>, DomainError> {
        if !query.actor.capabilities().manage_team_reviews {
            return Err(forbidden());
        }
        let chart = self.directory.org_chart().await?;
        let mut views: Vec<DepartmentView> = chart
            .departments()
            .iter()
            .map(|d| DepartmentView {
                id: d.id(),
                name: d.name().to_string(),
                leader_id: d.leader_id().clone(),
                leader_name: chart.employee(d.leader_id()).map(|e| e.name.clone()),
                member_count: chart
                    .employees()
                    .iter()
                    .filter(|e| e.department_id == Some(d.id()))
                    .count(),
            })
            .collect();
        views.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(views)
    }

    pub async fn save(
        &self,
        cmd: SaveDepartmentCommand,
        metadata: CommandMetadata,
    ) -> Result<Department, DomainError> {
        if !metadata.capabilities().manage_configuration {
            return Err(forbidden());
        }
        let leader = self
            .directory
            .find_employee(&cmd.leader_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EmployeeNotFound,
                    format!("Employee not found: {}", cmd.leader_id),
                )
            })?;
        if !leader.is_manager() {
            return Err(DomainError::validation(
                "leader_id",
                "The department leader must be a manager",
            ));
        }

        let department = match cmd.department_id {
            Some(id) => {
                let mut department = self
                    .directory
                    .find_department(&id)
                    .await?
                    .ok_or_else(|| not_found(&id))?;
                department.update(cmd.name, cmd.leader_id)?;
                department
            }
            None => Department::new(cmd.name, cmd.leader_id)?,
        };

        self.directory.save_department(&department).await?;
        tracing::info!(department_id = %department.id(), name = department.name(), "department saved");
        Ok(department)
    }

    /// Members are left without a department.
    pub async fn delete(
        &self,
        cmd: DeleteDepartmentCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        if !metadata.capabilities().manage_configuration {
            return Err(forbidden());
        }
        if self
            .directory
            .find_department(&cmd.department_id)
            .await?
            .is_none()
        {
            return Err(not_found(&cmd.department_id));
        }
        self.directory.delete_department(&cmd.department_id).await
    }
}

fn forbidden() -> DomainError {
    DomainError::new(ErrorCode::Forbidden, "Permission denied")
}

fn not_found(id: &DepartmentId) -> DomainError {
    DomainError::new(
        ErrorCode::DepartmentNotFound,
        format!("Department not found: {}", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::Role;

    fn save(name: &str, leader: &str) -> SaveDepartmentCommand {
        SaveDepartmentCommand {
            department_id: None,
            name: name.to_string(),
            leader_id: uid(leader),
        }
    }

    #[tokio::test]
    async fn lists_departments_with_leader_names() {
        let env = TestEnv::new().await;
        let views = DepartmentHandler::new(env.store.clone())
            .list(ListDepartmentsQuery {
                actor: Actor::new(uid(ADMIN), Role::Administrator),
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Operações");
        assert_eq!(views[0].leader_name.as_deref(), Some("Nuno"));
        assert_eq!(views[1].member_count, 2);
    }

    #[tokio::test]
    async fn creates_and_renames_a_department() {
        let env = TestEnv::new().await;
        let handler = DepartmentHandler::new(env.store.clone());

        let created = handler.save(save("Financeiro", OTHER_MANAGER), admin()).await.unwrap();
        let mut rename = save("Finanças", MANAGER);
        rename.department_id = Some(created.id());
        let renamed = handler.save(rename, admin()).await.unwrap();

        assert_eq!(renamed.id(), created.id());
        let stored = env.store.find_department(&created.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Finanças");
        assert!(stored.is_led_by(&uid(MANAGER)));
    }

    #[tokio::test]
    async fn leader_must_be_an_existing_manager() {
        let env = TestEnv::new().await;
        let handler = DepartmentHandler::new(env.store.clone());

        let not_manager = handler.save(save("Financeiro", ANA), admin()).await.unwrap_err();
        assert_eq!(not_manager.code, ErrorCode::ValidationFailed);

        let unknown = handler.save(save("Financeiro", "ghost"), admin()).await.unwrap_err();
        assert_eq!(unknown.code, ErrorCode::EmployeeNotFound);

        let forbidden = handler.save(save("Financeiro", MANAGER), manager()).await.unwrap_err();
        assert_eq!(forbidden.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn deleting_a_department_unassigns_members() {
        let env = TestEnv::new().await;
        DepartmentHandler::new(env.store.clone())
            .delete(
                DeleteDepartmentCommand {
                    department_id: env.ops.id(),
                },
                admin(),
            )
            .await
            .unwrap();

        let carla = env.store.find_employee(&uid(CARLA)).await.unwrap().unwrap();
        assert_eq!(carla.department_id, None);
    }
}
