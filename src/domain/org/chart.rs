//! In-memory view over users and departments used by handlers and reports.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{DepartmentId, UserId};

use super::{Department, Employee};

/// Snapshot of the org chart.
#[derive(Debug, Clone, Default)]
pub struct OrgChart {
    employees: Vec<Employee>,
    departments: Vec<Department>,
}

impl OrgChart {
    pub fn new(employees: Vec<Employee>, departments: Vec<Department>) -> Self {
        Self {
            employees,
            departments,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn employee(&self, id: &UserId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id() == id)
    }

    /// Everyone with the manager role.
    pub fn managers(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.is_manager())
    }

    /// Users assigned to any department led by `manager_id`.
    ///
    /// A manager who sits in a department they lead is part of their own team.
    pub fn team_of(&self, manager_id: &UserId) -> Vec<&Employee> {
        let led: HashSet<DepartmentId> = self
            .departments
            .iter()
            .filter(|d| d.is_led_by(manager_id))
            .map(|d| d.id())
            .collect();
        self.employees
            .iter()
            .filter(|e| e.department_id.map_or(false, |d| led.contains(&d)))
            .collect()
    }

    /// Name lookup by user id.
    pub fn names_by_id(&self) -> HashMap<&UserId, &str> {
        self.employees
            .iter()
            .map(|e| (&e.id, e.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn team_is_everyone_in_departments_the_manager_leads() {
        let sales = Department::new("Vendas", uid("m1")).unwrap();
        let ops = Department::new("Operações", uid("m2")).unwrap();
        let chart = OrgChart::new(
            vec![
                Employee::new(uid("m1"), "Marta", "m1@x", Role::Manager, None),
                Employee::new(uid("e1"), "Eva", "e1@x", Role::Collaborator, Some(sales.id())),
                Employee::new(uid("e2"), "Rui", "e2@x", Role::Collaborator, Some(sales.id())),
                Employee::new(uid("e3"), "Lia", "e3@x", Role::Collaborator, Some(ops.id())),
                Employee::new(uid("e4"), "Zé", "e4@x", Role::Collaborator, None),
            ],
            vec![sales, ops],
        );

        let team: Vec<&str> = chart.team_of(&uid("m1")).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(team, vec!["Eva", "Rui"]);
        assert!(chart.team_of(&uid("nobody")).is_empty());
        assert_eq!(chart.managers().count(), 1);
    }
}
