//! Org chart handlers.

mod departments;
mod employees;

pub use departments::{
    DeleteDepartmentCommand, DepartmentHandler, DepartmentView, ListDepartmentsQuery,
    SaveDepartmentCommand,
};
pub use employees::{
    DeleteEmployeeCommand, EmployeeHandler, ListEmployeesQuery, SaveEmployeeCommand,
};
