//! Org chart: employees and departments.

mod chart;
mod department;
mod employee;

pub use chart::OrgChart;
pub use department::Department;
pub use employee::Employee;
