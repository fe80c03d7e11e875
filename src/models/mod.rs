pub mod deduction;
pub mod department;
pub mod employee;
pub mod payroll;
pub mod position;
pub mod role;
pub mod search;
pub mod timesheet;
pub mod user;
