//! Business operations. Every entry point takes the caller's `Session`
//! and checks its capability before touching the database.

pub mod access;
pub mod auth;
pub mod backup;
pub mod calculator;
pub mod deduction;
pub mod department;
pub mod employee;
pub mod form;
pub mod log;
pub mod payroll;
pub mod position;
pub mod search;
pub mod timesheet;
pub mod user;
