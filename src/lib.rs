//! Attendance-based payroll engine.
//!
//! This crate records employee check-ins and check-outs, self-reported
//! overtime and reimbursement claims, and turns them into per-period
//! payslips once an admin rolls the payroll period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod payroll;
pub mod store;
