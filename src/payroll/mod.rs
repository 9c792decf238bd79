//! Payroll periods and payslip generation.
//!
//! A period is created as a draft and rolled exactly once. Payslips are
//! computed on demand from a rolled period and are never stored.

mod engine;

pub use engine::PayrollEngine;
