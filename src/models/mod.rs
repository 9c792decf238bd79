//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod approval;
mod attendance;
mod ids;
mod overtime;
mod payroll;
mod payslip;
mod reimbursement;
mod user;

pub use approval::Approval;
pub use attendance::{AttendanceDay, AttendanceKind, AttendanceRecord, NewAttendance};
pub use ids::{AttendanceId, OvertimeId, PayrollId, ReimbursementId, UserId};
pub use overtime::{NewOvertime, OvertimeRequest};
pub use payroll::{NewPayroll, PayrollPeriod, PayrollStatus};
pub use payslip::{
    AttendanceDetail, OvertimeDetail, Payslip, PayslipAttendance, PayslipOvertime,
    PayslipReimburse, PayslipSummary, ReimbursementDetail,
};
pub use reimbursement::{NewReimbursement, ReimbursementRequest};
pub use user::{Role, User};
