//! Ledgers for employee-submitted facts.
//!
//! Each ledger owns the records it creates. The payroll engine only reads
//! them.

mod attendance;
mod overtime;
mod reimbursement;

pub use attendance::AttendanceLedger;
pub use overtime::OvertimeLedger;
pub use reimbursement::ReimbursementLedger;
