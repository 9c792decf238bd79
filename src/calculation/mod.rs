//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind payslip generation:
//! weekend and calendar-day detection, the per-millisecond pro-rate,
//! clamped attendance pay, and the approved-only overtime and reimbursement
//! totals.

mod attendance_pay;
mod day_detection;
mod pro_rate;
mod request_pay;

pub use attendance_pay::{attendance_day_detail, clamp_daily_duration, summarize_attendance};
pub use day_detection::{DayType, day_bounds, get_day_type, is_weekend};
pub use pro_rate::{amount_for_duration, pro_rate_per_millis};
pub use request_pay::{summarize_overtime, summarize_reimbursements};
