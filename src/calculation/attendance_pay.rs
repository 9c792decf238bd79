//! Attendance pay.
//!
//! Converts grouped attendance days into paid durations and amounts. A day
//! never pays more than the configured maximum working time, and a day
//! without a check-out is paid as a full day.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AttendanceDay, AttendanceDetail, PayslipAttendance};

use super::amount_for_duration;

/// Clamps a worked duration into `0..=max_working_millis_per_day`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::clamp_daily_duration;
///
/// const EIGHT_HOURS: i64 = 28_800_000;
/// assert_eq!(clamp_daily_duration(32_400_000, EIGHT_HOURS), EIGHT_HOURS); // 9h worked
/// assert_eq!(clamp_daily_duration(7_200_000, EIGHT_HOURS), 7_200_000);    // 2h worked
/// ```
pub fn clamp_daily_duration(worked_millis: i64, max_working_millis_per_day: i64) -> i64 {
    worked_millis.clamp(0, max_working_millis_per_day)
}

/// Computes the paid line for one attendance day.
///
/// - With both a check-in and a check-out, the worked time is the gap
///   between them.
/// - Without a check-out (forgotten), a full day is assumed.
/// - With only a check-out (stray record), the check-in is reported as
///   `period_end` and a full day is assumed.
///
/// The result is clamped by [`clamp_daily_duration`].
pub fn attendance_day_detail(
    day: &AttendanceDay,
    period_end: NaiveDateTime,
    max_working_millis_per_day: i64,
    rate: Decimal,
) -> AttendanceDetail {
    let checkin_at = day
        .check_in
        .as_ref()
        .map_or(period_end, |record| record.occurred_at);
    let checkout_at = day.check_out.as_ref().map(|record| record.occurred_at);

    let worked_millis = match (&day.check_in, checkout_at) {
        (Some(_), Some(checkout_at)) => (checkout_at - checkin_at).num_milliseconds(),
        (None, Some(_)) => {
            warn!(
                date = %day.date,
                "Check-out without check-in, paying a full day"
            );
            max_working_millis_per_day
        }
        (_, None) => max_working_millis_per_day,
    };

    let duration_millis = clamp_daily_duration(worked_millis, max_working_millis_per_day);

    AttendanceDetail {
        date: day.date,
        checkin_at,
        checkout_at,
        duration_millis,
        amount: amount_for_duration(duration_millis, rate),
    }
}

/// Builds the attendance section of a payslip, ordered by date.
pub fn summarize_attendance(
    days: &[AttendanceDay],
    period_end: NaiveDateTime,
    max_working_millis_per_day: i64,
    rate: Decimal,
) -> PayslipAttendance {
    let mut details: Vec<AttendanceDetail> = days
        .iter()
        .map(|day| attendance_day_detail(day, period_end, max_working_millis_per_day, rate))
        .collect();
    details.sort_by_key(|detail| detail.date);

    let total_duration_millis = details.iter().map(|d| d.duration_millis).sum();
    let total_amount = details.iter().map(|d| d.amount).sum();

    PayslipAttendance {
        details,
        total_duration_millis,
        total_amount,
    }
}
