//! Pro-rate calculation.
//!
//! The pro-rate is a wage per millisecond: the monthly salary spread over
//! `days_per_month` working days of `max_working_millis_per_day` each. Both
//! attendance and overtime durations are converted to money with it.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Computes the wage per millisecond for a monthly salary.
///
/// # Errors
///
/// Returns `CalculationError` when `days_per_month × max_working_millis_per_day`
/// overflows or is zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{amount_for_duration, pro_rate_per_millis};
/// use rust_decimal::Decimal;
///
/// let rate = pro_rate_per_millis(4_500_000, 22, 28_800_000).unwrap();
/// let eight_hours = amount_for_duration(28_800_000, rate);
/// assert_eq!(eight_hours.round_dp(2), Decimal::new(20454545, 2)); // 204,545.45
/// ```
pub fn pro_rate_per_millis(
    monthly_salary: i64,
    days_per_month: i64,
    max_working_millis_per_day: i64,
) -> EngineResult<Decimal> {
    let divisor = days_per_month
        .checked_mul(max_working_millis_per_day)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "pro-rate divisor overflows: {} days x {}ms",
                days_per_month, max_working_millis_per_day
            ),
        })?;

    Decimal::from(monthly_salary)
        .checked_div(Decimal::from(divisor))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "pro-rate divisor is zero: {} days x {}ms",
                days_per_month, max_working_millis_per_day
            ),
        })
}

/// Converts a duration into money at the given per-millisecond rate.
pub fn amount_for_duration(duration_millis: i64, rate: Decimal) -> Decimal {
    Decimal::from(duration_millis) * rate
}
