//! Day detection and calendar-day bounds.
//!
//! Attendance and overtime rules depend on the local calendar: check-in is
//! refused on weekends, weekday overtime requires a same-day check-out, and
//! the overtime cap is summed per calendar day.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Represents the type of day for attendance rules.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// assert!(day_type.is_weekend());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayType {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self, DayType::Saturday | DayType::Sunday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given datetime.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDateTime;
///
/// // 2025-06-07 is a Saturday
/// let saturday = NaiveDateTime::parse_from_str("2025-06-07 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2025-06-02 is a Monday
/// let monday = NaiveDateTime::parse_from_str("2025-06-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(get_day_type(monday), DayType::Weekday);
/// ```
pub fn get_day_type(datetime: NaiveDateTime) -> DayType {
    match datetime.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Returns true if the datetime falls on a Saturday or Sunday.
pub fn is_weekend(datetime: NaiveDateTime) -> bool {
    get_day_type(datetime).is_weekend()
}

/// Returns the first and last millisecond of a calendar day.
///
/// Both bounds are inclusive, so a range query over them covers exactly
/// the records whose `date()` equals `date`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::day_bounds;
/// use chrono::NaiveDate;
///
/// let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
/// assert_eq!(start.to_string(), "2025-06-02 00:00:00");
/// assert_eq!(end.to_string(), "2025-06-02 23:59:59.999999999");
/// ```
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day =
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    (date.and_time(NaiveTime::MIN), date.and_time(end_of_day))
}
