//! Attendance records and their per-day grouping.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AttendanceId, UserId};

/// Whether an attendance record marks the start or end of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    /// Start of the working day.
    CheckIn,
    /// End of the working day.
    CheckOut,
}

impl std::fmt::Display for AttendanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceKind::CheckIn => write!(f, "check_in"),
            AttendanceKind::CheckOut => write!(f, "check_out"),
        }
    }
}

/// An immutable check-in or check-out fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Record identifier.
    pub id: AttendanceId,
    /// The user who checked in or out.
    pub user_id: UserId,
    /// Check-in or check-out.
    #[serde(rename = "type")]
    pub kind: AttendanceKind,
    /// Local wall-clock time of the action.
    pub occurred_at: NaiveDateTime,
}

impl AttendanceRecord {
    /// The calendar day the record belongs to.
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date()
    }
}

/// A record about to be stored; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    /// The acting user.
    pub user_id: UserId,
    /// Check-in or check-out.
    pub kind: AttendanceKind,
    /// Local wall-clock time of the action.
    pub occurred_at: NaiveDateTime,
}

/// The attendance facts of one calendar day.
///
/// Either side may be missing: a forgotten check-out leaves `check_out`
/// empty, a stray check-out leaves `check_in` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The calendar day.
    pub date: NaiveDate,
    /// The day's check-in, if any.
    pub check_in: Option<AttendanceRecord>,
    /// The day's check-out, if any.
    pub check_out: Option<AttendanceRecord>,
}

impl AttendanceDay {
    /// An empty day, filled as records are grouped.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            check_in: None,
            check_out: None,
        }
    }

    /// Places a record on its side of the day.
    pub fn record(&mut self, record: AttendanceRecord) {
        match record.kind {
            AttendanceKind::CheckIn => self.check_in = Some(record),
            AttendanceKind::CheckOut => self.check_out = Some(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: AttendanceKind, at: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceId::new(1),
            user_id: UserId::new(1),
            kind,
            occurred_at: NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn test_record_date_is_calendar_day() {
        let r = record(AttendanceKind::CheckIn, "2025-06-02 23:59:59");
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    #[test]
    fn test_day_places_records_by_kind() {
        let mut day = AttendanceDay::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        day.record(record(AttendanceKind::CheckOut, "2025-06-02 17:00:00"));
        assert!(day.check_in.is_none());
        assert!(day.check_out.is_some());

        day.record(record(AttendanceKind::CheckIn, "2025-06-02 08:00:00"));
        assert!(day.check_in.is_some());
    }

    #[test]
    fn test_record_serializes_kind_as_type() {
        let json = serde_json::to_string(&record(AttendanceKind::CheckIn, "2025-06-02 08:00:00"))
            .unwrap();
        assert!(json.contains("\"type\":\"check_in\""));
        assert!(json.contains("\"occurred_at\":\"2025-06-02T08:00:00\""));
    }
}
