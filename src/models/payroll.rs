//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type and its one-way
//! [`PayrollStatus`] transition from draft to rolled.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{PayrollId, UserId};

/// Whether a payroll period is still open or has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Open; payslips cannot be generated yet.
    #[default]
    Draft,
    /// Closed; payslips are computable. Terminal.
    Rolled {
        /// The admin who rolled the period.
        by: UserId,
        /// When the period was rolled.
        at: NaiveDateTime,
    },
}

/// A payroll period about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    /// Display name, e.g. "June 2025".
    pub name: String,
    /// First instant covered (inclusive).
    pub started_at: NaiveDateTime,
    /// Last instant covered (inclusive).
    pub ended_at: NaiveDateTime,
    /// The admin creating the period.
    pub created_by: UserId,
}

impl NewPayroll {
    /// Boundary validation: a name and an ordered range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_input("name", "must not be empty"));
        }
        if self.ended_at < self.started_at {
            return Err(EngineError::invalid_input(
                "ended_at",
                format!(
                    "must not be before started_at ({} < {})",
                    self.ended_at, self.started_at
                ),
            ));
        }
        Ok(())
    }
}

/// A payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollId, PayrollPeriod, PayrollStatus, UserId};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
/// let period = PayrollPeriod {
///     id: PayrollId::new(1),
///     name: "June 2025".to_string(),
///     started_at: day(1).and_hms_opt(0, 0, 0).unwrap(),
///     ended_at: day(30).and_hms_opt(23, 59, 59).unwrap(),
///     status: PayrollStatus::Draft,
///     created_by: UserId::new(1),
///     created_at: day(1).and_hms_opt(0, 0, 0).unwrap(),
///     updated_at: day(1).and_hms_opt(0, 0, 0).unwrap(),
/// };
///
/// assert!(!period.is_rolled());
/// assert!(period.contains(day(15).and_hms_opt(12, 0, 0).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Period identifier.
    pub id: PayrollId,
    /// Display name.
    pub name: String,
    /// First instant covered (inclusive).
    pub started_at: NaiveDateTime,
    /// Last instant covered (inclusive).
    pub ended_at: NaiveDateTime,
    /// Draft or rolled.
    #[serde(flatten)]
    pub status: PayrollStatus,
    /// The admin who created the period.
    pub created_by: UserId,
    /// Creation time.
    pub created_at: NaiveDateTime,
    /// Last change (creation or roll).
    pub updated_at: NaiveDateTime,
}

impl PayrollPeriod {
    /// Returns true once the period has been rolled.
    pub fn is_rolled(&self) -> bool {
        matches!(self.status, PayrollStatus::Rolled { .. })
    }

    /// The admin who rolled the period, if rolled.
    pub fn rolled_by(&self) -> Option<UserId> {
        match self.status {
            PayrollStatus::Rolled { by, .. } => Some(by),
            PayrollStatus::Draft => None,
        }
    }

    /// Checks whether a timestamp falls inside the period, both ends inclusive.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.started_at && at <= self.ended_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn draft() -> PayrollPeriod {
        PayrollPeriod {
            id: PayrollId::new(1),
            name: "June".to_string(),
            started_at: at(1, 0),
            ended_at: at(30, 23),
            status: PayrollStatus::Draft,
            created_by: UserId::new(1),
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = draft();
        assert!(period.contains(period.started_at));
        assert!(period.contains(period.ended_at));
        assert!(!period.contains(at(30, 23) + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_rolled_status_reports_roller() {
        let mut period = draft();
        assert_eq!(period.rolled_by(), None);
        period.status = PayrollStatus::Rolled {
            by: UserId::new(9),
            at: at(30, 23),
        };
        assert!(period.is_rolled());
        assert_eq!(period.rolled_by(), Some(UserId::new(9)));
    }

    #[test]
    fn test_serialize_flattens_status() {
        let json = serde_json::to_string(&draft()).unwrap();
        assert!(json.contains("\"status\":\"draft\""));
        assert!(json.contains("\"started_at\":\"2025-06-01T00:00:00\""));
    }

    #[test]
    fn test_new_payroll_rejects_reversed_range() {
        let payroll = NewPayroll {
            name: "Backwards".to_string(),
            started_at: at(30, 0),
            ended_at: at(1, 0),
            created_by: UserId::new(1),
        };
        match payroll.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "ended_at"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_new_payroll_accepts_single_instant_range() {
        let payroll = NewPayroll {
            name: "Instant".to_string(),
            started_at: at(1, 0),
            ended_at: at(1, 0),
            created_by: UserId::new(1),
        };
        assert!(payroll.validate().is_ok());
    }
}
