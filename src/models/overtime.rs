//! Overtime requests.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Approval, OvertimeId, UserId};

/// An overtime submission before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOvertime {
    /// The submitting employee.
    pub user_id: UserId,
    /// What the overtime was for.
    pub description: String,
    /// When the overtime was worked.
    pub overtime_at: NaiveDateTime,
    /// How long, in milliseconds.
    pub duration_millis: i64,
}

impl NewOvertime {
    /// Boundary validation: a description and a positive duration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.description.trim().is_empty() {
            return Err(EngineError::invalid_input("description", "must not be empty"));
        }
        if self.duration_millis <= 0 {
            return Err(EngineError::invalid_input(
                "duration_millis",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// A stored overtime request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Request identifier.
    pub id: OvertimeId,
    /// The submitting employee.
    pub user_id: UserId,
    /// What the overtime was for.
    pub description: String,
    /// When the overtime was worked.
    pub overtime_at: NaiveDateTime,
    /// How long, in milliseconds.
    pub duration_millis: i64,
    /// Approval state.
    pub approval: Approval,
    /// When the request was submitted.
    pub created_at: NaiveDateTime,
}

impl OvertimeRequest {
    /// Returns true once an admin approved the request.
    pub fn is_approved(&self) -> bool {
        self.approval.is_approved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(description: &str, duration_millis: i64) -> NewOvertime {
        NewOvertime {
            user_id: UserId::new(2),
            description: description.to_string(),
            overtime_at: chrono::NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            duration_millis,
        }
    }

    #[test]
    fn test_validate_accepts_positive_duration() {
        assert!(submission("release night", 3_600_000).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        match submission("release night", 0).validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "duration_millis"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        match submission("   ", 60_000).validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "description"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
