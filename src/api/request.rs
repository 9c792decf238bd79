//! Request types for the payroll API.
//!
//! Bodies carry only what the caller chooses. The acting user always comes
//! from the trusted identity headers, never from the body.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{NewOvertime, NewPayroll, NewReimbursement, UserId};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Body of `POST /overtimes`.
///
/// The duration may be given in milliseconds or in minutes; milliseconds
/// win when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOvertimeRequest {
    /// What the overtime was for.
    pub description: String,
    /// When the overtime was worked.
    pub overtime_at: NaiveDateTime,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_millis: Option<i64>,
    /// Duration in minutes.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

impl CreateOvertimeRequest {
    /// Converts the body into a submission for `user_id`.
    pub fn into_new_overtime(self, user_id: UserId) -> EngineResult<NewOvertime> {
        let duration_millis = match (self.duration_millis, self.duration_minutes) {
            (Some(millis), _) => millis,
            (None, Some(minutes)) => minutes.checked_mul(MILLIS_PER_MINUTE).ok_or_else(|| {
                EngineError::invalid_input("duration_minutes", "is out of range")
            })?,
            (None, None) => {
                return Err(EngineError::invalid_input(
                    "duration_millis",
                    "or duration_minutes is required",
                ));
            }
        };

        Ok(NewOvertime {
            user_id,
            description: self.description,
            overtime_at: self.overtime_at,
            duration_millis,
        })
    }
}

/// Body of `POST /reimbursements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReimbursementRequest {
    /// What the expense was for.
    pub description: String,
    /// Amount in minor currency units.
    pub amount: i64,
}

impl CreateReimbursementRequest {
    /// Converts the body into a claim for `user_id`.
    pub fn into_new_reimbursement(self, user_id: UserId) -> NewReimbursement {
        NewReimbursement {
            user_id,
            description: self.description,
            amount: self.amount,
        }
    }
}

/// Body of `POST /payrolls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    /// Display name.
    pub name: String,
    /// First instant covered (inclusive).
    pub started_at: NaiveDateTime,
    /// Last instant covered (inclusive).
    pub ended_at: NaiveDateTime,
}

impl CreatePayrollRequest {
    /// Converts the body into a period created by `created_by`.
    pub fn into_new_payroll(self, created_by: UserId) -> NewPayroll {
        NewPayroll {
            name: self.name,
            started_at: self.started_at,
            ended_at: self.ended_at,
            created_by,
        }
    }
}

/// Query string of the listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Whose records to list; defaults to the caller.
    #[serde(default)]
    pub user_id: Option<u64>,
}
