//! Reimbursement requests.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Approval, ReimbursementId, UserId};

/// A reimbursement claim before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReimbursement {
    /// The claiming employee.
    pub user_id: UserId,
    /// What the expense was.
    pub description: String,
    /// Amount in minor currency units.
    pub amount: i64,
}

impl NewReimbursement {
    /// Boundary validation: a description and a positive amount.
    pub fn validate(&self) -> EngineResult<()> {
        if self.description.trim().is_empty() {
            return Err(EngineError::invalid_input("description", "must not be empty"));
        }
        if self.amount <= 0 {
            return Err(EngineError::invalid_input("amount", "must be greater than zero"));
        }
        Ok(())
    }
}

/// A stored reimbursement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementRequest {
    /// Request identifier.
    pub id: ReimbursementId,
    /// The claiming employee.
    pub user_id: UserId,
    /// What the expense was.
    pub description: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Approval state.
    pub approval: Approval,
    /// When the claim was submitted.
    pub created_at: NaiveDateTime,
}

impl ReimbursementRequest {
    /// Returns true once an admin approved the claim.
    pub fn is_approved(&self) -> bool {
        self.approval.is_approved()
    }
}
