//! Approval state shared by overtime and reimbursement requests.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

/// The approval state of a request.
///
/// A request starts `Pending` and moves to `Approved` exactly once; there is
/// no way back.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Approval, UserId};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let approval = Approval::Approved { by: UserId::new(1), at };
/// assert!(approval.is_approved());
/// assert_eq!(approval.approved_by(), Some(UserId::new(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Approval {
    /// Awaiting an admin decision.
    #[default]
    Pending,
    /// Approved by an admin.
    Approved {
        /// The approving admin.
        by: UserId,
        /// When the approval happened.
        at: NaiveDateTime,
    },
}

impl Approval {
    /// Returns true once approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, Approval::Approved { .. })
    }

    /// The approving admin, if approved.
    pub fn approved_by(&self) -> Option<UserId> {
        match self {
            Approval::Approved { by, .. } => Some(*by),
            Approval::Pending => None,
        }
    }
}
