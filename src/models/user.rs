//! User directory records.
//!
//! Users are owned by an external directory; the engine only reads their
//! role and monthly salary.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// HR/payroll operator: approves requests and closes periods.
    Admin,
    /// Employee: self-reports attendance, overtime and reimbursements.
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A user as seen by the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Role, User, UserId};
///
/// let user = User::employee(UserId::new(1), "dewi", 4_500_000);
/// assert_eq!(user.role, Role::Employee);
/// assert_eq!(user.monthly_salary, Some(4_500_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory identifier.
    pub id: UserId,
    /// Login name, informational only.
    pub username: String,
    /// The user's role.
    pub role: Role,
    /// Monthly salary in minor currency units; employees only.
    pub monthly_salary: Option<i64>,
}

impl User {
    /// Creates an employee with a monthly salary.
    pub fn employee(id: UserId, username: impl Into<String>, monthly_salary: i64) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::Employee,
            monthly_salary: Some(monthly_salary),
        }
    }

    /// Creates an admin without salary information.
    pub fn admin(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role: Role::Admin,
            monthly_salary: None,
        }
    }

    /// Returns true for employees.
    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}
