//! Error types for the payroll engine.
//!
//! Every ledger and engine operation returns [`EngineResult`]. Variants are
//! grouped into an [`ErrorKind`] so callers can react to the category of
//! failure (missing entity, state already reached, business rule) without
//! matching every variant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// The category an [`EngineError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// The requested state has already been reached.
    Conflict,
    /// A business rule blocks the action.
    PreconditionFailed,
    /// The caller supplied a value the boundary rejects.
    InvalidInput,
    /// A numeric computation could not be carried out.
    Calculation,
    /// The engine configuration is missing or unusable.
    Config,
    /// The storage layer failed.
    Storage,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::NotRolled { payroll_id: 7 };
/// assert_eq!(error.to_string(), "Payroll 7 has not been rolled");
/// assert_eq!(error.kind(), ErrorKind::PreconditionFailed);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "overtime", "payroll").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The user already checked in on this calendar day.
    #[error("Already checked in on {date}")]
    AlreadyCheckedIn {
        /// The calendar day of the attempted check-in.
        date: NaiveDate,
    },

    /// The user already checked out on this calendar day.
    #[error("Already checked out on {date}")]
    AlreadyCheckedOut {
        /// The calendar day of the attempted check-out.
        date: NaiveDate,
    },

    /// The request has already been approved.
    #[error("{entity} {id} is already approved")]
    AlreadyApproved {
        /// The kind of request ("overtime" or "reimbursement").
        entity: &'static str,
        /// The request id.
        id: u64,
    },

    /// The payroll period has already been rolled.
    #[error("Payroll {payroll_id} is already rolled")]
    AlreadyRolled {
        /// The payroll id.
        payroll_id: u64,
    },

    /// Check-in attempted on a Saturday or Sunday.
    #[error("Check-in is not allowed on weekends ({date})")]
    WeekendNotAllowed {
        /// The weekend day of the attempt.
        date: NaiveDate,
    },

    /// Check-out attempted without a same-day check-in.
    #[error("Cannot check out on {date} without checking in first")]
    CannotCheckOut {
        /// The calendar day of the attempted check-out.
        date: NaiveDate,
    },

    /// Weekday overtime submitted before checking out.
    #[error("Overtime cannot be submitted on {date} before checking out")]
    SubmitBeforeCheckout {
        /// The calendar day of the submission.
        date: NaiveDate,
    },

    /// The submission would exceed the daily overtime cap.
    #[error(
        "Overtime of {requested_millis}ms exceeds the daily limit: {used_millis}ms already submitted, cap is {cap_millis}ms"
    )]
    ExceedsLimit {
        /// Duration of the rejected submission.
        requested_millis: i64,
        /// Duration already submitted on the same day.
        used_millis: i64,
        /// The configured daily cap.
        cap_millis: i64,
    },

    /// Payslips were requested for a period still in draft.
    #[error("Payroll {payroll_id} has not been rolled")]
    NotRolled {
        /// The payroll id.
        payroll_id: u64,
    },

    /// The user has no monthly salary configured.
    #[error("User {user_id} has no monthly salary configured")]
    UserInfoMissing {
        /// The user id.
        user_id: u64,
    },

    /// A request field failed boundary validation.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What made it invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    ConfigInvalid {
        /// The configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The storage layer failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl EngineError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::AlreadyCheckedIn { .. }
            | EngineError::AlreadyCheckedOut { .. }
            | EngineError::AlreadyApproved { .. }
            | EngineError::AlreadyRolled { .. } => ErrorKind::Conflict,
            EngineError::WeekendNotAllowed { .. }
            | EngineError::CannotCheckOut { .. }
            | EngineError::SubmitBeforeCheckout { .. }
            | EngineError::ExceedsLimit { .. }
            | EngineError::NotRolled { .. }
            | EngineError::UserInfoMissing { .. } => ErrorKind::PreconditionFailed,
            EngineError::InvalidInput { .. } => ErrorKind::InvalidInput,
            EngineError::CalculationError { .. } => ErrorKind::Calculation,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ConfigInvalid { .. } => ErrorKind::Config,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Builds an [`EngineError::NotFound`] for any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Builds an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
