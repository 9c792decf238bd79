//! Storage ports.
//!
//! The ledgers and the payroll engine talk to persistence through these
//! traits. Every state-changing primitive is atomic on its own: attendance
//! inserts are keyed on `(user, kind, calendar day)` and approvals and rolls
//! are compare-and-set, so two racing callers can never both succeed.
//!
//! [`MemoryStore`] implements every port in memory.

mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::{
    AttendanceKind, AttendanceRecord, NewAttendance, NewOvertime, NewPayroll, NewReimbursement,
    OvertimeId, OvertimeRequest, PayrollId, PayrollPeriod, ReimbursementId, ReimbursementRequest,
    User, UserId,
};

pub use memory::MemoryStore;

/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lock guarding a table was poisoned by a panicking writer.
    #[error("Storage lock poisoned: {0}")]
    Poisoned(&'static str),
}

/// Result alias for storage calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an insert keyed on a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion<T> {
    /// The record was stored.
    Inserted(T),
    /// A record with the same key already existed; it is returned unchanged.
    Duplicate(T),
}

/// Outcome of a one-way compare-and-set transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    /// The entity moved to its final state.
    Applied(T),
    /// The entity was already in its final state; it is returned unchanged.
    AlreadyApplied(T),
    /// No entity has the given id.
    Missing,
}

/// Attendance persistence.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Stores the record unless one with the same user, kind and calendar day
    /// exists.
    async fn insert_if_absent(
        &self,
        attendance: NewAttendance,
    ) -> StoreResult<Insertion<AttendanceRecord>>;

    /// The user's record of `kind` on `date`, if any.
    async fn find_for_day(
        &self,
        user_id: UserId,
        kind: AttendanceKind,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>>;

    /// All of the user's records.
    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<AttendanceRecord>>;

    /// The user's records with `occurred_at` in `start..=end`.
    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<AttendanceRecord>>;
}

/// Overtime request persistence.
#[async_trait]
pub trait OvertimeStore: Send + Sync {
    /// Stores a pending request.
    async fn insert(
        &self,
        overtime: NewOvertime,
        created_at: NaiveDateTime,
    ) -> StoreResult<OvertimeRequest>;

    /// Looks a request up by id.
    async fn get(&self, id: OvertimeId) -> StoreResult<Option<OvertimeRequest>>;

    /// Approves a pending request.
    async fn approve(
        &self,
        id: OvertimeId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<OvertimeRequest>>;

    /// All of the user's requests.
    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<OvertimeRequest>>;

    /// The user's requests with `created_at` in `start..=end`.
    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<OvertimeRequest>>;
}

/// Reimbursement request persistence.
#[async_trait]
pub trait ReimbursementStore: Send + Sync {
    /// Stores a pending claim.
    async fn insert(
        &self,
        reimbursement: NewReimbursement,
        created_at: NaiveDateTime,
    ) -> StoreResult<ReimbursementRequest>;

    /// Looks a claim up by id.
    async fn get(&self, id: ReimbursementId) -> StoreResult<Option<ReimbursementRequest>>;

    /// Approves a pending claim.
    async fn approve(
        &self,
        id: ReimbursementId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<ReimbursementRequest>>;

    /// All of the user's claims.
    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<ReimbursementRequest>>;

    /// The user's claims with `created_at` in `start..=end`.
    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<ReimbursementRequest>>;
}

/// Payroll period persistence.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Stores a draft period.
    async fn insert(
        &self,
        payroll: NewPayroll,
        created_at: NaiveDateTime,
    ) -> StoreResult<PayrollPeriod>;

    /// Looks a period up by id.
    async fn get(&self, id: PayrollId) -> StoreResult<Option<PayrollPeriod>>;

    /// All periods, ascending by id.
    async fn list(&self) -> StoreResult<Vec<PayrollPeriod>>;

    /// Rolls a draft period.
    async fn roll(
        &self,
        id: PayrollId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<PayrollPeriod>>;
}

/// Read access to the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks a user up by id.
    async fn get_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// All users, ascending by id.
    async fn list_users(&self) -> StoreResult<Vec<User>>;
}
