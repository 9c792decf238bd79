//! In-memory storage backend.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    Approval, AttendanceId, AttendanceKind, AttendanceRecord, NewAttendance, NewOvertime,
    NewPayroll, NewReimbursement, OvertimeId, OvertimeRequest, PayrollId, PayrollPeriod,
    PayrollStatus, ReimbursementId, ReimbursementRequest, User, UserId,
};

use super::{
    AttendanceStore, Insertion, OvertimeStore, PayrollStore, ReimbursementStore, StoreError,
    StoreResult, Transition, UserDirectory,
};

#[derive(Debug)]
struct Table<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
    last_id: AtomicU64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            last_id: AtomicU64::new(0),
        }
    }
}

impl<K, V> Table<K, V> {
    fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn read(&self, name: &'static str) -> StoreResult<RwLockReadGuard<'_, BTreeMap<K, V>>> {
        self.rows.read().map_err(|_| StoreError::Poisoned(name))
    }

    fn write(&self, name: &'static str) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<K, V>>> {
        self.rows.write().map_err(|_| StoreError::Poisoned(name))
    }
}

#[derive(Debug, Default)]
struct State {
    users: Table<UserId, User>,
    attendances: Table<AttendanceId, AttendanceRecord>,
    overtimes: Table<OvertimeId, OvertimeRequest>,
    reimbursements: Table<ReimbursementId, ReimbursementRequest>,
    payrolls: Table<PayrollId, PayrollPeriod>,
}

/// Every storage port backed by shared in-memory tables.
///
/// Clones share the same tables. Ids are assigned per table starting at 1.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{User, UserId};
/// use payroll_engine::store::MemoryStore;
///
/// let store = MemoryStore::new().with_users(vec![
///     User::admin(UserId::new(1), "hr"),
///     User::employee(UserId::new(2), "dewi", 4_500_000),
/// ]);
/// assert_eq!(store.user_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the user directory.
    pub fn with_users(self, users: impl IntoIterator<Item = User>) -> Self {
        for user in users {
            self.add_user(user);
        }
        self
    }

    /// Adds or replaces a directory entry.
    pub fn add_user(&self, user: User) {
        let mut users = self
            .state
            .users
            .rows
            .write()
            .unwrap_or_else(|e| e.into_inner());
        users.insert(user.id, user);
    }

    /// Number of users in the directory.
    pub fn user_count(&self) -> usize {
        self.state
            .users
            .rows
            .read()
            .map(|users| users.len())
            .unwrap_or_default()
    }
}

fn in_range(at: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    at >= start && at <= end
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        attendance: NewAttendance,
    ) -> StoreResult<Insertion<AttendanceRecord>> {
        let table = &self.state.attendances;
        let mut rows = table.write("attendance")?;

        let date = attendance.occurred_at.date();
        if let Some(existing) = rows.values().find(|record| {
            record.user_id == attendance.user_id
                && record.kind == attendance.kind
                && record.date() == date
        }) {
            return Ok(Insertion::Duplicate(existing.clone()));
        }

        let record = AttendanceRecord {
            id: AttendanceId::new(table.next_id()),
            user_id: attendance.user_id,
            kind: attendance.kind,
            occurred_at: attendance.occurred_at,
        };
        rows.insert(record.id, record.clone());
        Ok(Insertion::Inserted(record))
    }

    async fn find_for_day(
        &self,
        user_id: UserId,
        kind: AttendanceKind,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let rows = self.state.attendances.read("attendance")?;
        Ok(rows
            .values()
            .find(|record| record.user_id == user_id && record.kind == kind && record.date() == date)
            .cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<AttendanceRecord>> {
        let rows = self.state.attendances.read("attendance")?;
        Ok(rows
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let rows = self.state.attendances.read("attendance")?;
        Ok(rows
            .values()
            .filter(|record| record.user_id == user_id && in_range(record.occurred_at, start, end))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OvertimeStore for MemoryStore {
    async fn insert(
        &self,
        overtime: NewOvertime,
        created_at: NaiveDateTime,
    ) -> StoreResult<OvertimeRequest> {
        let table = &self.state.overtimes;
        let mut rows = table.write("overtime")?;
        let request = OvertimeRequest {
            id: OvertimeId::new(table.next_id()),
            user_id: overtime.user_id,
            description: overtime.description,
            overtime_at: overtime.overtime_at,
            duration_millis: overtime.duration_millis,
            approval: Approval::Pending,
            created_at,
        };
        rows.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get(&self, id: OvertimeId) -> StoreResult<Option<OvertimeRequest>> {
        Ok(self.state.overtimes.read("overtime")?.get(&id).cloned())
    }

    async fn approve(
        &self,
        id: OvertimeId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<OvertimeRequest>> {
        let mut rows = self.state.overtimes.write("overtime")?;
        let Some(request) = rows.get_mut(&id) else {
            return Ok(Transition::Missing);
        };
        if request.approval.is_approved() {
            return Ok(Transition::AlreadyApplied(request.clone()));
        }
        request.approval = Approval::Approved { by, at };
        Ok(Transition::Applied(request.clone()))
    }

    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<OvertimeRequest>> {
        let rows = self.state.overtimes.read("overtime")?;
        Ok(rows
            .values()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<OvertimeRequest>> {
        let rows = self.state.overtimes.read("overtime")?;
        Ok(rows
            .values()
            .filter(|request| request.user_id == user_id && in_range(request.created_at, start, end))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReimbursementStore for MemoryStore {
    async fn insert(
        &self,
        reimbursement: NewReimbursement,
        created_at: NaiveDateTime,
    ) -> StoreResult<ReimbursementRequest> {
        let table = &self.state.reimbursements;
        let mut rows = table.write("reimbursement")?;
        let request = ReimbursementRequest {
            id: ReimbursementId::new(table.next_id()),
            user_id: reimbursement.user_id,
            description: reimbursement.description,
            amount: reimbursement.amount,
            approval: Approval::Pending,
            created_at,
        };
        rows.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get(&self, id: ReimbursementId) -> StoreResult<Option<ReimbursementRequest>> {
        Ok(self.state.reimbursements.read("reimbursement")?.get(&id).cloned())
    }

    async fn approve(
        &self,
        id: ReimbursementId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<ReimbursementRequest>> {
        let mut rows = self.state.reimbursements.write("reimbursement")?;
        let Some(request) = rows.get_mut(&id) else {
            return Ok(Transition::Missing);
        };
        if request.approval.is_approved() {
            return Ok(Transition::AlreadyApplied(request.clone()));
        }
        request.approval = Approval::Approved { by, at };
        Ok(Transition::Applied(request.clone()))
    }

    async fn list_by_user(&self, user_id: UserId) -> StoreResult<Vec<ReimbursementRequest>> {
        let rows = self.state.reimbursements.read("reimbursement")?;
        Ok(rows
            .values()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Vec<ReimbursementRequest>> {
        let rows = self.state.reimbursements.read("reimbursement")?;
        Ok(rows
            .values()
            .filter(|request| request.user_id == user_id && in_range(request.created_at, start, end))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn insert(
        &self,
        payroll: NewPayroll,
        created_at: NaiveDateTime,
    ) -> StoreResult<PayrollPeriod> {
        let table = &self.state.payrolls;
        let mut rows = table.write("payroll")?;
        let period = PayrollPeriod {
            id: PayrollId::new(table.next_id()),
            name: payroll.name,
            started_at: payroll.started_at,
            ended_at: payroll.ended_at,
            status: PayrollStatus::Draft,
            created_by: payroll.created_by,
            created_at,
            updated_at: created_at,
        };
        rows.insert(period.id, period.clone());
        Ok(period)
    }

    async fn get(&self, id: PayrollId) -> StoreResult<Option<PayrollPeriod>> {
        Ok(self.state.payrolls.read("payroll")?.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<PayrollPeriod>> {
        Ok(self.state.payrolls.read("payroll")?.values().cloned().collect())
    }

    async fn roll(
        &self,
        id: PayrollId,
        by: UserId,
        at: NaiveDateTime,
    ) -> StoreResult<Transition<PayrollPeriod>> {
        let mut rows = self.state.payrolls.write("payroll")?;
        let Some(period) = rows.get_mut(&id) else {
            return Ok(Transition::Missing);
        };
        if period.is_rolled() {
            return Ok(Transition::AlreadyApplied(period.clone()));
        }
        period.status = PayrollStatus::Rolled { by, at };
        period.updated_at = at;
        Ok(Transition::Applied(period.clone()))
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.state.users.read("user")?.get(&id).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.users.read("user")?.values().cloned().collect())
    }
}
