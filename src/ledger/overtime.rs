//! Overtime ledger.
//!
//! Overtime is self-reported. On weekdays it can only be submitted after the
//! employee has checked out, and the total submitted on one calendar day is
//! capped. Submissions for the same user are serialized so the cap holds
//! under concurrency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::calculation::{day_bounds, is_weekend};
use crate::error::{EngineError, EngineResult};
use crate::models::{NewOvertime, OvertimeId, OvertimeRequest, UserId};
use crate::store::{OvertimeStore, Transition};

use super::AttendanceLedger;

type UserLocks = Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>;

/// Overtime submission and approval.
#[derive(Clone)]
pub struct OvertimeLedger {
    store: Arc<dyn OvertimeStore>,
    attendance: AttendanceLedger,
    daily_cap_millis: i64,
    user_locks: Arc<UserLocks>,
}

impl OvertimeLedger {
    /// Creates a ledger enforcing `daily_cap_millis` per user and day.
    pub fn new(
        store: Arc<dyn OvertimeStore>,
        attendance: AttendanceLedger,
        daily_cap_millis: i64,
    ) -> Self {
        Self {
            store,
            attendance,
            daily_cap_millis,
            user_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The configured daily cap.
    pub fn daily_cap_millis(&self) -> i64 {
        self.daily_cap_millis
    }

    fn user_lock(&self, user_id: UserId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.user_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(user_id).or_default().clone()
    }

    /// Submits an overtime request in the pending state.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank description or a non-positive duration.
    /// - `SubmitBeforeCheckout` on a weekday without a same-day check-out.
    /// - `ExceedsLimit` when the day's submissions would pass the cap.
    pub async fn create_overtime(
        &self,
        overtime: NewOvertime,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        overtime.validate()?;
        let user_id = overtime.user_id;
        let date = now.date();

        if !is_weekend(now) && !self.attendance.is_checked_out_today(user_id, now).await? {
            warn!(user_id = %user_id, date = %date, "Overtime submitted before check-out");
            return Err(EngineError::SubmitBeforeCheckout { date });
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let (day_start, day_end) = day_bounds(date);
        let used_millis: i64 = self
            .store
            .list_by_user_in_range(user_id, day_start, day_end)
            .await?
            .iter()
            .map(|request| request.duration_millis)
            .sum();

        let total = used_millis.saturating_add(overtime.duration_millis);
        debug!(
            user_id = %user_id,
            used_millis,
            requested_millis = overtime.duration_millis,
            cap_millis = self.daily_cap_millis,
            "Checking daily overtime cap"
        );
        if total > self.daily_cap_millis {
            warn!(
                user_id = %user_id,
                date = %date,
                used_millis,
                requested_millis = overtime.duration_millis,
                "Overtime exceeds daily limit"
            );
            return Err(EngineError::ExceedsLimit {
                requested_millis: overtime.duration_millis,
                used_millis,
                cap_millis: self.daily_cap_millis,
            });
        }

        let request = self.store.insert(overtime, now).await?;
        info!(
            user_id = %user_id,
            overtime_id = %request.id,
            duration_millis = request.duration_millis,
            "Overtime submitted"
        );
        Ok(request)
    }

    /// Approves a pending request.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `AlreadyApproved` when already approved.
    pub async fn approve_overtime(
        &self,
        id: OvertimeId,
        approver: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<OvertimeRequest> {
        match self.store.approve(id, approver, now).await? {
            Transition::Applied(request) => {
                info!(overtime_id = %id, approved_by = %approver, "Overtime approved");
                Ok(request)
            }
            Transition::AlreadyApplied(_) => Err(EngineError::AlreadyApproved {
                entity: "overtime",
                id: id.get(),
            }),
            Transition::Missing => Err(EngineError::not_found("overtime", id)),
        }
    }

    /// Looks a request up by id.
    pub async fn get_overtime(&self, id: OvertimeId) -> EngineResult<OvertimeRequest> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EngineError::not_found("overtime", id))
    }

    /// All of the user's requests, oldest first.
    pub async fn list_by_user(&self, user_id: UserId) -> EngineResult<Vec<OvertimeRequest>> {
        let mut requests = self.store.list_by_user(user_id).await?;
        requests.sort_by_key(|request| (request.created_at, request.id));
        Ok(requests)
    }

    /// The user's requests created in `start..=end`, oldest first.
    pub async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Vec<OvertimeRequest>> {
        let mut requests = self
            .store
            .list_by_user_in_range(user_id, start, end)
            .await?;
        requests.sort_by_key(|request| (request.created_at, request.id));
        Ok(requests)
    }
}
