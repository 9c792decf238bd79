//! Attendance ledger.
//!
//! Records at most one check-in and one check-out per user and calendar day.
//! Uniqueness is enforced by the store's keyed insert, so two racing
//! check-ins for the same day cannot both be recorded.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::calculation::is_weekend;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, AttendanceKind, AttendanceRecord, NewAttendance, UserId};
use crate::store::{AttendanceStore, Insertion};

/// Check-in and check-out operations over an [`AttendanceStore`].
#[derive(Clone)]
pub struct AttendanceLedger {
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceLedger {
    /// Creates a ledger over the given store.
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store }
    }

    /// Records the start of a working day.
    ///
    /// # Errors
    ///
    /// - `WeekendNotAllowed` when `now` is a Saturday or Sunday.
    /// - `AlreadyCheckedIn` when the user already checked in on that day.
    pub async fn check_in(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let date = now.date();
        if is_weekend(now) {
            warn!(user_id = %user_id, date = %date, "Rejected weekend check-in");
            return Err(EngineError::WeekendNotAllowed { date });
        }

        self.record(user_id, AttendanceKind::CheckIn, now).await
    }

    /// Records the end of a working day.
    ///
    /// # Errors
    ///
    /// - `CannotCheckOut` when the user has not checked in on that day.
    /// - `AlreadyCheckedOut` when the user already checked out on that day.
    pub async fn check_out(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let date = now.date();
        let checked_in = self
            .store
            .find_for_day(user_id, AttendanceKind::CheckIn, date)
            .await?;
        if checked_in.is_none() {
            warn!(user_id = %user_id, date = %date, "Rejected check-out without check-in");
            return Err(EngineError::CannotCheckOut { date });
        }

        self.record(user_id, AttendanceKind::CheckOut, now).await
    }

    async fn record(
        &self,
        user_id: UserId,
        kind: AttendanceKind,
        now: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let insertion = self
            .store
            .insert_if_absent(NewAttendance {
                user_id,
                kind,
                occurred_at: now,
            })
            .await?;

        match insertion {
            Insertion::Inserted(record) => {
                info!(
                    user_id = %user_id,
                    attendance_id = %record.id,
                    kind = %kind,
                    occurred_at = %record.occurred_at,
                    "Attendance recorded"
                );
                Ok(record)
            }
            Insertion::Duplicate(existing) => {
                let date = now.date();
                warn!(
                    user_id = %user_id,
                    kind = %kind,
                    existing_id = %existing.id,
                    "Duplicate attendance for the day"
                );
                Err(match kind {
                    AttendanceKind::CheckIn => EngineError::AlreadyCheckedIn { date },
                    AttendanceKind::CheckOut => EngineError::AlreadyCheckedOut { date },
                })
            }
        }
    }

    /// Returns true when the user has checked out on `now`'s calendar day.
    pub async fn is_checked_out_today(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<bool> {
        let check_out = self
            .store
            .find_for_day(user_id, AttendanceKind::CheckOut, now.date())
            .await?;
        Ok(check_out.is_some())
    }

    /// All of the user's records, oldest first.
    pub async fn list_by_user(&self, user_id: UserId) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records = self.store.list_by_user(user_id).await?;
        records.sort_by_key(|record| record.occurred_at);
        Ok(records)
    }

    /// The user's records in `start..=end`, oldest first.
    pub async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records = self
            .store
            .list_by_user_in_range(user_id, start, end)
            .await?;
        records.sort_by_key(|record| record.occurred_at);
        Ok(records)
    }

    /// Groups the user's records in `start..=end` by calendar day.
    ///
    /// Every day with at least one record yields an entry, ascending by
    /// date. A missing side is left empty.
    pub async fn group_by_date(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Vec<AttendanceDay>> {
        let records = self.list_by_user_in_range(user_id, start, end).await?;

        let mut days: BTreeMap<NaiveDate, AttendanceDay> = BTreeMap::new();
        for record in records {
            let date = record.date();
            days.entry(date)
                .or_insert_with(|| AttendanceDay::new(date))
                .record(record);
        }

        Ok(days.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::AttendanceId;
    use crate::store::MemoryStore;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn ledger() -> (AttendanceLedger, MemoryStore) {
        let store = MemoryStore::new();
        (AttendanceLedger::new(Arc::new(store.clone())), store)
    }

    const ALICE: UserId = UserId::new(2);

    /// AL-001: second same-day check-in is a conflict
    #[tokio::test]
    async fn test_al_001_second_check_in_conflicts() {
        let (ledger, _) = ledger();
        ledger.check_in(ALICE, at("2025-06-02", "08:00:00")).await.unwrap();

        let err = ledger
            .check_in(ALICE, at("2025-06-02", "09:30:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyCheckedIn { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(ledger.list_by_user(ALICE).await.unwrap().len(), 1);
    }

    /// AL-002: check-out without check-in is refused
    #[tokio::test]
    async fn test_al_002_check_out_requires_check_in() {
        let (ledger, _) = ledger();
        let err = ledger
            .check_out(ALICE, at("2025-06-02", "17:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::CannotCheckOut { .. }));
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    }

    /// AL-003: weekend check-in is refused regardless of prior state
    #[tokio::test]
    async fn test_al_003_weekend_check_in_refused() {
        let (ledger, _) = ledger();
        for (date, time) in [("2025-06-07", "08:00:00"), ("2025-06-08", "23:59:59")] {
            let err = ledger.check_in(ALICE, at(date, time)).await.unwrap_err();
            assert!(matches!(err, EngineError::WeekendNotAllowed { .. }));
        }
        assert!(ledger.list_by_user(ALICE).await.unwrap().is_empty());
    }

    /// AL-004: second same-day check-out is a conflict
    #[tokio::test]
    async fn test_al_004_second_check_out_conflicts() {
        let (ledger, _) = ledger();
        ledger.check_in(ALICE, at("2025-06-02", "08:00:00")).await.unwrap();
        ledger.check_out(ALICE, at("2025-06-02", "17:00:00")).await.unwrap();

        let err = ledger
            .check_out(ALICE, at("2025-06-02", "18:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadyCheckedOut { .. }));
    }

    #[tokio::test]
    async fn test_checked_out_today_follows_calendar_day() {
        let (ledger, _) = ledger();
        ledger.check_in(ALICE, at("2025-06-02", "08:00:00")).await.unwrap();
        assert!(!ledger
            .is_checked_out_today(ALICE, at("2025-06-02", "12:00:00"))
            .await
            .unwrap());

        ledger.check_out(ALICE, at("2025-06-02", "17:00:00")).await.unwrap();
        assert!(ledger
            .is_checked_out_today(ALICE, at("2025-06-02", "19:00:00"))
            .await
            .unwrap());
        assert!(!ledger
            .is_checked_out_today(ALICE, at("2025-06-03", "19:00:00"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_check_ins_record_once() {
        let (ledger, store) = ledger();
        let mut handles = Vec::new();
        for second in 0..8u32 {
            let ledger = ledger.clone();
            let now = at("2025-06-02", "08:00:00") + chrono::Duration::seconds(i64::from(second));
            handles.push(tokio::spawn(async move { ledger.check_in(ALICE, now).await }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(err, EngineError::AlreadyCheckedIn { .. })),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(
            AttendanceStore::list_by_user(&store, ALICE).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_group_by_date_surfaces_partial_days() {
        let (ledger, store) = ledger();
        ledger.check_in(ALICE, at("2025-06-03", "08:00:00")).await.unwrap();
        ledger.check_in(ALICE, at("2025-06-02", "08:00:00")).await.unwrap();
        ledger.check_out(ALICE, at("2025-06-02", "17:00:00")).await.unwrap();
        // stray check-out written directly to storage
        store
            .insert_if_absent(NewAttendance {
                user_id: ALICE,
                kind: AttendanceKind::CheckOut,
                occurred_at: at("2025-06-04", "18:00:00"),
            })
            .await
            .unwrap();

        let days = ledger
            .group_by_date(
                ALICE,
                at("2025-06-01", "00:00:00"),
                at("2025-06-30", "23:59:59"),
            )
            .await
            .unwrap();

        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-02", "2025-06-03", "2025-06-04"]);
        assert!(days[0].check_in.is_some() && days[0].check_out.is_some());
        assert!(days[1].check_in.is_some() && days[1].check_out.is_none());
        assert!(days[2].check_in.is_none() && days[2].check_out.is_some());
    }

    #[tokio::test]
    async fn test_range_listing_is_sorted_and_inclusive() {
        let (ledger, _) = ledger();
        ledger.check_in(ALICE, at("2025-06-03", "08:00:00")).await.unwrap();
        ledger.check_in(ALICE, at("2025-06-02", "08:00:00")).await.unwrap();
        ledger.check_in(ALICE, at("2025-06-04", "08:00:00")).await.unwrap();

        let records = ledger
            .list_by_user_in_range(
                ALICE,
                at("2025-06-02", "08:00:00"),
                at("2025-06-03", "08:00:00"),
            )
            .await
            .unwrap();
        let ids: Vec<AttendanceId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![AttendanceId::new(2), AttendanceId::new(1)]);
    }
}
