//! Reimbursement ledger.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{NewReimbursement, ReimbursementId, ReimbursementRequest, UserId};
use crate::store::{ReimbursementStore, Transition};

/// Reimbursement submission and approval.
#[derive(Clone)]
pub struct ReimbursementLedger {
    store: Arc<dyn ReimbursementStore>,
}

impl ReimbursementLedger {
    /// Creates a ledger over the given store.
    pub fn new(store: Arc<dyn ReimbursementStore>) -> Self {
        Self { store }
    }

    /// Submits a claim in the pending state.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank description or a non-positive amount.
    pub async fn create_reimbursement(
        &self,
        reimbursement: NewReimbursement,
        now: NaiveDateTime,
    ) -> EngineResult<ReimbursementRequest> {
        reimbursement.validate()?;
        let request = self.store.insert(reimbursement, now).await?;
        info!(
            user_id = %request.user_id,
            reimbursement_id = %request.id,
            amount = request.amount,
            "Reimbursement submitted"
        );
        Ok(request)
    }

    /// Approves a pending claim.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `AlreadyApproved` when already approved.
    pub async fn approve_reimbursement(
        &self,
        id: ReimbursementId,
        approver: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<ReimbursementRequest> {
        match self.store.approve(id, approver, now).await? {
            Transition::Applied(request) => {
                info!(reimbursement_id = %id, approved_by = %approver, "Reimbursement approved");
                Ok(request)
            }
            Transition::AlreadyApplied(_) => Err(EngineError::AlreadyApproved {
                entity: "reimbursement",
                id: id.get(),
            }),
            Transition::Missing => Err(EngineError::not_found("reimbursement", id)),
        }
    }

    /// Looks a claim up by id.
    pub async fn get_reimbursement(&self, id: ReimbursementId) -> EngineResult<ReimbursementRequest> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EngineError::not_found("reimbursement", id))
    }

    /// All of the user's claims, oldest first.
    pub async fn list_by_user(&self, user_id: UserId) -> EngineResult<Vec<ReimbursementRequest>> {
        let mut requests = self.store.list_by_user(user_id).await?;
        requests.sort_by_key(|request| (request.created_at, request.id));
        Ok(requests)
    }

    /// The user's claims created in `start..=end`, oldest first.
    pub async fn list_by_user_in_range(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Vec<ReimbursementRequest>> {
        let mut requests = self
            .store
            .list_by_user_in_range(user_id, start, end)
            .await?;
        requests.sort_by_key(|request| (request.created_at, request.id));
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;

    const ALICE: UserId = UserId::new(2);
    const ADMIN: UserId = UserId::new(1);

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn ledger() -> ReimbursementLedger {
        ReimbursementLedger::new(Arc::new(MemoryStore::new()))
    }

    fn claim(amount: i64) -> NewReimbursement {
        NewReimbursement {
            user_id: ALICE,
            description: "taxi".to_string(),
            amount,
        }
    }

    /// RL-001: approving twice is a conflict
    #[tokio::test]
    async fn test_rl_001_double_approval_conflicts() {
        let ledger = ledger();
        let created = ledger
            .create_reimbursement(claim(75_000), at("2025-06-03", "12:00:00"))
            .await
            .unwrap();
        assert!(!created.is_approved());

        ledger
            .approve_reimbursement(created.id, ADMIN, at("2025-06-04", "09:00:00"))
            .await
            .unwrap();
        let err = ledger
            .approve_reimbursement(created.id, ADMIN, at("2025-06-04", "09:01:00"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::AlreadyApproved {
                entity: "reimbursement",
                ..
            }
        ));

        let stored = ledger.get_reimbursement(created.id).await.unwrap();
        assert_eq!(stored.approval.approved_by(), Some(ADMIN));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let ledger = ledger();
        for amount in [0, -5] {
            let err = ledger
                .create_reimbursement(claim(amount), at("2025-06-03", "12:00:00"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let ledger = ledger();
        let err = ledger
            .approve_reimbursement(ReimbursementId::new(7), ADMIN, at("2025-06-04", "09:00:00"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "reimbursement not found: 7");
    }

    #[tokio::test]
    async fn test_range_listing_uses_created_at() {
        let ledger = ledger();
        for (date, amount) in [("2025-05-31", 1), ("2025-06-15", 2), ("2025-07-01", 3)] {
            ledger
                .create_reimbursement(claim(amount), at(date, "10:00:00"))
                .await
                .unwrap();
        }
        let june = ledger
            .list_by_user_in_range(
                ALICE,
                at("2025-06-01", "00:00:00"),
                at("2025-06-30", "23:59:59"),
            )
            .await
            .unwrap();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].amount, 2);
    }
}
