//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::ledger::{AttendanceLedger, OvertimeLedger, ReimbursementLedger};
use crate::payroll::PayrollEngine;
use crate::store::{AttendanceStore, OvertimeStore, PayrollStore, ReimbursementStore, UserDirectory};

/// Shared application state.
///
/// Holds the ledgers, the payroll engine and the clock that supplies `now`
/// to every time-sensitive operation.
#[derive(Clone)]
pub struct AppState {
    attendance: AttendanceLedger,
    overtime: OvertimeLedger,
    reimbursements: ReimbursementLedger,
    payroll: PayrollEngine,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wires every ledger and the engine over a single store.
    pub fn new<S>(store: S, config: EngineConfig, clock: Arc<dyn Clock>) -> Self
    where
        S: AttendanceStore
            + OvertimeStore
            + ReimbursementStore
            + PayrollStore
            + UserDirectory
            + 'static,
    {
        let store = Arc::new(store);
        let attendance = AttendanceLedger::new(store.clone());
        let overtime = OvertimeLedger::new(
            store.clone(),
            attendance.clone(),
            config.daily_overtime_cap_millis(),
        );
        let reimbursements = ReimbursementLedger::new(store.clone());
        let payroll = PayrollEngine::new(
            store.clone(),
            store,
            attendance.clone(),
            overtime.clone(),
            reimbursements.clone(),
            config,
        );

        Self {
            attendance,
            overtime,
            reimbursements,
            payroll,
            clock,
        }
    }

    /// The attendance ledger.
    pub fn attendance(&self) -> &AttendanceLedger {
        &self.attendance
    }

    /// The overtime ledger.
    pub fn overtime(&self) -> &OvertimeLedger {
        &self.overtime
    }

    /// The reimbursement ledger.
    pub fn reimbursements(&self) -> &ReimbursementLedger {
        &self.reimbursements
    }

    /// The payroll engine.
    pub fn payroll(&self) -> &PayrollEngine {
        &self.payroll
    }

    /// The current local time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::store::MemoryStore;

    #[test]
    fn test_app_state_is_clone() {
        // axum state must be Clone
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_overtime_cap_comes_from_config() {
        let state = AppState::new(
            MemoryStore::new(),
            EngineConfig::default(),
            Arc::new(SystemClock),
        );
        assert_eq!(state.overtime().daily_cap_millis(), 10_800_000);
        assert_eq!(state.payroll().config().days_per_month_prorate(), 22);
    }
}
