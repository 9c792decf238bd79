//! The payroll engine.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{
    pro_rate_per_millis, summarize_attendance, summarize_overtime, summarize_reimbursements,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger::{AttendanceLedger, OvertimeLedger, ReimbursementLedger};
use crate::models::{NewPayroll, PayrollId, PayrollPeriod, Payslip, PayslipSummary, UserId};
use crate::store::{PayrollStore, Transition, UserDirectory};

/// Creates and rolls payroll periods and computes payslips.
///
/// The engine reads from the ledgers but never writes to them.
#[derive(Clone)]
pub struct PayrollEngine {
    payrolls: Arc<dyn PayrollStore>,
    users: Arc<dyn UserDirectory>,
    attendance: AttendanceLedger,
    overtime: OvertimeLedger,
    reimbursements: ReimbursementLedger,
    config: Arc<EngineConfig>,
}

impl PayrollEngine {
    /// Creates an engine over the given stores and ledgers.
    pub fn new(
        payrolls: Arc<dyn PayrollStore>,
        users: Arc<dyn UserDirectory>,
        attendance: AttendanceLedger,
        overtime: OvertimeLedger,
        reimbursements: ReimbursementLedger,
        config: EngineConfig,
    ) -> Self {
        Self {
            payrolls,
            users,
            attendance,
            overtime,
            reimbursements,
            config: Arc::new(config),
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates a period in the draft state.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty name or when `ended_at` precedes
    /// `started_at`.
    pub async fn create_payroll(
        &self,
        payroll: NewPayroll,
        now: NaiveDateTime,
    ) -> EngineResult<PayrollPeriod> {
        payroll.validate()?;
        let period = self.payrolls.insert(payroll, now).await?;
        info!(
            payroll_id = %period.id,
            name = %period.name,
            started_at = %period.started_at,
            ended_at = %period.ended_at,
            "Payroll period created"
        );
        Ok(period)
    }

    /// All periods, ascending by id.
    pub async fn list_payrolls(&self) -> EngineResult<Vec<PayrollPeriod>> {
        Ok(self.payrolls.list().await?)
    }

    /// Looks a period up by id.
    pub async fn get_payroll(&self, id: PayrollId) -> EngineResult<PayrollPeriod> {
        self.payrolls
            .get(id)
            .await?
            .ok_or_else(|| EngineError::not_found("payroll", id))
    }

    /// Closes a period. Irreversible.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `AlreadyRolled` when already closed.
    pub async fn roll_payroll(
        &self,
        id: PayrollId,
        rolled_by: UserId,
        now: NaiveDateTime,
    ) -> EngineResult<PayrollPeriod> {
        match self.payrolls.roll(id, rolled_by, now).await? {
            Transition::Applied(period) => {
                info!(payroll_id = %id, rolled_by = %rolled_by, "Payroll period rolled");
                Ok(period)
            }
            Transition::AlreadyApplied(_) => Err(EngineError::AlreadyRolled {
                payroll_id: id.get(),
            }),
            Transition::Missing => Err(EngineError::not_found("payroll", id)),
        }
    }

    async fn rolled_period(&self, id: PayrollId) -> EngineResult<PayrollPeriod> {
        let period = self.get_payroll(id).await?;
        if !period.is_rolled() {
            warn!(payroll_id = %id, "Payslip requested for a draft period");
            return Err(EngineError::NotRolled {
                payroll_id: id.get(),
            });
        }
        Ok(period)
    }

    /// Computes a user's payslip for a rolled period.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown period or user.
    /// - `NotRolled` when the period is still a draft.
    /// - `UserInfoMissing` when the user has no monthly salary.
    pub async fn generate_payslip(
        &self,
        payroll_id: PayrollId,
        user_id: UserId,
    ) -> EngineResult<Payslip> {
        let period = self.rolled_period(payroll_id).await?;
        self.payslip_for_period(&period, user_id).await
    }

    async fn payslip_for_period(
        &self,
        period: &PayrollPeriod,
        user_id: UserId,
    ) -> EngineResult<Payslip> {
        let start_time = Instant::now();

        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::not_found("user", user_id))?;
        let salary = user.monthly_salary.ok_or(EngineError::UserInfoMissing {
            user_id: user_id.get(),
        })?;

        let max_working_millis_per_day = self.config.max_working_millis_per_day();
        let pro_rate = pro_rate_per_millis(
            salary,
            self.config.days_per_month_prorate(),
            max_working_millis_per_day,
        )?;

        let (start, end) = (period.started_at, period.ended_at);
        let days = self.attendance.group_by_date(user_id, start, end).await?;
        let overtimes = self
            .overtime
            .list_by_user_in_range(user_id, start, end)
            .await?;
        let claims = self
            .reimbursements
            .list_by_user_in_range(user_id, start, end)
            .await?;

        let attendance = summarize_attendance(&days, end, max_working_millis_per_day, pro_rate);
        let overtime = summarize_overtime(&overtimes, pro_rate);
        let reimburse = summarize_reimbursements(&claims);
        let take_home_pay = attendance.total_amount + overtime.total_amount + reimburse.total_amount;

        debug!(
            payroll_id = %period.id,
            user_id = %user_id,
            attendance_days = attendance.details.len(),
            attendance_amount = %attendance.total_amount,
            overtime_amount = %overtime.total_amount,
            reimburse_amount = %reimburse.total_amount,
            take_home_pay = %take_home_pay,
            duration_us = start_time.elapsed().as_micros(),
            "Payslip computed"
        );

        Ok(Payslip {
            payroll_id: period.id,
            user_id,
            salary,
            pro_rate,
            attendance,
            overtime,
            reimburse,
            take_home_pay,
        })
    }

    /// Take-home pay of every employee in the directory, ascending by id.
    ///
    /// # Errors
    ///
    /// Same as [`generate_payslip`](Self::generate_payslip); the first
    /// failing employee aborts the listing.
    pub async fn payslip_summaries(&self, payroll_id: PayrollId) -> EngineResult<Vec<PayslipSummary>> {
        let period = self.rolled_period(payroll_id).await?;

        let mut employees: Vec<_> = self
            .users
            .list_users()
            .await?
            .into_iter()
            .filter(|user| user.is_employee())
            .collect();
        employees.sort_by_key(|user| user.id);

        let mut summaries = Vec::with_capacity(employees.len());
        for employee in employees {
            let payslip = self.payslip_for_period(&period, employee.id).await?;
            summaries.push(PayslipSummary {
                payroll_id,
                user_id: employee.id,
                take_home_pay: payslip.take_home_pay,
            });
        }
        Ok(summaries)
    }

    /// Sum of every employee's take-home pay in a rolled period.
    pub async fn total_take_home_pay(&self, payroll_id: PayrollId) -> EngineResult<Decimal> {
        let summaries = self.payslip_summaries(payroll_id).await?;
        Ok(summaries.iter().map(|summary| summary.take_home_pay).sum())
    }
}
