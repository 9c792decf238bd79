//! Payslip models.
//!
//! A [`Payslip`] is derived on demand from a rolled payroll period. It is
//! never stored or mutated; every call recomputes it from the ledgers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayrollId, UserId};

/// Pay for one attended calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDetail {
    /// The calendar day.
    pub date: NaiveDate,
    /// Check-in time, or the period end for a day with only a check-out.
    pub checkin_at: NaiveDateTime,
    /// Check-out time, if the employee checked out.
    pub checkout_at: Option<NaiveDateTime>,
    /// Paid duration after clamping.
    pub duration_millis: i64,
    /// `duration_millis` multiplied by the pro-rate.
    pub amount: Decimal,
}

/// The attendance section of a payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipAttendance {
    /// Per-day lines, ascending by date.
    pub details: Vec<AttendanceDetail>,
    /// Sum of paid durations.
    pub total_duration_millis: i64,
    /// Sum of day amounts.
    pub total_amount: Decimal,
}

/// Pay for one approved overtime request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeDetail {
    /// When the overtime was worked.
    pub overtime_at: NaiveDateTime,
    /// What the overtime was for.
    pub description: String,
    /// Approved duration.
    pub duration_millis: i64,
    /// `duration_millis` multiplied by the pro-rate.
    pub amount: Decimal,
    /// When the request was submitted.
    pub created_at: NaiveDateTime,
}

/// The overtime section of a payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipOvertime {
    /// Approved requests only.
    pub details: Vec<OvertimeDetail>,
    /// Sum of approved durations.
    pub total_duration_millis: i64,
    /// Sum of overtime amounts.
    pub total_amount: Decimal,
}

/// One approved reimbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimbursementDetail {
    /// What the expense was.
    pub description: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// When the claim was submitted.
    pub created_at: NaiveDateTime,
}

/// The reimbursement section of a payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipReimburse {
    /// Approved claims only.
    pub details: Vec<ReimbursementDetail>,
    /// Sum of approved amounts.
    pub total_amount: Decimal,
}

/// An employee's payslip for a rolled payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Payslip, PayrollId, PayslipAttendance, PayslipOvertime, PayslipReimburse, UserId};
/// use rust_decimal::Decimal;
///
/// let payslip = Payslip {
///     payroll_id: PayrollId::new(1),
///     user_id: UserId::new(2),
///     salary: 4_500_000,
///     pro_rate: Decimal::ZERO,
///     attendance: PayslipAttendance::default(),
///     overtime: PayslipOvertime::default(),
///     reimburse: PayslipReimburse::default(),
///     take_home_pay: Decimal::ZERO,
/// };
/// assert_eq!(payslip.sum_of_parts(), payslip.take_home_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The rolled period.
    pub payroll_id: PayrollId,
    /// The employee.
    pub user_id: UserId,
    /// Monthly salary in minor currency units.
    pub salary: i64,
    /// Wage per millisecond derived from the salary.
    pub pro_rate: Decimal,
    /// Attendance pay.
    pub attendance: PayslipAttendance,
    /// Approved overtime pay.
    pub overtime: PayslipOvertime,
    /// Approved reimbursements.
    pub reimburse: PayslipReimburse,
    /// Attendance + overtime + reimbursement totals.
    pub take_home_pay: Decimal,
}

impl Payslip {
    /// Sums the three section totals.
    pub fn sum_of_parts(&self) -> Decimal {
        self.attendance.total_amount + self.overtime.total_amount + self.reimburse.total_amount
    }
}

/// One employee's take-home pay in a rolled period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummary {
    /// The rolled period.
    pub payroll_id: PayrollId,
    /// The employee.
    pub user_id: UserId,
    /// The employee's take-home pay.
    pub take_home_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    /// PS-001: take-home equals the sum of the section totals
    #[test]
    fn test_sum_of_parts_adds_sections() {
        let payslip = Payslip {
            payroll_id: PayrollId::new(1),
            user_id: UserId::new(2),
            salary: 4_500_000,
            pro_rate: dec("0.0071"),
            attendance: PayslipAttendance {
                details: vec![],
                total_duration_millis: 28_800_000,
                total_amount: dec("204545.45"),
            },
            overtime: PayslipOvertime {
                details: vec![],
                total_duration_millis: 7_200_000,
                total_amount: dec("51136.36"),
            },
            reimburse: PayslipReimburse {
                details: vec![],
                total_amount: dec("75000"),
            },
            take_home_pay: dec("330681.81"),
        };
        assert_eq!(payslip.sum_of_parts(), dec("330681.81"));
    }

    #[test]
    fn test_attendance_detail_serialization() {
        let detail = AttendanceDetail {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            checkin_at: at(8),
            checkout_at: None,
            duration_millis: 28_800_000,
            amount: dec("204545.45"),
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"date\":\"2025-06-02\""));
        assert!(json.contains("\"checkout_at\":null"));
        assert!(json.contains("\"duration_millis\":28800000"));
        assert!(json.contains("\"amount\":\"204545.45\""));
    }

    #[test]
    fn test_summary_deserialization() {
        let json = r#"{"payroll_id": 3, "user_id": 7, "take_home_pay": "1000.50"}"#;
        let summary: PayslipSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.payroll_id, PayrollId::new(3));
        assert_eq!(summary.take_home_pay, dec("1000.50"));
    }
}
