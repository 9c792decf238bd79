//! Overtime and reimbursement pay.
//!
//! Only approved requests count. Pending requests are left out of both the
//! totals and the detail lines.

use rust_decimal::Decimal;

use crate::models::{
    OvertimeDetail, OvertimeRequest, PayslipOvertime, PayslipReimburse, ReimbursementDetail,
    ReimbursementRequest,
};

use super::amount_for_duration;

/// Builds the overtime section of a payslip from approved requests.
///
/// Each approved request pays `duration_millis × rate`. Lines keep the
/// order of `requests`.
pub fn summarize_overtime(requests: &[OvertimeRequest], rate: Decimal) -> PayslipOvertime {
    let details: Vec<OvertimeDetail> = requests
        .iter()
        .filter(|request| request.is_approved())
        .map(|request| OvertimeDetail {
            overtime_at: request.overtime_at,
            description: request.description.clone(),
            duration_millis: request.duration_millis,
            amount: amount_for_duration(request.duration_millis, rate),
            created_at: request.created_at,
        })
        .collect();

    let total_duration_millis = details.iter().map(|d| d.duration_millis).sum();
    let total_amount = details.iter().map(|d| d.amount).sum();

    PayslipOvertime {
        details,
        total_duration_millis,
        total_amount,
    }
}

/// Builds the reimbursement section of a payslip from approved claims.
pub fn summarize_reimbursements(requests: &[ReimbursementRequest]) -> PayslipReimburse {
    let details: Vec<ReimbursementDetail> = requests
        .iter()
        .filter(|request| request.is_approved())
        .map(|request| ReimbursementDetail {
            description: request.description.clone(),
            amount: request.amount,
            created_at: request.created_at,
        })
        .collect();

    let total_amount = details.iter().map(|d| Decimal::from(d.amount)).sum();

    PayslipReimburse {
        details,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::pro_rate_per_millis;
    use crate::models::{Approval, OvertimeId, ReimbursementId, UserId};
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    const HOUR: i64 = 60 * 60 * 1000;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 4)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn approved() -> Approval {
        Approval::Approved {
            by: UserId::new(1),
            at: at(22),
        }
    }

    fn overtime(id: u64, duration_millis: i64, approval: Approval) -> OvertimeRequest {
        OvertimeRequest {
            id: OvertimeId::new(id),
            user_id: UserId::new(2),
            description: format!("overtime {}", id),
            overtime_at: at(19),
            duration_millis,
            approval,
            created_at: at(21),
        }
    }

    fn claim(id: u64, amount: i64, approval: Approval) -> ReimbursementRequest {
        ReimbursementRequest {
            id: ReimbursementId::new(id),
            user_id: UserId::new(2),
            description: format!("claim {}", id),
            amount,
            approval,
            created_at: at(12),
        }
    }

    fn rate() -> Decimal {
        pro_rate_per_millis(4_500_000, 22, 8 * HOUR).unwrap()
    }

    /// RP-001: pending overtime is excluded from details and totals
    #[test]
    fn test_rp_001_only_approved_overtime_counts() {
        let requests = vec![
            overtime(1, 2 * HOUR, approved()),
            overtime(2, HOUR, Approval::Pending),
        ];
        let section = summarize_overtime(&requests, rate());

        assert_eq!(section.details.len(), 1);
        assert_eq!(section.details[0].description, "overtime 1");
        assert_eq!(section.total_duration_millis, 2 * HOUR);
        assert_eq!(
            section.total_amount,
            amount_for_duration(2 * HOUR, rate())
        );
    }

    /// RP-002: pending reimbursements are excluded
    #[test]
    fn test_rp_002_only_approved_reimbursements_count() {
        let claims = vec![
            claim(1, 75_000, approved()),
            claim(2, 20_000, Approval::Pending),
            claim(3, 5_000, approved()),
        ];
        let section = summarize_reimbursements(&claims);

        assert_eq!(section.details.len(), 2);
        assert_eq!(section.total_amount, Decimal::from(80_000));
    }

    #[test]
    fn test_overtime_detail_carries_request_fields() {
        let section = summarize_overtime(&[overtime(7, HOUR, approved())], rate());
        let detail = &section.details[0];
        assert_eq!(detail.overtime_at, at(19));
        assert_eq!(detail.created_at, at(21));
        assert_eq!(detail.duration_millis, HOUR);
    }

    #[test]
    fn test_no_requests_is_zero() {
        assert_eq!(summarize_overtime(&[], rate()).total_amount, Decimal::ZERO);
        assert_eq!(summarize_reimbursements(&[]).total_amount, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_reimbursement_total_is_sum_of_approved(
            claims in proptest::collection::vec((1i64..10_000_000, any::<bool>()), 0..20)
        ) {
            let requests: Vec<_> = claims
                .iter()
                .enumerate()
                .map(|(i, (amount, is_approved))| {
                    let approval = if *is_approved { approved() } else { Approval::Pending };
                    claim(i as u64, *amount, approval)
                })
                .collect();

            let expected: i64 = claims.iter().filter(|(_, ok)| *ok).map(|(amount, _)| amount).sum();
            let section = summarize_reimbursements(&requests);
            prop_assert_eq!(section.total_amount, Decimal::from(expected));
            prop_assert_eq!(section.details.len(), claims.iter().filter(|(_, ok)| *ok).count());
        }
    }
}
