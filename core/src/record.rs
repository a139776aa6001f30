//! The per-employee calculation record persisted to the bonus ledger.

use crate::{
    legal::LegalCalculation,
    loan::LoanMetrics,
    servicing::ServicingCalculation,
    types::PeriodKey,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Team-specific calculation detail, carried alongside the common fields
/// and stored as a JSON payload column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "team", rename_all = "snake_case")]
pub enum IncentiveBreakdown {
    Servicing(ServicingCalculation),
    Legal(LegalCalculation),
    Loan(LoanMetrics),
}

/// One employee's incentive outcome for one period. Created fresh on every
/// calculation run; a rerun for the same period replaces prior records
/// wholesale (see `BonusStore::replace_period`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeIncentiveRecord {
    pub record_id: String,
    pub period: PeriodKey,
    pub employee_name: String,
    pub employee_code: String,
    pub category: String,
    pub team_leader: String,
    pub data_quality: f64,
    /// Final incentive percentage before the interim-payout fraction.
    pub total_incentive: f64,
    /// The number surfaced to finance: total × payout fraction.
    pub payable_incentive: f64,
    pub breakdown: IncentiveBreakdown,
}

impl EmployeeIncentiveRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        period: PeriodKey,
        employee_name: String,
        employee_code: String,
        category: String,
        team_leader: String,
        data_quality: f64,
        total_incentive: f64,
        payable_incentive: f64,
        breakdown: IncentiveBreakdown,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            period,
            employee_name,
            employee_code,
            category,
            team_leader,
            data_quality,
            total_incentive,
            payable_incentive,
            breakdown,
        }
    }
}

/// One monthly score row for an employee, feeding the quarter trend
/// report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyScore {
    pub employee_code: String,
    pub month: u32,
    pub year: i32,
    pub score: f64,
}
