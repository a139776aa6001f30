//! Loan-team metrics.
//!
//! Three independent achievement percentages: loan amount, NPL amount and
//! recovery rate against their targets. Product never signed off a
//! combined incentive formula for this team, so none is invented here:
//! the combined score stays `None` unless the policy file configures
//! `loan_combined` weights.

use crate::{
    config::{IncentivePolicy, LoanCombinedPolicy},
    error::EngineResult,
    metrics::{achievement_percentage, round2, validate_amount},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub loan_manager: String,
    pub employee_code: String,
    pub category: String,
    pub team_leader: String,
    pub portfolio: String,
    pub quarter_incentive_base: f64,
    pub loan_actual: f64,
    pub loan_target: f64,
    pub npl_actual: f64,
    pub npl_target: f64,
    pub recovery_actual: f64,
    pub recovery_target: f64,
    pub data_quality: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanMetrics {
    pub loan_percentage: f64,
    pub npl_percentage: f64,
    pub recovery_percentage: f64,
    /// `None` until a combined formula is configured; reported to finance
    /// as "not yet defined", never as zero achievement.
    pub combined: Option<f64>,
    pub payable_incentive: Option<f64>,
    pub data_quality: f64,
}

pub struct LoanRules {
    combined: Option<LoanCombinedPolicy>,
    payout_fraction: f64,
    default_data_quality: f64,
}

impl LoanRules {
    pub fn new(policy: &IncentivePolicy) -> Self {
        Self {
            combined: policy.loan_combined.clone(),
            payout_fraction: policy.payout_fraction,
            default_data_quality: policy.default_data_quality,
        }
    }

    pub fn calculate(&self, input: &LoanInput) -> EngineResult<LoanMetrics> {
        let who = &input.loan_manager;
        validate_amount(who, "loan_actual", input.loan_actual)?;
        validate_amount(who, "loan_target", input.loan_target)?;
        validate_amount(who, "npl_actual", input.npl_actual)?;
        validate_amount(who, "npl_target", input.npl_target)?;
        validate_amount(who, "recovery_actual", input.recovery_actual)?;
        validate_amount(who, "recovery_target", input.recovery_target)?;

        let loan_percentage = achievement_percentage(input.loan_actual, input.loan_target);
        let npl_percentage = achievement_percentage(input.npl_actual, input.npl_target);
        let recovery_percentage =
            achievement_percentage(input.recovery_actual, input.recovery_target);

        let combined = self.combined.as_ref().map(|weights| {
            loan_percentage * weights.loan_weight / 100.0
                + npl_percentage * weights.npl_weight / 100.0
                + recovery_percentage * weights.recovery_weight / 100.0
        });
        let payable_incentive = combined.map(|c| round2(c * self.payout_fraction));

        Ok(LoanMetrics {
            loan_percentage: round2(loan_percentage),
            npl_percentage: round2(npl_percentage),
            recovery_percentage: round2(recovery_percentage),
            combined: combined.map(round2),
            payable_incentive,
            data_quality: input.data_quality.unwrap_or(self.default_data_quality),
        })
    }
}
