//! Servicing-team incentive calculation.
//!
//! Two metrics: cash flow against target, NCF against an optional target.
//! The cash-flow incentive pays out the full achievement percentage once a
//! minimum threshold is met, and nothing below it. The threshold is keyed
//! by manager identity (see `ThresholdTable`). The NCF incentive is a
//! fraction of target capped at 1.0, or Not Applicable when no NCF target
//! was set for the manager.

use crate::{
    config::{IncentivePolicy, ThresholdTable},
    error::EngineResult,
    metrics::{achievement_percentage, round2, validate_amount},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicingInput {
    pub asset_manager: String,
    pub employee_code: String,
    pub category: String,
    pub team_leader: String,
    pub main_portfolio: String,
    pub quarter_incentive_base: f64,
    pub cash_flow_actual: f64,
    pub cash_flow_target: f64,
    pub ncf_actual: f64,
    /// `None` when the sheet leaves the NCF target blank. Distinct from a
    /// zero target, which counts as "target set, nothing agreed".
    pub ncf_target: Option<f64>,
    /// Completeness/trust of the period's source data, in percent.
    pub data_quality: Option<f64>,
}

/// NCF incentive outcome. A manager without an NCF target is Not
/// Applicable; downstream totals must not treat that as a zero
/// achievement, and it can never be summed by accident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NcfIncentive {
    NotApplicable,
    Fraction(f64),
}

impl NcfIncentive {
    /// The amount this component adds to the total incentive.
    pub fn contribution(&self) -> f64 {
        match self {
            NcfIncentive::NotApplicable => 0.0,
            NcfIncentive::Fraction(f) => *f,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, NcfIncentive::Fraction(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicingCalculation {
    pub cash_flow_percentage: f64,
    pub ncf_percentage: f64,
    pub incentive_cf: f64,
    pub ncf_target_present: bool,
    pub incentive_ncf: NcfIncentive,
    pub data_quality: f64,
    pub total_incentive: f64,
    pub payable_incentive: f64,
}

pub struct ServicingRules {
    thresholds: ThresholdTable,
    ncf_cap: f64,
    payout_fraction: f64,
    default_data_quality: f64,
}

impl ServicingRules {
    pub fn new(policy: &IncentivePolicy) -> Self {
        Self {
            thresholds: policy.cash_flow_thresholds.clone(),
            ncf_cap: policy.ncf_cap,
            payout_fraction: policy.payout_fraction,
            default_data_quality: policy.default_data_quality,
        }
    }

    pub fn calculate(&self, input: &ServicingInput) -> EngineResult<ServicingCalculation> {
        let who = &input.asset_manager;
        validate_amount(who, "cash_flow_actual", input.cash_flow_actual)?;
        validate_amount(who, "cash_flow_target", input.cash_flow_target)?;
        validate_amount(who, "ncf_actual", input.ncf_actual)?;
        if let Some(target) = input.ncf_target {
            validate_amount(who, "ncf_target", target)?;
        }

        let cash_flow_percentage =
            achievement_percentage(input.cash_flow_actual, input.cash_flow_target);
        let ncf_percentage =
            achievement_percentage(input.ncf_actual, input.ncf_target.unwrap_or(0.0));

        // Below threshold the cash-flow incentive is forfeited entirely;
        // at or above it, the full achievement percentage pays out.
        let threshold = self.thresholds.threshold_for(&input.asset_manager);
        let incentive_cf = if cash_flow_percentage >= threshold {
            cash_flow_percentage
        } else {
            0.0
        };

        let ncf_target_present = input.ncf_target.is_some();
        let incentive_ncf = if ncf_target_present {
            if ncf_percentage > 0.0 {
                NcfIncentive::Fraction((ncf_percentage / 100.0).min(self.ncf_cap))
            } else {
                NcfIncentive::Fraction(0.0)
            }
        } else {
            NcfIncentive::NotApplicable
        };

        let data_quality = input.data_quality.unwrap_or(self.default_data_quality);
        let total_incentive = incentive_cf + incentive_ncf.contribution();
        let payable_incentive = total_incentive * self.payout_fraction;

        Ok(ServicingCalculation {
            cash_flow_percentage: round2(cash_flow_percentage),
            ncf_percentage: round2(ncf_percentage),
            incentive_cf: round2(incentive_cf),
            ncf_target_present,
            incentive_ncf: match incentive_ncf {
                NcfIncentive::NotApplicable => NcfIncentive::NotApplicable,
                NcfIncentive::Fraction(f) => NcfIncentive::Fraction(round2(f)),
            },
            data_quality,
            total_incentive: round2(total_incentive),
            payable_incentive: round2(payable_incentive),
        })
    }
}
