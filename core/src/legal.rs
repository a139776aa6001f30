//! Legal-team incentive calculation.
//!
//! Six fixed act categories, each with an agreed weight. Achievement per
//! category feeds a weighted fulfillment score; the incentive is a fixed
//! fraction of that score, discounted by data quality, with an 80%
//! tranche released at quarter end.

use crate::{
    config::{IncentivePolicy, LegalWeights},
    error::EngineResult,
    metrics::{round2, validate_amount, MetricPair},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed legal category set. Every calculation covers all six; a
/// category the sheet or the provider never mentions contributes 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LegalCategory {
    Lawsuit,
    Auction,
    Cdr,
    Testimonies,
    Possessions,
    Cic,
}

impl LegalCategory {
    pub const ALL: [LegalCategory; 6] = [
        LegalCategory::Lawsuit,
        LegalCategory::Auction,
        LegalCategory::Cdr,
        LegalCategory::Testimonies,
        LegalCategory::Possessions,
        LegalCategory::Cic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegalCategory::Lawsuit => "lawsuit",
            LegalCategory::Auction => "auction",
            LegalCategory::Cdr => "cdr",
            LegalCategory::Testimonies => "testimonies",
            LegalCategory::Possessions => "possessions",
            LegalCategory::Cic => "cic",
        }
    }

}

impl fmt::Display for LegalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalInput {
    pub legal_manager: String,
    pub employee_code: String,
    pub category: String,
    pub team_leader: String,
    pub quarterly_incentive: f64,
    /// Actual/target per legal category. Absent categories count as
    /// zero-target, zero-actual.
    pub metrics: BTreeMap<LegalCategory, MetricPair>,
    pub data_quality: Option<f64>,
}

impl LegalInput {
    /// The pair for one category, defaulting to zeroes when absent so an
    /// incomplete sheet degrades instead of failing.
    pub fn metric(&self, category: LegalCategory) -> MetricPair {
        self.metrics
            .get(&category)
            .copied()
            .unwrap_or(MetricPair::new(0.0, 0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalCategoryResult {
    pub actual: f64,
    pub target: f64,
    pub percentage: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalCalculation {
    pub categories: BTreeMap<LegalCategory, LegalCategoryResult>,
    pub targets_fulfillment: f64,
    pub incentive_percentage: f64,
    pub data_quality: f64,
    pub total_incentive: f64,
    pub payable_incentive: f64,
}

pub struct LegalRules {
    weights: LegalWeights,
    scaling_factor: f64,
    payout_fraction: f64,
    default_data_quality: f64,
}

impl LegalRules {
    pub fn new(policy: &IncentivePolicy) -> Self {
        Self {
            weights: policy.legal_weights.clone(),
            scaling_factor: policy.legal_scaling_factor,
            payout_fraction: policy.payout_fraction,
            default_data_quality: policy.default_data_quality,
        }
    }

    pub fn calculate(&self, input: &LegalInput) -> EngineResult<LegalCalculation> {
        let who = &input.legal_manager;

        // Weighted fulfillment: each weight applies as an independent
        // fractional multiplier, never as a normalized share.
        let mut targets_fulfillment = 0.0;
        let mut categories = BTreeMap::new();
        for category in LegalCategory::ALL {
            let pair = input.metric(category);
            validate_amount(who, category_actual_field(category), pair.actual)?;
            validate_amount(who, category_target_field(category), pair.target)?;

            let percentage = pair.achievement_percentage();
            let weight = self.weights.weight(category);
            targets_fulfillment += percentage * weight / 100.0;

            categories.insert(
                category,
                LegalCategoryResult {
                    actual: pair.actual,
                    target: pair.target,
                    percentage: round2(percentage),
                    weight,
                },
            );
        }

        let incentive_percentage = targets_fulfillment * self.scaling_factor;
        let data_quality = input.data_quality.unwrap_or(self.default_data_quality);
        let total_incentive = incentive_percentage * data_quality / 100.0;
        let payable_incentive = total_incentive * self.payout_fraction;

        Ok(LegalCalculation {
            categories,
            targets_fulfillment: round2(targets_fulfillment),
            incentive_percentage: round2(incentive_percentage),
            data_quality,
            total_incentive: round2(total_incentive),
            payable_incentive: round2(payable_incentive),
        })
    }
}

fn category_actual_field(category: LegalCategory) -> &'static str {
    match category {
        LegalCategory::Lawsuit => "lawsuit_actual",
        LegalCategory::Auction => "auction_actual",
        LegalCategory::Cdr => "cdr_actual",
        LegalCategory::Testimonies => "testimonies_actual",
        LegalCategory::Possessions => "possessions_actual",
        LegalCategory::Cic => "cic_actual",
    }
}

fn category_target_field(category: LegalCategory) -> &'static str {
    match category {
        LegalCategory::Lawsuit => "lawsuit_target",
        LegalCategory::Auction => "auction_target",
        LegalCategory::Cdr => "cdr_target",
        LegalCategory::Testimonies => "testimonies_target",
        LegalCategory::Possessions => "possessions_target",
        LegalCategory::Cic => "cic_target",
    }
}
