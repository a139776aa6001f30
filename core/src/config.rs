//! Incentive policy configuration.
//!
//! All business constants live here so that none of them are scattered
//! through the calculators: the cash-flow threshold table, the legal
//! category weights, scaling factors, the payout fraction.
//!
//! The built-in `Default` carries the production values. A JSON policy
//! file can override any of them; the loan combined-score weights exist
//! only as a policy entry and are absent by default.

use crate::legal::LegalCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentivePolicy {
    pub cash_flow_thresholds: ThresholdTable,
    pub legal_weights: LegalWeights,
    /// Legal variant: incentive % = targets fulfillment × this factor.
    pub legal_scaling_factor: f64,
    /// Applied when the caller supplies no data-quality figure.
    pub default_data_quality: f64,
    /// Upper bound on the NCF incentive fraction (1.0 = 100% of target).
    pub ncf_cap: f64,
    /// Interim tranche released at quarter end (0.8 = 80%).
    pub payout_fraction: f64,
    /// Combined loan-team score weights. The formula was never agreed with
    /// product; leaving this unset reports the three raw percentages only.
    #[serde(default)]
    pub loan_combined: Option<LoanCombinedPolicy>,
}

impl Default for IncentivePolicy {
    fn default() -> Self {
        Self {
            cash_flow_thresholds: ThresholdTable::default(),
            legal_weights: LegalWeights::default(),
            legal_scaling_factor: 0.85,
            default_data_quality: 95.0,
            ncf_cap: 1.0,
            payout_fraction: 0.8,
            loan_combined: None,
        }
    }
}

impl IncentivePolicy {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read policy file {path}: {e}"))?;
        let policy: IncentivePolicy = serde_json::from_str(&content)?;
        Ok(policy)
    }
}

/// Minimum cash-flow achievement (in percent) below which the cash-flow
/// incentive drops to zero, keyed by manager identity.
///
/// The per-identity overrides encode negotiated exceptions. The production
/// default carries exactly one: "lezama" qualifies from 60% where everyone
/// else needs 80%.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub default: f64,
    pub overrides: HashMap<String, f64>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert("lezama".to_string(), 60.0);
        Self {
            default: 80.0,
            overrides,
        }
    }
}

impl ThresholdTable {
    /// Threshold for one manager. Identities match case-insensitively on
    /// the full trimmed name; an empty identity gets the default.
    pub fn threshold_for(&self, identity: &str) -> f64 {
        let key = identity.trim().to_lowercase();
        self.overrides.get(&key).copied().unwrap_or(self.default)
    }
}

/// Fixed weights for the six legal categories. These sum to 100 in the
/// shipped policy, but the calculator never relies on that: each weight is
/// applied as an independent fractional multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalWeights {
    pub lawsuit: f64,
    pub auction: f64,
    pub cdr: f64,
    pub testimonies: f64,
    pub possessions: f64,
    pub cic: f64,
}

impl Default for LegalWeights {
    fn default() -> Self {
        Self {
            lawsuit: 20.0,
            auction: 25.0,
            cdr: 20.0,
            testimonies: 15.0,
            possessions: 10.0,
            cic: 10.0,
        }
    }
}

impl LegalWeights {
    pub fn weight(&self, category: LegalCategory) -> f64 {
        match category {
            LegalCategory::Lawsuit => self.lawsuit,
            LegalCategory::Auction => self.auction,
            LegalCategory::Cdr => self.cdr,
            LegalCategory::Testimonies => self.testimonies,
            LegalCategory::Possessions => self.possessions,
            LegalCategory::Cic => self.cic,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCombinedPolicy {
    pub loan_weight: f64,
    pub npl_weight: f64,
    pub recovery_weight: f64,
}
