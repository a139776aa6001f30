//! Actual-metric sourcing.
//!
//! Actual performance figures come from an upstream analytical database
//! that aggregates raw collection and legal-act detail per manager and
//! period. The engine treats that upstream as a `MetricProvider`:
//! a synchronous call returning fully-materialized actuals. The bucket
//! mappings that turn raw detail rows into calculator inputs live here as
//! pure functions so a provider implementation (and the tests) can share
//! them.

use crate::{
    error::EngineResult,
    legal::LegalCategory,
    types::Quarter,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Cash-flow bucket of one collection, derived from its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowType {
    Cf,
    Ssa,
    Legal,
    NonCf,
}

/// Map a raw collection category to its cash-flow bucket. Non-CF is a
/// closed set (plus a missing category); a category outside every set is
/// unbucketed and contributes to no sum.
pub fn cash_flow_type(collection_category: Option<&str>) -> Option<CashFlowType> {
    let Some(category) = collection_category else {
        return Some(CashFlowType::NonCf);
    };
    match category.trim() {
        "Assignment Of Award - Sale Third Party"
        | "Cash In Court Third Party - Sale At Auction"
        | "Cash In Court Third Party - Servicing" => Some(CashFlowType::Ssa),
        "Rent"
        | "Pspa"
        | "Sale Deed"
        | "Workout"
        | "Prepayment Partial"
        | "Prepayment Full"
        | "Loan Sale"
        | "Installment"
        | "Discounted Payoff - Secured"
        | "Discounted Payoff - Unsecured"
        | "Collateral Sale" => Some(CashFlowType::Cf),
        "Cash In Court"
        | "Cash In Court Third Party - Secured"
        | "Cash In Court Third Party - Unsecured" => Some(CashFlowType::Legal),
        "Deed In Lieu" | "Consensual Sale Agreement" => Some(CashFlowType::NonCf),
        _ => None,
    }
}

/// Map a legal-act code to the incentive category it counts toward.
/// Codes outside the tracked set contribute to no category.
pub fn legal_act_category(legal_act_code: &str) -> Option<LegalCategory> {
    match legal_act_code.trim() {
        "Lawsuit Presentation Date" => Some(LegalCategory::Lawsuit),
        "Auction Start Date and Official ID" => Some(LegalCategory::Auction),
        "Assigment of awarding celebrated" => Some(LegalCategory::Cdr),
        "Awarding Title" => Some(LegalCategory::Testimonies),
        "OutCome - Judicial Possession of Keys" => Some(LegalCategory::Possessions),
        "Cash In Court Third Party - Secured" | "Cash In Court Third Party - Unsecured" => {
            Some(LegalCategory::Cic)
        }
        _ => None,
    }
}

/// One raw collection row, as the upstream feed reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDetail {
    pub collection_category: Option<String>,
    pub amount: f64,
}

/// One raw legal-act row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalActDetail {
    pub legal_act_code: String,
    pub act_amount: f64,
}

/// Aggregated servicing actuals for one manager and period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicingActuals {
    /// Sum over CF and SSA buckets.
    pub cash_flow_amount: f64,
    /// Sum over the Non-CF bucket.
    pub ncf_amount: f64,
}

impl ServicingActuals {
    pub fn from_collections(rows: &[CollectionDetail]) -> Self {
        let mut actuals = ServicingActuals::default();
        for row in rows {
            match cash_flow_type(row.collection_category.as_deref()) {
                Some(CashFlowType::Cf) | Some(CashFlowType::Ssa) => {
                    actuals.cash_flow_amount += row.amount
                }
                Some(CashFlowType::NonCf) => actuals.ncf_amount += row.amount,
                // legal collections belong to the legal team's figures;
                // unbucketed categories count toward nothing
                Some(CashFlowType::Legal) | None => {}
            }
        }
        actuals
    }
}

/// Aggregated legal actuals for one manager and period. Lawsuit
/// presentations are an act count; the other categories are currency sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalActuals {
    pub by_category: BTreeMap<LegalCategory, f64>,
}

impl LegalActuals {
    pub fn from_acts(rows: &[LegalActDetail]) -> Self {
        let mut by_category = BTreeMap::new();
        for row in rows {
            let Some(category) = legal_act_category(&row.legal_act_code) else {
                continue;
            };
            let contribution = match category {
                LegalCategory::Lawsuit => 1.0,
                _ => row.act_amount,
            };
            *by_category.entry(category).or_insert(0.0) += contribution;
        }
        Self { by_category }
    }

    pub fn actual(&self, category: LegalCategory) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

/// Upstream source of actual figures. Implementations block on their own
/// I/O and return materialized data; the calculator itself never suspends.
pub trait MetricProvider {
    fn servicing_actuals(
        &self,
        identity: &str,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<Option<ServicingActuals>>;

    fn legal_actuals(
        &self,
        identity: &str,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<Option<LegalActuals>>;
}

type PeriodIdentity = (String, Quarter, i32);

/// In-memory provider backed by pre-aggregated figures. Used by the tests
/// and by the CLI when actuals arrive as a JSON file instead of a live
/// upstream connection.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    servicing: HashMap<PeriodIdentity, ServicingActuals>,
    legal: HashMap<PeriodIdentity, LegalActuals>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_servicing(
        &mut self,
        identity: &str,
        quarter: Quarter,
        year: i32,
        actuals: ServicingActuals,
    ) {
        self.servicing
            .insert((normalize(identity), quarter, year), actuals);
    }

    pub fn insert_legal(
        &mut self,
        identity: &str,
        quarter: Quarter,
        year: i32,
        actuals: LegalActuals,
    ) {
        self.legal
            .insert((normalize(identity), quarter, year), actuals);
    }

    /// Build a single-period fixture from a JSON actuals file of the form
    /// `{"servicing": {"name": {...}}, "legal": {"name": {...}}}`.
    pub fn from_json(json: &str, quarter: Quarter, year: i32) -> EngineResult<Self> {
        #[derive(Deserialize)]
        struct ActualsFile {
            #[serde(default)]
            servicing: HashMap<String, ServicingActuals>,
            #[serde(default)]
            legal: HashMap<String, LegalActuals>,
        }

        let file: ActualsFile = serde_json::from_str(json)?;
        let mut provider = FixtureProvider::new();
        for (identity, actuals) in file.servicing {
            provider.insert_servicing(&identity, quarter, year, actuals);
        }
        for (identity, actuals) in file.legal {
            provider.insert_legal(&identity, quarter, year, actuals);
        }
        Ok(provider)
    }
}

impl MetricProvider for FixtureProvider {
    fn servicing_actuals(
        &self,
        identity: &str,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<Option<ServicingActuals>> {
        Ok(self
            .servicing
            .get(&(normalize(identity), quarter, year))
            .copied())
    }

    fn legal_actuals(
        &self,
        identity: &str,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<Option<LegalActuals>> {
        Ok(self
            .legal
            .get(&(normalize(identity), quarter, year))
            .cloned())
    }
}

fn normalize(identity: &str) -> String {
    identity.trim().to_lowercase()
}
