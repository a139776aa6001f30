//! Tabular import adapter.
//!
//! Quarterly target sheets arrive as exported CSV, one layout per team,
//! with the column headings finance has always used. The adapter
//! validates the headings up front (naming every missing column), skips
//! rows with no manager or employee number, and turns blank numeric cells
//! into "no value" instead of zero where the distinction matters (the NCF
//! target drives the Not Applicable sentinel).

use crate::{
    error::{EngineError, EngineResult},
    legal::{LegalCategory, LegalInput},
    loan::LoanInput,
    metrics::MetricPair,
    provider::MetricProvider,
    servicing::ServicingInput,
    team::{EmployeeInput, TeamKind},
    types::Quarter,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

pub const SERVICING_REQUIRED_COLUMNS: [&str; 10] = [
    "Asset/Sales Manager",
    "Employee Number",
    "Category",
    "Quarter Incentive Base",
    "Team Leader",
    "Main Portfolio",
    "Cash Flow",
    "Cash Flow Target",
    "NCF",
    "NCF Target",
];

pub const LEGAL_REQUIRED_COLUMNS: [&str; 11] = [
    "Legal Manager",
    "Employee #",
    "Category",
    "Quarterly Incentive",
    "Team Leader",
    "Lawsuit Presentation Target (#)",
    "Auction Target (€)",
    "CDR Target (€)",
    "Testimonies Target (€)",
    "Possessions Target (€)",
    "CIC Target (€)",
];

pub const LOAN_REQUIRED_COLUMNS: [&str; 12] = [
    "Loan Manager",
    "Employee #",
    "Category",
    "Quarter Incentive Base",
    "Team Leader",
    "Portfolio",
    "Loan Amount",
    "Loan Target",
    "NPL Amount",
    "NPL Target",
    "Recovery Rate",
    "Recovery Target",
];

/// Import the sheet for `team`, producing calculator inputs.
///
/// The legal sheet carries targets only; its actuals come from the metric
/// provider. The servicing sheet carries both, with provider figures
/// taking precedence over the uploaded cash-flow columns when the
/// upstream has data for the manager.
pub fn import_sheet<R: Read>(
    team: TeamKind,
    reader: R,
    provider: &dyn MetricProvider,
    quarter: Quarter,
    year: i32,
) -> EngineResult<Vec<EmployeeInput>> {
    let inputs = match team {
        TeamKind::Servicing => import_servicing_sheet(reader, provider, quarter, year)?
            .into_iter()
            .map(EmployeeInput::Servicing)
            .collect(),
        TeamKind::Legal => import_legal_sheet(reader, provider, quarter, year)?
            .into_iter()
            .map(EmployeeInput::Legal)
            .collect(),
        TeamKind::Loan => import_loan_sheet(reader)?
            .into_iter()
            .map(EmployeeInput::Loan)
            .collect(),
    };
    Ok(inputs)
}

#[derive(Debug, Deserialize)]
struct ServicingRow {
    #[serde(rename = "Asset/Sales Manager")]
    asset_manager: Option<String>,
    #[serde(rename = "Employee Number")]
    employee_number: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Quarter Incentive Base")]
    quarter_incentive_base: Option<f64>,
    #[serde(rename = "Team Leader")]
    team_leader: Option<String>,
    #[serde(rename = "Main Portfolio")]
    main_portfolio: Option<String>,
    #[serde(rename = "Cash Flow")]
    cash_flow: Option<f64>,
    #[serde(rename = "Cash Flow Target")]
    cash_flow_target: Option<f64>,
    #[serde(rename = "NCF")]
    ncf: Option<f64>,
    #[serde(rename = "NCF Target")]
    ncf_target: Option<f64>,
}

pub fn import_servicing_sheet<R: Read>(
    reader: R,
    provider: &dyn MetricProvider,
    quarter: Quarter,
    year: i32,
) -> EngineResult<Vec<ServicingInput>> {
    let mut csv_reader = sheet_reader(reader);
    validate_headers(&mut csv_reader, &SERVICING_REQUIRED_COLUMNS)?;

    let mut inputs = Vec::new();
    for row in csv_reader.deserialize::<ServicingRow>() {
        let row = row?;
        let (Some(asset_manager), Some(employee_number)) =
            (non_blank(row.asset_manager), non_blank(row.employee_number))
        else {
            continue; // blank row, as exported sheets often have
        };

        let mut cash_flow_actual = row.cash_flow.unwrap_or(0.0);
        let mut ncf_actual = row.ncf.unwrap_or(0.0);
        if let Some(actuals) = provider.servicing_actuals(&asset_manager, quarter, year)? {
            cash_flow_actual = actuals.cash_flow_amount;
            ncf_actual = actuals.ncf_amount;
        }

        inputs.push(ServicingInput {
            asset_manager,
            employee_code: employee_number,
            category: non_blank(row.category).unwrap_or_default(),
            team_leader: non_blank(row.team_leader).unwrap_or_default(),
            main_portfolio: non_blank(row.main_portfolio).unwrap_or_default(),
            quarter_incentive_base: row.quarter_incentive_base.unwrap_or(0.0),
            cash_flow_actual,
            cash_flow_target: row.cash_flow_target.unwrap_or(0.0),
            ncf_actual,
            ncf_target: row.ncf_target,
            data_quality: None,
        });
    }
    Ok(inputs)
}

#[derive(Debug, Deserialize)]
struct LegalRow {
    #[serde(rename = "Legal Manager")]
    legal_manager: Option<String>,
    #[serde(rename = "Employee #")]
    employee_code: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Quarterly Incentive")]
    quarterly_incentive: Option<f64>,
    #[serde(rename = "Team Leader")]
    team_leader: Option<String>,
    #[serde(rename = "Lawsuit Presentation Target (#)")]
    lawsuit_target: Option<f64>,
    #[serde(rename = "Auction Target (€)")]
    auction_target: Option<f64>,
    #[serde(rename = "CDR Target (€)")]
    cdr_target: Option<f64>,
    #[serde(rename = "Testimonies Target (€)")]
    testimonies_target: Option<f64>,
    #[serde(rename = "Possessions Target (€)")]
    possessions_target: Option<f64>,
    #[serde(rename = "CIC Target (€)")]
    cic_target: Option<f64>,
}

pub fn import_legal_sheet<R: Read>(
    reader: R,
    provider: &dyn MetricProvider,
    quarter: Quarter,
    year: i32,
) -> EngineResult<Vec<LegalInput>> {
    let mut csv_reader = sheet_reader(reader);
    validate_headers(&mut csv_reader, &LEGAL_REQUIRED_COLUMNS)?;

    let mut inputs = Vec::new();
    for row in csv_reader.deserialize::<LegalRow>() {
        let row = row?;
        let (Some(legal_manager), Some(employee_code)) =
            (non_blank(row.legal_manager), non_blank(row.employee_code))
        else {
            continue;
        };

        let actuals = provider
            .legal_actuals(&legal_manager, quarter, year)?
            .unwrap_or_default();

        let targets = [
            (LegalCategory::Lawsuit, row.lawsuit_target),
            (LegalCategory::Auction, row.auction_target),
            (LegalCategory::Cdr, row.cdr_target),
            (LegalCategory::Testimonies, row.testimonies_target),
            (LegalCategory::Possessions, row.possessions_target),
            (LegalCategory::Cic, row.cic_target),
        ];
        let mut metrics = BTreeMap::new();
        for (category, target) in targets {
            metrics.insert(
                category,
                MetricPair::new(actuals.actual(category), target.unwrap_or(0.0)),
            );
        }

        inputs.push(LegalInput {
            legal_manager,
            employee_code,
            category: non_blank(row.category).unwrap_or_default(),
            team_leader: non_blank(row.team_leader).unwrap_or_default(),
            quarterly_incentive: row.quarterly_incentive.unwrap_or(0.0),
            metrics,
            data_quality: None,
        });
    }
    Ok(inputs)
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    #[serde(rename = "Loan Manager")]
    loan_manager: Option<String>,
    #[serde(rename = "Employee #")]
    employee_code: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Quarter Incentive Base")]
    quarter_incentive_base: Option<f64>,
    #[serde(rename = "Team Leader")]
    team_leader: Option<String>,
    #[serde(rename = "Portfolio")]
    portfolio: Option<String>,
    #[serde(rename = "Loan Amount")]
    loan_amount: Option<f64>,
    #[serde(rename = "Loan Target")]
    loan_target: Option<f64>,
    #[serde(rename = "NPL Amount")]
    npl_amount: Option<f64>,
    #[serde(rename = "NPL Target")]
    npl_target: Option<f64>,
    #[serde(rename = "Recovery Rate")]
    recovery_rate: Option<f64>,
    #[serde(rename = "Recovery Target")]
    recovery_target: Option<f64>,
}

pub fn import_loan_sheet<R: Read>(reader: R) -> EngineResult<Vec<LoanInput>> {
    let mut csv_reader = sheet_reader(reader);
    validate_headers(&mut csv_reader, &LOAN_REQUIRED_COLUMNS)?;

    let mut inputs = Vec::new();
    for row in csv_reader.deserialize::<LoanRow>() {
        let row = row?;
        let (Some(loan_manager), Some(employee_code)) =
            (non_blank(row.loan_manager), non_blank(row.employee_code))
        else {
            continue;
        };

        inputs.push(LoanInput {
            loan_manager,
            employee_code,
            category: non_blank(row.category).unwrap_or_default(),
            team_leader: non_blank(row.team_leader).unwrap_or_default(),
            portfolio: non_blank(row.portfolio).unwrap_or_default(),
            quarter_incentive_base: row.quarter_incentive_base.unwrap_or(0.0),
            loan_actual: row.loan_amount.unwrap_or(0.0),
            loan_target: row.loan_target.unwrap_or(0.0),
            npl_actual: row.npl_amount.unwrap_or(0.0),
            npl_target: row.npl_target.unwrap_or(0.0),
            recovery_actual: row.recovery_rate.unwrap_or(0.0),
            recovery_target: row.recovery_target.unwrap_or(0.0),
            data_quality: None,
        });
    }
    Ok(inputs)
}

fn sheet_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn validate_headers<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    required: &[&str],
) -> EngineResult<()> {
    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|required_column| !headers.iter().any(|h| h == **required_column))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingColumns { missing })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
