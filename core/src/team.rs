//! Team dispatch.
//!
//! The team is resolved from its name exactly once, when inputs are
//! constructed. From there on, behavior is selected by matching a closed
//! enum, with no string comparison inside the calculators.

use crate::{
    config::IncentivePolicy,
    error::{EngineError, EngineResult},
    legal::{LegalInput, LegalRules},
    loan::{LoanInput, LoanRules},
    record::{EmployeeIncentiveRecord, IncentiveBreakdown},
    servicing::{ServicingInput, ServicingRules},
    types::PeriodKey,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamKind {
    Legal,
    Loan,
    Servicing,
}

impl TeamKind {
    pub const ALL: [TeamKind; 3] = [TeamKind::Legal, TeamKind::Loan, TeamKind::Servicing];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamKind::Legal => "Legal",
            TeamKind::Loan => "Loan",
            TeamKind::Servicing => "Servicing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TeamKind::Legal => {
                "Legal team responsible for lawsuit presentations, auctions, and legal processes"
            }
            TeamKind::Loan => "Loan team handling loan management and NPL recovery",
            TeamKind::Servicing => "Servicing team managing cash flow and asset collections",
        }
    }
}

impl fmt::Display for TeamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legal" | "legal team" => Ok(TeamKind::Legal),
            "loan" | "loan team" => Ok(TeamKind::Loan),
            "servicing" | "servicing team" => Ok(TeamKind::Servicing),
            other => Err(EngineError::UnknownTeam(other.to_string())),
        }
    }
}

/// Per-employee calculator input, tagged by team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "team", rename_all = "snake_case")]
pub enum EmployeeInput {
    Servicing(ServicingInput),
    Legal(LegalInput),
    Loan(LoanInput),
}

impl EmployeeInput {
    pub fn team(&self) -> TeamKind {
        match self {
            EmployeeInput::Servicing(_) => TeamKind::Servicing,
            EmployeeInput::Legal(_) => TeamKind::Legal,
            EmployeeInput::Loan(_) => TeamKind::Loan,
        }
    }

    /// Name shown on the sheet; used for error attribution.
    pub fn employee_name(&self) -> &str {
        match self {
            EmployeeInput::Servicing(input) => &input.asset_manager,
            EmployeeInput::Legal(input) => &input.legal_manager,
            EmployeeInput::Loan(input) => &input.loan_manager,
        }
    }

    pub fn employee_code(&self) -> &str {
        match self {
            EmployeeInput::Servicing(input) => &input.employee_code,
            EmployeeInput::Legal(input) => &input.employee_code,
            EmployeeInput::Loan(input) => &input.employee_code,
        }
    }
}

/// The closed set of calculation rule variants, one per team.
pub enum TeamRules {
    Servicing(ServicingRules),
    Legal(LegalRules),
    Loan(LoanRules),
}

impl TeamRules {
    /// Build the rules for `team` from a policy. The policy is cloned into
    /// the variant; the rules own no other state.
    pub fn for_team(team: TeamKind, policy: &IncentivePolicy) -> Self {
        match team {
            TeamKind::Servicing => TeamRules::Servicing(ServicingRules::new(policy)),
            TeamKind::Legal => TeamRules::Legal(LegalRules::new(policy)),
            TeamKind::Loan => TeamRules::Loan(LoanRules::new(policy)),
        }
    }

    pub fn team(&self) -> TeamKind {
        match self {
            TeamRules::Servicing(_) => TeamKind::Servicing,
            TeamRules::Legal(_) => TeamKind::Legal,
            TeamRules::Loan(_) => TeamKind::Loan,
        }
    }

    /// Run one employee through this team's formula.
    ///
    /// Returns a validation error when the input carries a malformed
    /// figure, or when the input's team does not match the rules variant.
    pub fn calculate(
        &self,
        period: &PeriodKey,
        input: &EmployeeInput,
    ) -> EngineResult<EmployeeIncentiveRecord> {
        match (self, input) {
            (TeamRules::Servicing(rules), EmployeeInput::Servicing(input)) => {
                let calc = rules.calculate(input)?;
                Ok(EmployeeIncentiveRecord::new(
                    period.clone(),
                    input.asset_manager.clone(),
                    input.employee_code.clone(),
                    input.category.clone(),
                    input.team_leader.clone(),
                    calc.data_quality,
                    calc.total_incentive,
                    calc.payable_incentive,
                    IncentiveBreakdown::Servicing(calc),
                ))
            }
            (TeamRules::Legal(rules), EmployeeInput::Legal(input)) => {
                let calc = rules.calculate(input)?;
                Ok(EmployeeIncentiveRecord::new(
                    period.clone(),
                    input.legal_manager.clone(),
                    input.employee_code.clone(),
                    input.category.clone(),
                    input.team_leader.clone(),
                    calc.data_quality,
                    calc.total_incentive,
                    calc.payable_incentive,
                    IncentiveBreakdown::Legal(calc),
                ))
            }
            (TeamRules::Loan(rules), EmployeeInput::Loan(input)) => {
                let calc = rules.calculate(input)?;
                // No finished incentive formula exists for the loan team;
                // totals stay at zero until one is configured.
                let total = calc.combined.unwrap_or(0.0);
                let payable = calc.payable_incentive.unwrap_or(0.0);
                Ok(EmployeeIncentiveRecord::new(
                    period.clone(),
                    input.loan_manager.clone(),
                    input.employee_code.clone(),
                    input.category.clone(),
                    input.team_leader.clone(),
                    calc.data_quality,
                    total,
                    payable,
                    IncentiveBreakdown::Loan(calc),
                ))
            }
            (rules, input) => Err(EngineError::validation(
                input.employee_name(),
                "team",
                format!(
                    "input for {} handed to {} rules",
                    input.team(),
                    rules.team()
                ),
            )),
        }
    }
}
