//! Batch calculation over one team/period.
//!
//! One employee's bad data never sinks the rest of the sheet: failures
//! are collected next to the successes and reported together.

use crate::{
    error::EngineError,
    record::EmployeeIncentiveRecord,
    team::{EmployeeInput, TeamRules},
    types::PeriodKey,
};

/// A failed row: who, and why.
#[derive(Debug)]
pub struct BatchFailure {
    pub employee_name: String,
    pub employee_code: String,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<EmployeeIncentiveRecord>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every employee input through the team's rules.
///
/// Records come out in input order (the reporting layer relies on that
/// for stable tie-breaking). Validation errors are collected per
/// employee; nothing here aborts the batch.
pub fn run_batch(rules: &TeamRules, period: &PeriodKey, inputs: &[EmployeeInput]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for input in inputs {
        match rules.calculate(period, input) {
            Ok(record) => outcome.records.push(record),
            Err(error) => {
                log::warn!(
                    "{period}: skipping '{}' ({}): {error}",
                    input.employee_name(),
                    input.employee_code()
                );
                outcome.failures.push(BatchFailure {
                    employee_name: input.employee_name().to_string(),
                    employee_code: input.employee_code().to_string(),
                    error,
                });
            }
        }
    }

    log::info!(
        "{period}: calculated {} records, {} failures",
        outcome.records.len(),
        outcome.failures.len()
    );

    outcome
}
