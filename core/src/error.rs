use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sheet parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid metric for '{employee}': field '{field}' {reason}")]
    Validation {
        employee: String,
        field: &'static str,
        reason: String,
    },

    #[error("Sheet is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Unknown team '{0}' (expected Legal, Loan or Servicing)")]
    UnknownTeam(String),

    #[error("Invalid quarter '{0}' (expected Q1..Q4)")]
    InvalidQuarter(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Validation failure for one employee's field. Batch callers collect
    /// these instead of aborting (see `batch::run_batch`).
    pub fn validation(
        employee: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::Validation {
            employee: employee.into(),
            field,
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
