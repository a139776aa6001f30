//! Uploaded target sheets.
//!
//! Targets arrive once per quarter per team. An upload supersedes the
//! prior sheet for the same period, mirroring the ledger's
//! replace-by-period rule, so re-uploading a corrected sheet never leaves
//! stale rows behind.

use super::BonusStore;
use crate::{error::EngineResult, team::EmployeeInput, types::PeriodKey};
use rusqlite::params;

impl BonusStore {
    /// Store the period's imported sheet, replacing any prior upload.
    pub fn replace_target_sheet(
        &mut self,
        period: &PeriodKey,
        inputs: &[EmployeeInput],
    ) -> EngineResult<usize> {
        let uploaded_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM target_sheet WHERE team = ?1 AND quarter = ?2 AND year = ?3",
            params![
                period.team.as_str(),
                period.quarter.as_str(),
                period.year
            ],
        )?;

        for input in inputs {
            tx.execute(
                "INSERT INTO target_sheet (
                    team, quarter, year, employee_name, employee_code, payload, uploaded_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    period.team.as_str(),
                    period.quarter.as_str(),
                    period.year,
                    input.employee_name(),
                    input.employee_code(),
                    serde_json::to_string(input)?,
                    &uploaded_at,
                ],
            )?;
        }

        tx.commit()?;
        Ok(inputs.len())
    }

    /// The period's uploaded inputs, in sheet order.
    pub fn target_sheet(&self, period: &PeriodKey) -> EngineResult<Vec<EmployeeInput>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM target_sheet
             WHERE team = ?1 AND quarter = ?2 AND year = ?3
             ORDER BY id ASC",
        )?;
        let payloads = stmt
            .query_map(
                params![
                    period.team.as_str(),
                    period.quarter.as_str(),
                    period.year
                ],
                |row| row.get::<_, String>(0),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut inputs = Vec::with_capacity(payloads.len());
        for payload in payloads {
            inputs.push(serde_json::from_str(&payload)?);
        }
        Ok(inputs)
    }

    pub fn target_sheet_count(&self, period: &PeriodKey) -> EngineResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM target_sheet
                 WHERE team = ?1 AND quarter = ?2 AND year = ?3",
                params![
                    period.team.as_str(),
                    period.quarter.as_str(),
                    period.year
                ],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
