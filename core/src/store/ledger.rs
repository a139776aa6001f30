//! The bonus ledger: stored calculation results.
//!
//! Invariant: records for a `(team, quarter, year)` key are replaced
//! wholesale, never appended to. The delete and the inserts run inside a
//! single transaction so concurrent recalculations of the same key can
//! never interleave partial state.

use super::BonusStore;
use crate::{
    error::EngineResult,
    record::{EmployeeIncentiveRecord, IncentiveBreakdown, MonthlyScore},
    team::TeamKind,
    types::{PeriodKey, Quarter},
};
use rusqlite::params;

impl BonusStore {
    /// Replace every stored record under `period` with `records`.
    /// Running the same batch twice leaves the ledger unchanged.
    pub fn replace_period(
        &mut self,
        period: &PeriodKey,
        records: &[EmployeeIncentiveRecord],
    ) -> EngineResult<usize> {
        let calculated_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM incentive_record WHERE team = ?1 AND quarter = ?2 AND year = ?3",
            params![
                period.team.as_str(),
                period.quarter.as_str(),
                period.year
            ],
        )?;

        for record in records {
            tx.execute(
                "INSERT INTO incentive_record (
                    record_id, team, quarter, year, employee_name, employee_code,
                    category, team_leader, data_quality, total_incentive,
                    payable_incentive, breakdown, calculated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    &record.record_id,
                    record.period.team.as_str(),
                    record.period.quarter.as_str(),
                    record.period.year,
                    &record.employee_name,
                    &record.employee_code,
                    &record.category,
                    &record.team_leader,
                    record.data_quality,
                    record.total_incentive,
                    record.payable_incentive,
                    serde_json::to_string(&record.breakdown)?,
                    &calculated_at,
                ],
            )?;
        }

        tx.commit()?;
        log::info!("{period}: ledger replaced with {} records", records.len());
        Ok(records.len())
    }

    pub fn records_for_period(
        &self,
        period: &PeriodKey,
    ) -> EngineResult<Vec<EmployeeIncentiveRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT record_id, employee_name, employee_code, category, team_leader,
                    data_quality, total_incentive, payable_incentive, breakdown
             FROM incentive_record
             WHERE team = ?1 AND quarter = ?2 AND year = ?3
             ORDER BY rowid ASC",
        )?;

        // Breakdown JSON is parsed outside the row mapper so a malformed
        // payload surfaces as a serialization error, not a SQL error.
        let raw_rows = stmt
            .query_map(
                params![
                    period.team.as_str(),
                    period.quarter.as_str(),
                    period.year
                ],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, f64>(5)?,
                        row.get::<_, f64>(6)?,
                        row.get::<_, f64>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(raw_rows.len());
        for (
            record_id,
            employee_name,
            employee_code,
            category,
            team_leader,
            data_quality,
            total_incentive,
            payable_incentive,
            breakdown_json,
        ) in raw_rows
        {
            let breakdown: IncentiveBreakdown = serde_json::from_str(&breakdown_json)?;
            records.push(EmployeeIncentiveRecord {
                record_id,
                period: period.clone(),
                employee_name,
                employee_code,
                category,
                team_leader,
                data_quality,
                total_incentive,
                payable_incentive,
                breakdown,
            });
        }
        Ok(records)
    }

    pub fn record_count_for_period(&self, period: &PeriodKey) -> EngineResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM incentive_record
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

    pub fn total_record_count(&self) -> EngineResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM incentive_record", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Cross-team rollup for one quarter's dashboard.
    pub fn dashboard(
        &self,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<crate::report::PeriodDashboard> {
        let total_teams: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM team", [], |row| row.get(0))?;
        let total_records: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM incentive_record WHERE quarter = ?1 AND year = ?2",
            params![quarter.as_str(), year],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT team, COUNT(*), AVG(payable_incentive)
             FROM incentive_record
             WHERE quarter = ?1 AND year = ?2
             GROUP BY team ORDER BY team ASC",
        )?;
        let team_averages = stmt
            .query_map(params![quarter.as_str(), year], |row| {
                Ok(crate::report::TeamAverage {
                    team: row.get(0)?,
                    employee_count: row.get(1)?,
                    avg_payable_incentive: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(crate::report::PeriodDashboard {
            quarter,
            year,
            total_teams,
            total_records,
            team_averages,
        })
    }

    // ── Monthly scores (trend report) ──────────────────────────

    pub fn insert_monthly_score(&self, team: TeamKind, score: &MonthlyScore) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO monthly_score (team, employee_code, month, year, score)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                team.as_str(),
                &score.employee_code,
                score.month,
                score.year,
                score.score,
            ],
        )?;
        Ok(())
    }

    /// Score rows for the three months of one team's quarter.
    pub fn monthly_scores_for_quarter(
        &self,
        team: TeamKind,
        quarter: Quarter,
        year: i32,
    ) -> EngineResult<Vec<MonthlyScore>> {
        let months = quarter.months();
        let mut stmt = self.conn.prepare(
            "SELECT employee_code, month, year, score FROM monthly_score
             WHERE team = ?1 AND year = ?2 AND month BETWEEN ?3 AND ?4
             ORDER BY month ASC, id ASC",
        )?;
        let rows = stmt.query_map(
            params![team.as_str(), year, months[0], months[2]],
            |row| {
                Ok(MonthlyScore {
                    employee_code: row.get(0)?,
                    month: row.get(1)?,
                    year: row.get(2)?,
                    score: row.get(3)?,
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
