//! Aggregation and reporting over one team/period's records.
//!
//! Everything here is total over empty input: no records means zeroes and
//! empty lists, never an error.

use crate::record::{EmployeeIncentiveRecord, MonthlyScore};
use serde::{Deserialize, Serialize};

/// Fixed distribution bands, top-down. The top band is inclusive at both
/// edges; the rest are half-open `[low, high)`. Scores outside 60..=100
/// are not bucketed.
pub const DISTRIBUTION_BANDS: [(f64, f64, &str); 4] = [
    (90.0, 100.0, "90-100%"),
    (80.0, 90.0, "80-89%"),
    (70.0, 80.0, "70-79%"),
    (60.0, 70.0, "60-69%"),
];

pub const TOP_PERFORMER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub employee_name: String,
    pub employee_code: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBand {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: u32,
    pub avg_score: f64,
}

/// Team-level rollup of one period's calculation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub employee_count: usize,
    pub avg_total_incentive: f64,
    pub avg_payable_incentive: f64,
    pub top_performers: Vec<TopPerformer>,
    pub distribution: Vec<DistributionBand>,
}

impl TeamSummary {
    /// Rollup keyed on payable incentive, the score finance looks at.
    pub fn build(records: &[EmployeeIncentiveRecord]) -> Self {
        Self {
            employee_count: records.len(),
            avg_total_incentive: mean_score(records, |r| r.total_incentive),
            avg_payable_incentive: mean_score(records, |r| r.payable_incentive),
            top_performers: top_performers(records, |r| r.payable_incentive),
            distribution: score_distribution(records, |r| r.payable_incentive),
        }
    }
}

/// Arithmetic mean of a numeric score field. Empty input yields 0.
pub fn mean_score<F>(records: &[EmployeeIncentiveRecord], score: F) -> f64
where
    F: Fn(&EmployeeIncentiveRecord) -> f64,
{
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(&score).sum();
    total / records.len() as f64
}

/// Top three employees by the given score field. Ties keep the original
/// input order (stable sort).
pub fn top_performers<F>(records: &[EmployeeIncentiveRecord], score: F) -> Vec<TopPerformer>
where
    F: Fn(&EmployeeIncentiveRecord) -> f64,
{
    let mut ranked: Vec<&EmployeeIncentiveRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
        .into_iter()
        .take(TOP_PERFORMER_COUNT)
        .map(|r| TopPerformer {
            employee_name: r.employee_name.clone(),
            employee_code: r.employee_code.clone(),
            score: score(r),
        })
        .collect()
}

/// Bucket scores into the fixed bands, top band first.
pub fn score_distribution<F>(
    records: &[EmployeeIncentiveRecord],
    score: F,
) -> Vec<DistributionBand>
where
    F: Fn(&EmployeeIncentiveRecord) -> f64,
{
    DISTRIBUTION_BANDS
        .iter()
        .map(|(low, high, label)| {
            let count = records
                .iter()
                .map(&score)
                .filter(|s| {
                    if *high >= 100.0 {
                        *s >= *low && *s <= *high
                    } else {
                        *s >= *low && *s < *high
                    }
                })
                .count();
            DistributionBand {
                range: label.to_string(),
                count,
            }
        })
        .collect()
}

/// Cross-team overview of one quarter, as surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDashboard {
    pub quarter: crate::types::Quarter,
    pub year: i32,
    pub total_teams: i64,
    pub total_records: i64,
    pub team_averages: Vec<TeamAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAverage {
    pub team: String,
    pub employee_count: i64,
    pub avg_payable_incentive: f64,
}

/// Month-over-month average score, in chronological month order. Months
/// with no rows are omitted.
pub fn monthly_trend(scores: &[MonthlyScore]) -> Vec<TrendPoint> {
    let mut months: Vec<u32> = scores.iter().map(|s| s.month).collect();
    months.sort_unstable();
    months.dedup();

    months
        .into_iter()
        .map(|month| {
            let in_month: Vec<f64> = scores
                .iter()
                .filter(|s| s.month == month)
                .map(|s| s.score)
                .collect();
            let avg = in_month.iter().sum::<f64>() / in_month.len() as f64;
            TrendPoint {
                month,
                avg_score: avg,
            }
        })
        .collect()
}
