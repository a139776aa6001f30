//! Aggregation and reporting tests.

use bonus_core::record::{EmployeeIncentiveRecord, IncentiveBreakdown, MonthlyScore};
use bonus_core::report::{
    mean_score, monthly_trend, score_distribution, top_performers, TeamSummary,
};
use bonus_core::servicing::{NcfIncentive, ServicingCalculation};
use bonus_core::types::{PeriodKey, Quarter};
use bonus_core::TeamKind;

fn record(name: &str, code: &str, payable: f64) -> EmployeeIncentiveRecord {
    EmployeeIncentiveRecord::new(
        PeriodKey::new(TeamKind::Servicing, Quarter::Q1, 2025),
        name.to_string(),
        code.to_string(),
        "Analyst".to_string(),
        "Lead".to_string(),
        95.0,
        payable / 0.8,
        payable,
        IncentiveBreakdown::Servicing(ServicingCalculation {
            cash_flow_percentage: 0.0,
            ncf_percentage: 0.0,
            incentive_cf: 0.0,
            ncf_target_present: false,
            incentive_ncf: NcfIncentive::NotApplicable,
            data_quality: 95.0,
            total_incentive: payable / 0.8,
            payable_incentive: payable,
        }),
    )
}

/// Mean over an empty set is zero, not an error.
#[test]
fn mean_of_empty_is_zero() {
    assert_eq!(mean_score(&[], |r| r.payable_incentive), 0.0);
}

#[test]
fn mean_is_arithmetic() {
    let records = vec![
        record("A", "E1", 80.0),
        record("B", "E2", 90.0),
        record("C", "E3", 100.0),
    ];
    assert_eq!(mean_score(&records, |r| r.payable_incentive), 90.0);
}

/// Top three by score, descending.
#[test]
fn top_performers_are_ranked() {
    let records = vec![
        record("A", "E1", 70.0),
        record("B", "E2", 95.0),
        record("C", "E3", 85.0),
        record("D", "E4", 90.0),
    ];
    let top = top_performers(&records, |r| r.payable_incentive);

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].employee_name, "B");
    assert_eq!(top[1].employee_name, "D");
    assert_eq!(top[2].employee_name, "C");
}

/// Ties keep original input order.
#[test]
fn top_performer_ties_are_stable() {
    let records = vec![
        record("First", "E1", 90.0),
        record("Second", "E2", 90.0),
        record("Third", "E3", 90.0),
        record("Fourth", "E4", 90.0),
    ];
    let top = top_performers(&records, |r| r.payable_incentive);

    assert_eq!(top[0].employee_name, "First");
    assert_eq!(top[1].employee_name, "Second");
    assert_eq!(top[2].employee_name, "Third");
}

/// Fewer than three records yields fewer than three performers.
#[test]
fn top_performers_of_small_input() {
    let records = vec![record("A", "E1", 70.0)];
    let top = top_performers(&records, |r| r.payable_incentive);
    assert_eq!(top.len(), 1);

    assert!(top_performers(&[], |r| r.payable_incentive).is_empty());
}

/// Band edges: 90 goes to the top band, 89.99 to the next; the top band
/// includes 100 itself.
#[test]
fn distribution_band_edges() {
    let records = vec![
        record("A", "E1", 100.0),
        record("B", "E2", 90.0),
        record("C", "E3", 89.99),
        record("D", "E4", 80.0),
        record("E", "E5", 70.0),
        record("F", "E6", 60.0),
        record("G", "E7", 59.0), // below every band
    ];
    let bands = score_distribution(&records, |r| r.payable_incentive);

    assert_eq!(bands[0].range, "90-100%");
    assert_eq!(bands[0].count, 2);
    assert_eq!(bands[1].count, 2);
    assert_eq!(bands[2].count, 1);
    assert_eq!(bands[3].count, 1);
}

/// Empty input yields all-zero bands, not an error.
#[test]
fn distribution_of_empty_input() {
    let bands = score_distribution(&[], |r| r.payable_incentive);
    assert_eq!(bands.len(), 4);
    assert!(bands.iter().all(|b| b.count == 0));
}

/// Month-over-month averages in chronological order.
#[test]
fn trend_is_chronological_monthly_average() {
    let scores = vec![
        MonthlyScore { employee_code: "E1".into(), month: 11, year: 2024, score: 88.0 },
        MonthlyScore { employee_code: "E1".into(), month: 10, year: 2024, score: 84.0 },
        MonthlyScore { employee_code: "E2".into(), month: 10, year: 2024, score: 86.0 },
        MonthlyScore { employee_code: "E2".into(), month: 12, year: 2024, score: 91.0 },
    ];
    let trend = monthly_trend(&scores);

    assert_eq!(trend.len(), 3);
    assert_eq!(trend[0].month, 10);
    assert_eq!(trend[0].avg_score, 85.0);
    assert_eq!(trend[1].month, 11);
    assert_eq!(trend[2].month, 12);
}

#[test]
fn trend_of_empty_input_is_empty() {
    assert!(monthly_trend(&[]).is_empty());
}

/// The full team summary over empty input is zeroes and empty lists.
#[test]
fn summary_of_empty_period() {
    let summary = TeamSummary::build(&[]);
    assert_eq!(summary.employee_count, 0);
    assert_eq!(summary.avg_payable_incentive, 0.0);
    assert!(summary.top_performers.is_empty());
    assert!(summary.distribution.iter().all(|b| b.count == 0));
}
