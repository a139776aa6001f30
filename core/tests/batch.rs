//! Batch calculation tests: partial failure isolation.

use bonus_core::config::IncentivePolicy;
use bonus_core::servicing::ServicingInput;
use bonus_core::team::{EmployeeInput, TeamKind, TeamRules};
use bonus_core::types::{PeriodKey, Quarter};
use bonus_core::run_batch;

fn servicing_input(name: &str, code: &str, cf_actual: f64) -> EmployeeInput {
    EmployeeInput::Servicing(ServicingInput {
        asset_manager: name.to_string(),
        employee_code: code.to_string(),
        category: "Analyst".to_string(),
        team_leader: "Lead".to_string(),
        main_portfolio: "Portfolio A".to_string(),
        quarter_incentive_base: 50_000.0,
        cash_flow_actual: cf_actual,
        cash_flow_target: 100.0,
        ncf_actual: 0.0,
        ncf_target: None,
        data_quality: None,
    })
}

fn period() -> PeriodKey {
    PeriodKey::new(TeamKind::Servicing, Quarter::Q1, 2025)
}

/// One employee's negative figure yields one reported failure; the four
/// valid records are computed and unaffected.
#[test]
fn one_bad_row_does_not_abort_the_batch() {
    let inputs = vec![
        servicing_input("Manager A", "E1", 90.0),
        servicing_input("Manager B", "E2", 85.0),
        servicing_input("Manager C", "E3", -10.0),
        servicing_input("Manager D", "E4", 95.0),
        servicing_input("Manager E", "E5", 100.0),
    ];

    let rules = TeamRules::for_team(TeamKind::Servicing, &IncentivePolicy::default());
    let outcome = run_batch(&rules, &period(), &inputs);

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.failures.len(), 1);
    assert!(!outcome.is_clean());

    let failure = &outcome.failures[0];
    assert_eq!(failure.employee_name, "Manager C");
    assert_eq!(failure.employee_code, "E3");
    assert!(failure.error.to_string().contains("cash_flow_actual"));

    // The valid records keep their own figures.
    assert_eq!(outcome.records[0].total_incentive, 90.0);
    assert_eq!(outcome.records[3].total_incentive, 100.0);
}

/// Records come out in input order.
#[test]
fn records_preserve_input_order() {
    let inputs = vec![
        servicing_input("Manager B", "E2", 85.0),
        servicing_input("Manager A", "E1", 90.0),
    ];

    let rules = TeamRules::for_team(TeamKind::Servicing, &IncentivePolicy::default());
    let outcome = run_batch(&rules, &period(), &inputs);

    assert_eq!(outcome.records[0].employee_code, "E2");
    assert_eq!(outcome.records[1].employee_code, "E1");
}

/// An empty batch is clean and empty, not an error.
#[test]
fn empty_batch_is_clean() {
    let rules = TeamRules::for_team(TeamKind::Servicing, &IncentivePolicy::default());
    let outcome = run_batch(&rules, &period(), &[]);

    assert!(outcome.records.is_empty());
    assert!(outcome.is_clean());
}

/// Handing a legal input to servicing rules is a per-row failure, not a
/// panic or a batch abort.
#[test]
fn mismatched_team_input_is_a_row_failure() {
    use bonus_core::legal::LegalInput;
    use std::collections::BTreeMap;

    let inputs = vec![
        servicing_input("Manager A", "E1", 90.0),
        EmployeeInput::Legal(LegalInput {
            legal_manager: "Stray".to_string(),
            employee_code: "L9".to_string(),
            category: String::new(),
            team_leader: String::new(),
            quarterly_incentive: 0.0,
            metrics: BTreeMap::new(),
            data_quality: None,
        }),
    ];

    let rules = TeamRules::for_team(TeamKind::Servicing, &IncentivePolicy::default());
    let outcome = run_batch(&rules, &period(), &inputs);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].employee_name, "Stray");
}
