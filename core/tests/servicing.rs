//! Servicing-team calculation tests.

use bonus_core::config::IncentivePolicy;
use bonus_core::servicing::{NcfIncentive, ServicingInput, ServicingRules};

fn rules() -> ServicingRules {
    ServicingRules::new(&IncentivePolicy::default())
}

fn input(asset_manager: &str, cf_actual: f64, cf_target: f64) -> ServicingInput {
    ServicingInput {
        asset_manager: asset_manager.to_string(),
        employee_code: "EMP001".to_string(),
        category: "Analyst".to_string(),
        team_leader: "Lead".to_string(),
        main_portfolio: "Portfolio A".to_string(),
        quarter_incentive_base: 50_000.0,
        cash_flow_actual: cf_actual,
        cash_flow_target: cf_target,
        ncf_actual: 0.0,
        ncf_target: None,
        data_quality: None,
    }
}

/// The privileged manager qualifies exactly at 60% achievement; a hair
/// below forfeits the whole cash-flow incentive.
#[test]
fn lezama_threshold_is_inclusive_at_60() {
    let at = rules().calculate(&input("lezama", 60.0, 100.0)).unwrap();
    assert_eq!(at.incentive_cf, 60.0);

    let below = rules().calculate(&input("lezama", 59.999, 100.0)).unwrap();
    assert_eq!(below.incentive_cf, 0.0);
}

/// Everyone else needs 80%, inclusive at the boundary.
#[test]
fn default_threshold_is_inclusive_at_80() {
    let at = rules().calculate(&input("anyone", 80.0, 100.0)).unwrap();
    assert_eq!(at.incentive_cf, 80.0);

    let below = rules().calculate(&input("anyone", 79.999, 100.0)).unwrap();
    assert_eq!(below.incentive_cf, 0.0);
}

/// The identity exception matches case-insensitively on the full name.
#[test]
fn threshold_identity_match_is_case_insensitive() {
    for name in ["LEZAMA", "Lezama", "lezama", "  lezama  "] {
        let calc = rules().calculate(&input(name, 65.0, 100.0)).unwrap();
        assert_eq!(calc.incentive_cf, 65.0, "{name} should get the 60% branch");
    }

    // A name merely containing the literal does not qualify.
    let other = rules().calculate(&input("lezama jr", 65.0, 100.0)).unwrap();
    assert_eq!(other.incentive_cf, 0.0);
}

/// An empty identity falls through to the default 80% branch.
#[test]
fn empty_identity_uses_default_threshold() {
    let calc = rules().calculate(&input("", 70.0, 100.0)).unwrap();
    assert_eq!(calc.incentive_cf, 0.0);

    let calc = rules().calculate(&input("", 85.0, 100.0)).unwrap();
    assert_eq!(calc.incentive_cf, 85.0);
}

/// Zero targets are "no target set": 0% achievement, no error.
#[test]
fn zero_targets_resolve_to_zero_percent() {
    let mut i = input("anyone", 0.0, 0.0);
    i.ncf_actual = 500.0;
    i.ncf_target = None;
    let calc = rules().calculate(&i).unwrap();

    assert_eq!(calc.cash_flow_percentage, 0.0);
    assert_eq!(calc.ncf_percentage, 0.0);
    assert_eq!(calc.incentive_cf, 0.0);
    assert_eq!(calc.incentive_ncf, NcfIncentive::NotApplicable);
    assert_eq!(calc.total_incentive, 0.0);
}

/// An absent NCF target yields the Not Applicable sentinel, and the
/// sentinel contributes nothing to the total.
#[test]
fn missing_ncf_target_is_not_applicable() {
    let mut i = input("anyone", 90.0, 100.0);
    i.ncf_actual = 40.0;
    i.ncf_target = None;
    let calc = rules().calculate(&i).unwrap();

    assert!(!calc.ncf_target_present);
    assert_eq!(calc.incentive_ncf, NcfIncentive::NotApplicable);
    assert_eq!(calc.total_incentive, calc.incentive_cf);
}

/// A supplied NCF target of zero is present ("target set, nothing
/// agreed"), which is a zero fraction, not the sentinel.
#[test]
fn zero_ncf_target_is_present_not_sentinel() {
    let mut i = input("anyone", 90.0, 100.0);
    i.ncf_actual = 40.0;
    i.ncf_target = Some(0.0);
    let calc = rules().calculate(&i).unwrap();

    assert!(calc.ncf_target_present);
    assert_eq!(calc.incentive_ncf, NcfIncentive::Fraction(0.0));
}

/// Overachievement on NCF is capped at 1.0: 200% of target still pays
/// out exactly one unit.
#[test]
fn ncf_incentive_caps_at_one() {
    let mut i = input("anyone", 90.0, 100.0);
    i.ncf_actual = 200.0;
    i.ncf_target = Some(100.0);
    let calc = rules().calculate(&i).unwrap();

    assert_eq!(calc.ncf_percentage, 200.0);
    assert_eq!(calc.incentive_ncf, NcfIncentive::Fraction(1.0));
    assert_eq!(calc.total_incentive, 91.0);
}

/// Payable incentive is the 80% interim tranche of the total.
#[test]
fn payable_is_eighty_percent_of_total() {
    let calc = rules().calculate(&input("anyone", 100.0, 100.0)).unwrap();
    assert_eq!(calc.total_incentive, 100.0);
    assert_eq!(calc.payable_incentive, 80.0);
}

/// Data quality defaults to 95 when the caller supplies none.
#[test]
fn data_quality_defaults_to_95() {
    let calc = rules().calculate(&input("anyone", 100.0, 100.0)).unwrap();
    assert_eq!(calc.data_quality, 95.0);

    let mut i = input("anyone", 100.0, 100.0);
    i.data_quality = Some(88.0);
    let calc = rules().calculate(&i).unwrap();
    assert_eq!(calc.data_quality, 88.0);
}

/// Negative figures are data faults, named by field.
#[test]
fn negative_actual_is_a_validation_error() {
    let err = rules()
        .calculate(&input("anyone", -5.0, 100.0))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("cash_flow_actual"), "got: {message}");
    assert!(message.contains("anyone"), "got: {message}");
}

/// A configured override table can move the threshold for any identity;
/// the shipped default still carries the lezama entry.
#[test]
fn threshold_table_is_configurable() {
    let mut policy = IncentivePolicy::default();
    policy
        .cash_flow_thresholds
        .overrides
        .insert("garcia".to_string(), 70.0);
    let rules = ServicingRules::new(&policy);

    let calc = rules.calculate(&input("Garcia", 75.0, 100.0)).unwrap();
    assert_eq!(calc.incentive_cf, 75.0);

    let calc = rules.calculate(&input("lezama", 65.0, 100.0)).unwrap();
    assert_eq!(calc.incentive_cf, 65.0);
}
