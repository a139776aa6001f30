//! Legal-team calculation tests.

use bonus_core::config::IncentivePolicy;
use bonus_core::legal::{LegalCategory, LegalInput, LegalRules};
use bonus_core::metrics::MetricPair;
use std::collections::BTreeMap;

fn rules() -> LegalRules {
    LegalRules::new(&IncentivePolicy::default())
}

fn input_with(metrics: BTreeMap<LegalCategory, MetricPair>) -> LegalInput {
    LegalInput {
        legal_manager: "John Doe".to_string(),
        employee_code: "L001".to_string(),
        category: "Senior Legal".to_string(),
        team_leader: "Jane Smith".to_string(),
        quarterly_incentive: 120_000.0,
        metrics,
        data_quality: None,
    }
}

fn all_at_full_achievement() -> BTreeMap<LegalCategory, MetricPair> {
    LegalCategory::ALL
        .into_iter()
        .map(|c| (c, MetricPair::new(100.0, 100.0)))
        .collect()
}

/// Six categories at exactly 100% with weights {20,25,20,15,10,10}:
/// fulfillment 100, incentive 85, and at 95% data quality a total of
/// 80.75.
#[test]
fn full_achievement_reference_values() {
    let calc = rules().calculate(&input_with(all_at_full_achievement())).unwrap();

    assert_eq!(calc.targets_fulfillment, 100.0);
    assert_eq!(calc.incentive_percentage, 85.0);
    assert_eq!(calc.data_quality, 95.0);
    assert_eq!(calc.total_incentive, 80.75);
    assert!((calc.payable_incentive - 64.6).abs() < 1e-9);
}

/// Each weight applies as an independent fractional multiplier: a single
/// category at 100% contributes exactly its weight.
#[test]
fn single_category_contributes_its_weight() {
    let mut metrics = BTreeMap::new();
    metrics.insert(LegalCategory::Auction, MetricPair::new(50_000.0, 50_000.0));
    let calc = rules().calculate(&input_with(metrics)).unwrap();

    assert_eq!(calc.targets_fulfillment, 25.0);
}

/// A missing category contributes zero; the calculation never fails on
/// an incomplete set, and all six categories appear in the result.
#[test]
fn missing_categories_degrade_gracefully() {
    let calc = rules().calculate(&input_with(BTreeMap::new())).unwrap();

    assert_eq!(calc.targets_fulfillment, 0.0);
    assert_eq!(calc.total_incentive, 0.0);
    assert_eq!(calc.categories.len(), 6);
    for result in calc.categories.values() {
        assert_eq!(result.percentage, 0.0);
    }
}

/// Zero-target categories resolve to 0% achievement, not an error.
#[test]
fn zero_target_category_is_zero_percent() {
    let mut metrics = all_at_full_achievement();
    metrics.insert(LegalCategory::Cdr, MetricPair::new(70_000.0, 0.0));
    let calc = rules().calculate(&input_with(metrics)).unwrap();

    // CDR's 20-point weight drops out of the fulfillment sum.
    assert_eq!(calc.targets_fulfillment, 80.0);
    assert_eq!(calc.categories[&LegalCategory::Cdr].percentage, 0.0);
}

/// Fulfillment is unclamped: overachievement carries through the
/// weighted sum.
#[test]
fn fulfillment_is_not_clamped() {
    let mut metrics = all_at_full_achievement();
    metrics.insert(LegalCategory::Lawsuit, MetricPair::new(100.0, 50.0));
    let calc = rules().calculate(&input_with(metrics)).unwrap();

    // Lawsuit at 200% on a 20 weight adds 40 instead of 20.
    assert_eq!(calc.targets_fulfillment, 120.0);
}

/// A negative target anywhere in the set names the offending field.
#[test]
fn negative_target_is_a_validation_error() {
    let mut metrics = all_at_full_achievement();
    metrics.insert(LegalCategory::Cic, MetricPair::new(10.0, -1.0));
    let err = rules().calculate(&input_with(metrics)).unwrap_err();

    assert!(err.to_string().contains("cic_target"), "got: {err}");
}

/// Supplied data quality discounts the total.
#[test]
fn data_quality_discounts_total() {
    let mut input = input_with(all_at_full_achievement());
    input.data_quality = Some(100.0);
    let calc = rules().calculate(&input).unwrap();

    assert_eq!(calc.total_incentive, 85.0);
    assert_eq!(calc.payable_incentive, 68.0);
}
