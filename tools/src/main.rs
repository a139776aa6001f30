//! bonus-runner: headless quarterly incentive calculation.
//!
//! Usage:
//!   bonus-runner --team servicing --quarter Q1 --year 2025 --sheet q1.csv
//!   bonus-runner --team legal --quarter Q4 --year 2024 --sheet legal.csv \
//!                --actuals actuals.json --db bonus.db

use anyhow::{bail, Context, Result};
use bonus_core::{
    import::import_sheet,
    provider::FixtureProvider,
    report::TeamSummary,
    run_batch, BonusStore, IncentivePolicy, PeriodKey, Quarter, TeamKind, TeamRules,
};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(team_arg) = arg_value(&args, "--team") else {
        print_usage();
        bail!("--team is required");
    };
    let Some(quarter_arg) = arg_value(&args, "--quarter") else {
        print_usage();
        bail!("--quarter is required");
    };
    let Some(sheet_path) = arg_value(&args, "--sheet") else {
        print_usage();
        bail!("--sheet is required");
    };
    let year: i32 = arg_value(&args, "--year")
        .unwrap_or("2025")
        .parse()
        .context("--year must be a number")?;
    let db_path = arg_value(&args, "--db").unwrap_or("bonus.db");

    let team = TeamKind::from_str(team_arg)?;
    let quarter = Quarter::from_str(quarter_arg)?;
    let period = PeriodKey::new(team, quarter, year);

    let policy = match arg_value(&args, "--policy") {
        Some(path) => IncentivePolicy::load(path)?,
        None => IncentivePolicy::default(),
    };

    let provider = match arg_value(&args, "--actuals") {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read actuals file {path}"))?;
            FixtureProvider::from_json(&json, quarter, year)?
        }
        None => FixtureProvider::new(),
    };

    println!("bonus-runner");
    println!("  period: {period}");
    println!("  sheet:  {sheet_path}");
    println!("  db:     {db_path}");
    println!();

    let sheet = File::open(sheet_path).with_context(|| format!("cannot open {sheet_path}"))?;
    let inputs = import_sheet(team, sheet, &provider, quarter, year)?;
    log::info!("{period}: imported {} sheet rows", inputs.len());

    let mut store = BonusStore::open(db_path)?;
    store.migrate()?;
    store.seed_teams()?;
    store.replace_target_sheet(&period, &inputs)?;

    let rules = TeamRules::for_team(team, &policy);
    let outcome = run_batch(&rules, &period, &inputs);
    store.replace_period(&period, &outcome.records)?;

    if args.iter().any(|a| a == "--json") {
        print_json_summary(&period, &outcome)?;
    } else {
        print_summary(&period, &outcome);
    }
    Ok(())
}

#[derive(Serialize)]
struct RunReport<'a> {
    period: String,
    records_written: usize,
    failed_rows: Vec<FailedRow<'a>>,
    summary: TeamSummary,
}

#[derive(Serialize)]
struct FailedRow<'a> {
    employee_name: &'a str,
    employee_code: &'a str,
    error: String,
}

fn print_json_summary(period: &PeriodKey, outcome: &bonus_core::BatchOutcome) -> Result<()> {
    let report = RunReport {
        period: period.to_string(),
        records_written: outcome.records.len(),
        failed_rows: outcome
            .failures
            .iter()
            .map(|f| FailedRow {
                employee_name: &f.employee_name,
                employee_code: &f.employee_code,
                error: f.error.to_string(),
            })
            .collect(),
        summary: TeamSummary::build(&outcome.records),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_summary(period: &PeriodKey, outcome: &bonus_core::BatchOutcome) {
    let summary = TeamSummary::build(&outcome.records);

    println!("── {period} ──");
    println!("  records written:   {}", outcome.records.len());
    println!("  failed rows:       {}", outcome.failures.len());
    for failure in &outcome.failures {
        println!(
            "    {} ({}): {}",
            failure.employee_name, failure.employee_code, failure.error
        );
    }
    println!("  avg total %:       {:.2}", summary.avg_total_incentive);
    println!("  avg payable %:     {:.2}", summary.avg_payable_incentive);
    if !summary.top_performers.is_empty() {
        println!("  top performers:");
        for performer in &summary.top_performers {
            println!("    {:<30} {:>8.2}", performer.employee_name, performer.score);
        }
    }
    println!("  distribution:");
    for band in &summary.distribution {
        println!("    {:<10} {}", band.range, band.count);
    }
}

fn arg_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn print_usage() {
    eprintln!(
        "usage: bonus-runner --team <legal|loan|servicing> --quarter <Q1..Q4> \
         --year <YYYY> --sheet <file.csv> [--actuals <file.json>] \
         [--policy <policy.json>] [--db <bonus.db>] [--json]"
    );
}
