//! The `itemforge compare` command.

use std::path::PathBuf;

use anyhow::Result;

use itemforge_core::report::compare_rows;
use itemforge_report::read_rows;

use super::{EXIT_FAILED, EXIT_OK};

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<i32> {
    let baseline = read_rows(&baseline_path)?;
    let current = read_rows(&current_path)?;

    let report = compare_rows(&baseline, &current);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged, {} stem drift",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged,
                report.stem_drift.len()
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!("  {} ({}) {} -> {}", r.case_id, r.skill_id, r.baseline, r.current);
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!("  {} ({}) {} -> {}", i.case_id, i.skill_id, i.baseline, i.current);
                }
            }

            if !report.stem_drift.is_empty() {
                println!("\nStem drift:");
                for d in &report.stem_drift {
                    println!("  {} {} -> {}", d.case_id, d.baseline_hash, d.current_hash);
                }
            }

            if report.new_cases > 0 {
                println!("\n{} new case(s)", report.new_cases);
            }
            if report.removed_cases > 0 {
                println!("{} removed case(s)", report.removed_cases);
            }
        }
        other => anyhow::bail!("unknown format: '{other}' (expected text, json or markdown)"),
    }

    if fail_on_regression && report.has_regressions() {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_OK)
}
