//! The `itemforge run` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use itemforge_agents::create_agent;
use itemforge_core::config::{check_min_accuracy, load_config_from};
use itemforge_core::harness::{EvalHarness, HarnessConfig, ProgressReporter};
use itemforge_core::parser;
use itemforge_core::statistics::RunSummary;
use itemforge_core::{Agent, EvalCase, EvalReport, ResultRow};
use itemforge_report::{generate_markdown, write_html_report, write_rows};

use super::{EXIT_FAILED, EXIT_OK};

/// Arguments for `itemforge run`, after clap parsing.
pub struct RunArgs {
    pub cases: PathBuf,
    pub out: PathBuf,
    pub agent: Option<String>,
    pub min_accuracy: Option<f64>,
    pub parallelism: Option<usize>,
    pub summary: Option<PathBuf>,
    pub format: String,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

/// Console progress reporter. Per-case lines only in verbose mode.
struct ConsoleReporter {
    verbose: bool,
}

impl ProgressReporter for ConsoleReporter {
    fn on_case_start(&self, case: &EvalCase) {
        if self.verbose {
            eprintln!(
                "  Starting: {} ({} {} seed {})",
                case.id, case.skill_id, case.difficulty, case.seed
            );
        }
    }

    fn on_case_complete(&self, row: &ResultRow) {
        if !self.verbose && !row.status.is_error() {
            return;
        }
        let picked = row.picked.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        match &row.error {
            Some(error) => eprintln!("  {}: {} [{}]: {error}", row.status, row.id, row.skill_id),
            None => eprintln!(
                "  Done: {} [{}] picked {picked} {} ({:.2}ms)",
                row.id, row.skill_id, row.status, row.gen_ms + row.grade_ms
            ),
        }
    }

    fn on_run_complete(&self, summary: &RunSummary, elapsed: Duration) {
        eprintln!(
            "\nComplete: {}/{} correct, {} errors ({:.1}s)",
            summary.ok,
            summary.total,
            summary.errors(),
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(args: RunArgs) -> Result<i32> {
    // Flags beat env, env beats the config file.
    let config = load_config_from(args.config.as_deref())?;
    let agent_name = args.agent.unwrap_or_else(|| config.default_agent.clone());
    let min_accuracy = args.min_accuracy.unwrap_or(config.min_accuracy);
    check_min_accuracy(min_accuracy)?;
    let parallelism = args.parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let formats: Vec<&str> = args.format.split(',').map(str::trim).collect();
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "text" | "markdown" | "html"),
            "unknown format: '{fmt}' (expected text, markdown or html)"
        );
    }

    let cases = parser::load_cases_from(&args.cases)?;
    for warning in parser::validate_cases(&cases) {
        match &warning.case_id {
            Some(id) => tracing::warn!(case = %id, "{}", warning.message),
            None => tracing::warn!("{}", warning.message),
        }
    }

    let agent: Arc<dyn Agent> = Arc::from(create_agent(&agent_name)?);

    eprintln!(
        "itemforge v{}: running {} cases with agent '{}'",
        env!("CARGO_PKG_VERSION"),
        cases.len(),
        agent.name()
    );

    let harness = EvalHarness::new(HarnessConfig {
        parallelism,
        min_accuracy,
    });
    let reporter = ConsoleReporter {
        verbose: args.verbose,
    };
    let report = harness.run(&cases, agent, &reporter).await?;

    write_rows(&args.out, &report.rows)?;
    eprintln!("Results saved to: {}", args.out.display());

    print_summary(&report);

    if let Some(path) = &args.summary {
        report.save_json(path)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    for fmt in &formats {
        match *fmt {
            "markdown" => print!("{}", generate_markdown(&report)),
            "html" => {
                std::fs::create_dir_all(&config.output_dir).with_context(|| {
                    format!("failed to create {}", config.output_dir.display())
                })?;
                let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
                let path = config.output_dir.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {}
        }
    }

    if report.passed {
        Ok(EXIT_OK)
    } else {
        eprintln!(
            "FAIL: accuracy {:.1}% is below the required {:.1}%",
            report.accuracy() * 100.0,
            min_accuracy * 100.0
        );
        Ok(EXIT_FAILED)
    }
}

fn print_summary(report: &EvalReport) {
    use comfy_table::{Cell, Table};

    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec!["Skill", "Cases", "Correct", "Accuracy"]);
    for (skill, stats) in &summary.per_skill {
        table.add_row(vec![
            Cell::new(skill),
            Cell::new(stats.total),
            Cell::new(stats.ok),
            Cell::new(format!("{:.1}%", stats.accuracy * 100.0)),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(summary.total),
        Cell::new(summary.ok),
        Cell::new(format!(
            "{:.1}% (95% CI {:.1}-{:.1}%)",
            summary.accuracy * 100.0,
            summary.accuracy_ci_low * 100.0,
            summary.accuracy_ci_high * 100.0
        )),
    ]);

    eprintln!("\n{table}");
    if summary.errors() > 0 {
        eprintln!(
            "Errors: {} generate, {} agent, {} grade",
            summary.generate_errors, summary.agent_errors, summary.grade_errors
        );
    }
}
