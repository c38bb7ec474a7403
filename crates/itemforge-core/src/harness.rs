//! Eval harness: generate, choose, grade, one row per case.
//!
//! A case never aborts the run. Generation failures, agent failures (errors,
//! panics, or ids the item does not carry) and grading failures each become a
//! row with the matching status, and the run always produces a full report.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::AgentError;
use crate::generator::generate_for_case;
use crate::grader::grade_choice;
use crate::hashing::stem_hash;
use crate::model::{ChoiceId, EvalCase, Item};
use crate::report::{EvalReport, ResultRow, RowStatus};
use crate::statistics::RunSummary;
use crate::traits::Agent;

/// Configuration for the eval harness.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Maximum cases in flight at once.
    pub parallelism: usize,
    /// Accuracy the run must reach to pass.
    pub min_accuracy: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            min_accuracy: 1.0,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_case_start(&self, case: &EvalCase);
    fn on_case_complete(&self, row: &ResultRow);
    fn on_run_complete(&self, summary: &RunSummary, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_case_start(&self, _: &EvalCase) {}
    fn on_case_complete(&self, _: &ResultRow) {}
    fn on_run_complete(&self, _: &RunSummary, _: Duration) {}
}

/// Report plus the pass/fail verdict against the threshold.
#[derive(Debug, Clone)]
pub struct EvalOutcome {
    pub passed: bool,
    pub report: EvalReport,
}

/// Run every case sequentially, in order.
pub fn run_eval(cases: &[EvalCase], agent: &dyn Agent, min_accuracy: f64) -> EvalOutcome {
    let start = Instant::now();
    let rows: Vec<ResultRow> = cases.iter().map(|case| run_case(agent, case)).collect();
    let report = build_report(agent.name(), min_accuracy, rows, start.elapsed());
    EvalOutcome {
        passed: report.passed,
        report,
    }
}

/// Concurrent harness. Cases run on blocking worker tasks; rows come back in
/// input order regardless of completion order.
pub struct EvalHarness {
    config: HarnessConfig,
}

impl EvalHarness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn run(
        &self,
        cases: &[EvalCase],
        agent: Arc<dyn Agent>,
        progress: &dyn ProgressReporter,
    ) -> Result<EvalReport> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));

        let mut futures = FuturesUnordered::new();
        for (index, case) in cases.iter().enumerate() {
            let agent = Arc::clone(&agent);
            let semaphore = Arc::clone(&semaphore);
            let case = case.clone();

            futures.push(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
                progress.on_case_start(&case);
                let row = tokio::task::spawn_blocking(move || run_case(agent.as_ref(), &case))
                    .await
                    .map_err(|e| anyhow::anyhow!("case worker failed: {e}"))?;
                Ok::<_, anyhow::Error>((index, row))
            });
        }

        let mut indexed = Vec::with_capacity(cases.len());
        while let Some(result) = futures.next().await {
            let (index, row) = result?;
            progress.on_case_complete(&row);
            indexed.push((index, row));
        }
        indexed.sort_by_key(|(index, _)| *index);
        let rows = indexed.into_iter().map(|(_, row)| row).collect();

        let report = build_report(agent.name(), self.config.min_accuracy, rows, start.elapsed());
        progress.on_run_complete(&report.summary, start.elapsed());
        Ok(report)
    }
}

/// Evaluate one case end to end. Never fails: every outcome is a row.
pub fn run_case(agent: &dyn Agent, case: &EvalCase) -> ResultRow {
    let mut row = ResultRow {
        id: case.id.clone(),
        skill_id: case.skill_id.clone(),
        difficulty: case.difficulty.clone(),
        seed: case.seed,
        status: RowStatus::GenerateError,
        ok: false,
        picked: None,
        solution: None,
        gen_ms: 0.0,
        grade_ms: 0.0,
        stem_hash: None,
        error: None,
    };

    let gen_start = Instant::now();
    let generated = generate_for_case(case);
    row.gen_ms = millis(gen_start.elapsed());

    let item = match generated {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!(case = %case.id, "generation failed: {e}");
            row.error = Some(e.to_string());
            return row;
        }
    };
    row.stem_hash = Some(stem_hash(&item.stem));
    row.solution = Some(item.solution_choice_id);

    let picked = match choose_checked(agent, &item) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(case = %case.id, agent = agent.name(), "agent failed: {e}");
            row.status = RowStatus::AgentError;
            row.error = Some(e.to_string());
            return row;
        }
    };
    row.picked = Some(picked);

    let grade_start = Instant::now();
    let graded = grade_choice(&item, picked);
    row.grade_ms = millis(grade_start.elapsed());

    match graded {
        Ok(result) => {
            row.ok = result.correct;
            row.status = if result.correct {
                RowStatus::Ok
            } else {
                RowStatus::Incorrect
            };
            tracing::debug!(
                case = %case.id,
                picked = %picked,
                solution = %result.solution_choice_id,
                "graded"
            );
        }
        Err(e) => {
            tracing::warn!(case = %case.id, "grading failed: {e}");
            row.status = RowStatus::GradeError;
            row.error = Some(e.to_string());
        }
    }
    row
}

/// Call the agent, converting panics and ids the item lacks into errors.
fn choose_checked(agent: &dyn Agent, item: &Item) -> Result<ChoiceId, AgentError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| agent.choose(item)));
    let picked = match outcome {
        Ok(result) => result?,
        Err(payload) => {
            return Err(AgentError::Internal {
                agent: agent.name().to_string(),
                message: format!("panicked: {}", panic_message(payload.as_ref())),
            })
        }
    };
    if item.choice(picked).is_none() {
        return Err(AgentError::IllegalChoice {
            agent: agent.name().to_string(),
            choice: picked.to_string(),
        });
    }
    Ok(picked)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn build_report(
    agent: &str,
    min_accuracy: f64,
    rows: Vec<ResultRow>,
    elapsed: Duration,
) -> EvalReport {
    let summary = RunSummary::from_rows(&rows);
    // An empty run has accuracy 0 and so fails any positive threshold.
    let passed = summary.accuracy >= min_accuracy;
    tracing::info!(
        agent,
        total = summary.total,
        ok = summary.ok,
        accuracy = summary.accuracy,
        passed,
        "eval complete"
    );
    EvalReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        agent: agent.to_string(),
        min_accuracy,
        passed,
        duration_ms: elapsed.as_millis() as u64,
        summary,
        rows,
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Oracle;

    impl Agent for Oracle {
        fn name(&self) -> &str {
            "oracle"
        }
        fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
            Ok(item.solution_choice_id)
        }
    }

    struct AlwaysA;

    impl Agent for AlwaysA {
        fn name(&self) -> &str {
            "fixed"
        }
        fn choose(&self, _: &Item) -> Result<ChoiceId, AgentError> {
            Ok(ChoiceId::A)
        }
    }

    struct Failing;

    impl Agent for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn choose(&self, _: &Item) -> Result<ChoiceId, AgentError> {
            Err(AgentError::Internal {
                agent: "failing".into(),
                message: "no answer".into(),
            })
        }
    }

    struct Panicking;

    impl Agent for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }
        fn choose(&self, _: &Item) -> Result<ChoiceId, AgentError> {
            panic!("solver blew up")
        }
    }

    fn case(id: &str, skill: &str, difficulty: &str, seed: u64) -> EvalCase {
        EvalCase {
            id: id.into(),
            skill_id: skill.into(),
            difficulty: difficulty.into(),
            seed,
        }
    }

    fn mixed_cases() -> Vec<EvalCase> {
        (0..12)
            .map(|i| {
                let skill = match i % 3 {
                    0 => "quad.graph.vertex",
                    1 => "quad.discriminant",
                    _ => "arith.linear.solve",
                };
                case(&format!("c{i}"), skill, "medium", i)
            })
            .collect()
    }

    #[test]
    fn oracle_scores_everything() {
        let outcome = run_eval(&mixed_cases(), &Oracle, 1.0);
        assert!(outcome.passed);
        assert_eq!(outcome.report.rows.len(), 12);
        assert!(outcome.report.rows.iter().all(|r| r.status == RowStatus::Ok));
        assert!(outcome.report.rows.iter().all(|r| r.stem_hash.is_some()));
    }

    #[test]
    fn generation_failure_is_a_row() {
        let cases = vec![
            case("bad", "unknown.skill", "easy", 1),
            case("good", "quad.discriminant", "easy", 1),
        ];
        let outcome = run_eval(&cases, &Oracle, 0.5);
        assert_eq!(outcome.report.rows[0].status, RowStatus::GenerateError);
        assert!(outcome.report.rows[0].error.is_some());
        assert!(outcome.report.rows[0].stem_hash.is_none());
        assert_eq!(outcome.report.rows[1].status, RowStatus::Ok);
        assert!(outcome.passed);
    }

    #[test]
    fn agent_error_and_panic_are_rows() {
        let cases = vec![case("c1", "quad.discriminant", "easy", 3)];
        let outcome = run_eval(&cases, &Failing, 0.0);
        assert_eq!(outcome.report.rows[0].status, RowStatus::AgentError);

        let outcome = run_eval(&cases, &Panicking, 0.0);
        let row = &outcome.report.rows[0];
        assert_eq!(row.status, RowStatus::AgentError);
        assert!(row.error.as_deref().unwrap_or("").contains("solver blew up"));
    }

    #[test]
    fn incorrect_is_not_an_error() {
        let outcome = run_eval(&mixed_cases(), &AlwaysA, 1.0);
        let summary = &outcome.report.summary;
        assert_eq!(summary.errors(), 0);
        assert_eq!(summary.ok + summary.incorrect, 12);
    }

    #[test]
    fn empty_case_list_fails_positive_threshold() {
        let outcome = run_eval(&[], &Oracle, 0.5);
        assert!(!outcome.passed);
        assert_eq!(outcome.report.summary.accuracy, 0.0);
    }

    struct Recording(Mutex<Vec<String>>);

    impl ProgressReporter for Recording {
        fn on_case_start(&self, _: &EvalCase) {}
        fn on_case_complete(&self, row: &ResultRow) {
            self.0.lock().unwrap().push(row.id.clone());
        }
        fn on_run_complete(&self, _: &RunSummary, _: Duration) {}
    }

    #[tokio::test]
    async fn concurrent_run_preserves_input_order() {
        let cases = mixed_cases();
        let harness = EvalHarness::new(HarnessConfig {
            parallelism: 3,
            min_accuracy: 1.0,
        });
        let progress = Recording(Mutex::new(Vec::new()));
        let report = harness
            .run(&cases, Arc::new(Oracle), &progress)
            .await
            .unwrap();

        let ids: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        assert_eq!(ids, expected);
        assert!(report.passed);
        assert_eq!(progress.0.lock().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn concurrent_matches_sequential() {
        let cases = mixed_cases();
        let sequential = run_eval(&cases, &AlwaysA, 0.0).report;
        let concurrent = EvalHarness::new(HarnessConfig {
            parallelism: 8,
            min_accuracy: 0.0,
        })
        .run(&cases, Arc::new(AlwaysA), &NoopReporter)
        .await
        .unwrap();

        for (a, b) in sequential.rows.iter().zip(&concurrent.rows) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.status, b.status);
            assert_eq!(a.picked, b.picked);
            assert_eq!(a.stem_hash, b.stem_hash);
        }
    }
}
