//! Result rows, eval reports with JSON persistence, and regression detection.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ChoiceId;
use crate::statistics::RunSummary;

/// Outcome class of one eval case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Ok,
    Incorrect,
    GenerateError,
    AgentError,
    GradeError,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Ok => "ok",
            RowStatus::Incorrect => "incorrect",
            RowStatus::GenerateError => "generate_error",
            RowStatus::AgentError => "agent_error",
            RowStatus::GradeError => "grade_error",
        }
    }

    /// Returns `true` for the three error statuses (`incorrect` is not an error).
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RowStatus::GenerateError | RowStatus::AgentError | RowStatus::GradeError
        )
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the report sink. Exactly one per input case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: String,
    pub skill_id: String,
    pub difficulty: String,
    pub seed: u64,
    pub status: RowStatus,
    pub ok: bool,
    pub picked: Option<ChoiceId>,
    pub solution: Option<ChoiceId>,
    /// Generation wall time in milliseconds.
    pub gen_ms: f64,
    /// Grading wall time in milliseconds.
    pub grade_ms: f64,
    /// Fixed-length fingerprint of the stem; absent when generation failed.
    pub stem_hash: Option<String>,
    pub error: Option<String>,
}

/// A complete eval run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Registry name of the agent that was evaluated.
    pub agent: String,
    /// Threshold the run was judged against.
    pub min_accuracy: f64,
    /// Whether aggregate accuracy met the threshold.
    pub passed: bool,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
    pub summary: RunSummary,
    /// Rows in input-case order.
    pub rows: Vec<ResultRow>,
}

impl EvalReport {
    /// Aggregate accuracy: `ok / total`.
    pub fn accuracy(&self) -> f64 {
        self.summary.accuracy
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvalReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Compare two row sets keyed by case id.
pub fn compare_rows(baseline: &[ResultRow], current: &[ResultRow]) -> RegressionReport {
    let index = |rows: &[ResultRow]| -> BTreeMap<String, ResultRow> {
        rows.iter().map(|r| (r.id.clone(), r.clone())).collect()
    };
    let baseline_rows = index(baseline);
    let current_rows = index(current);

    let mut report = RegressionReport::default();

    for (id, now) in &current_rows {
        let Some(before) = baseline_rows.get(id) else {
            report.new_cases += 1;
            continue;
        };

        // Same request, different stem: generation is no longer reproducible.
        let same_request = before.skill_id == now.skill_id
            && before.difficulty == now.difficulty
            && before.seed == now.seed;
        if same_request {
            if let (Some(old), Some(new)) = (&before.stem_hash, &now.stem_hash) {
                if old != new {
                    report.stem_drift.push(StemDrift {
                        case_id: id.clone(),
                        baseline_hash: old.clone(),
                        current_hash: new.clone(),
                    });
                }
            }
        }

        let change = StatusChange {
            case_id: id.clone(),
            skill_id: now.skill_id.clone(),
            baseline: before.status,
            current: now.status,
        };
        match (before.ok, now.ok) {
            (true, false) => report.regressions.push(change),
            (false, true) => report.improvements.push(change),
            _ => report.unchanged += 1,
        }
    }

    report.removed_cases = baseline_rows
        .keys()
        .filter(|k| !current_rows.contains_key(*k))
        .count();

    report
}

/// Result of comparing two row sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Cases that were ok and no longer are.
    pub regressions: Vec<StatusChange>,
    /// Cases that are now ok.
    pub improvements: Vec<StatusChange>,
    /// Cases whose stem hash changed for the same request.
    pub stem_drift: Vec<StemDrift>,
    /// Cases with no change in correctness.
    pub unchanged: usize,
    /// Cases in current but not baseline.
    pub new_cases: usize,
    /// Cases in baseline but not current.
    pub removed_cases: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub case_id: String,
    pub skill_id: String,
    pub baseline: RowStatus,
    pub current: RowStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StemDrift {
    pub case_id: String,
    pub baseline_hash: String,
    pub current_hash: String,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} stem drifts, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.stem_drift.len(),
            self.unchanged
        ));

        let mut table = |title: &str, rows: &[StatusChange]| {
            if rows.is_empty() {
                return;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Case | Skill | Baseline | Current |\n");
            md.push_str("|------|-------|----------|---------|\n");
            for r in rows {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    r.case_id, r.skill_id, r.baseline, r.current
                ));
            }
            md.push('\n');
        };
        table("Regressions", &self.regressions);
        table("Improvements", &self.improvements);

        if !self.stem_drift.is_empty() {
            md.push_str("### Stem drift\n\n");
            md.push_str("| Case | Baseline hash | Current hash |\n");
            md.push_str("|------|---------------|--------------|\n");
            for d in &self.stem_drift {
                md.push_str(&format!(
                    "| {} | `{}` | `{}` |\n",
                    d.case_id, d.baseline_hash, d.current_hash
                ));
            }
        }

        md
    }

    /// Returns true if there are any regressions or determinism breaks.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty() || !self.stem_drift.is_empty()
    }
}
