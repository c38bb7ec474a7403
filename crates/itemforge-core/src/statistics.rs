//! Aggregate statistics over result rows.
//!
//! Accuracy comes with a Wilson score interval so small runs are not
//! over-read. Picked/solution histograms make shuffle bias visible: over a
//! diverse pool every id should hold the solution about a quarter of the time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::{ResultRow, RowStatus};

/// z for a two-sided 95% interval.
const Z_95: f64 = 1.959_963_984_540_054;

/// Wilson score interval for `successes` out of `total`.
///
/// Returns `(0.0, 0.0)` for an empty sample.
pub fn wilson_interval(successes: usize, total: usize, z: f64) -> (f64, f64) {
    if total == 0 {
        return (0.0, 0.0);
    }
    let n = total as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z * ((p * (1.0 - p) / n) + z2 / (4.0 * n * n)).sqrt() / denom;
    ((center - half).max(0.0), (center + half).min(1.0))
}

/// Per-skill accuracy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub total: usize,
    pub ok: usize,
    pub accuracy: f64,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub ok: usize,
    pub incorrect: usize,
    pub generate_errors: usize,
    pub agent_errors: usize,
    pub grade_errors: usize,
    /// `ok / total`; zero for an empty run.
    pub accuracy: f64,
    pub accuracy_ci_low: f64,
    pub accuracy_ci_high: f64,
    pub per_skill: BTreeMap<String, SkillStats>,
    /// How often the agent picked each id.
    pub picked_histogram: BTreeMap<String, usize>,
    /// How often each id held the solution.
    pub solution_histogram: BTreeMap<String, usize>,
    pub mean_gen_ms: f64,
    pub mean_grade_ms: f64,
}

impl RunSummary {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let mut summary = RunSummary {
            total: rows.len(),
            ..Default::default()
        };

        let mut gen_total = 0.0;
        let mut grade_total = 0.0;
        let mut graded = 0usize;

        for row in rows {
            match row.status {
                RowStatus::Ok => summary.ok += 1,
                RowStatus::Incorrect => summary.incorrect += 1,
                RowStatus::GenerateError => summary.generate_errors += 1,
                RowStatus::AgentError => summary.agent_errors += 1,
                RowStatus::GradeError => summary.grade_errors += 1,
            }

            let skill = summary.per_skill.entry(row.skill_id.clone()).or_default();
            skill.total += 1;
            if row.ok {
                skill.ok += 1;
            }

            if let Some(picked) = row.picked {
                *summary
                    .picked_histogram
                    .entry(picked.to_string())
                    .or_default() += 1;
            }
            if let Some(solution) = row.solution {
                *summary
                    .solution_histogram
                    .entry(solution.to_string())
                    .or_default() += 1;
            }

            gen_total += row.gen_ms;
            if matches!(row.status, RowStatus::Ok | RowStatus::Incorrect) {
                grade_total += row.grade_ms;
                graded += 1;
            }
        }

        for stats in summary.per_skill.values_mut() {
            stats.accuracy = ratio(stats.ok, stats.total);
        }

        summary.accuracy = ratio(summary.ok, summary.total);
        let (low, high) = wilson_interval(summary.ok, summary.total, Z_95);
        summary.accuracy_ci_low = low;
        summary.accuracy_ci_high = high;
        summary.mean_gen_ms = mean(gen_total, summary.total);
        summary.mean_grade_ms = mean(grade_total, graded);
        summary
    }

    /// Total number of error rows (`incorrect` excluded).
    pub fn errors(&self) -> usize {
        self.generate_errors + self.agent_errors + self.grade_errors
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
