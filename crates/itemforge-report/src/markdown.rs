//! Markdown summary of a run, suitable for CI comments.

use itemforge_core::model::ChoiceId;
use itemforge_core::report::EvalReport;

/// Render the run summary, per-skill accuracy, id histograms and failing rows.
pub fn generate_markdown(report: &EvalReport) -> String {
    let s = &report.summary;
    let mut md = String::new();

    md.push_str(&format!("## itemforge run: `{}`\n\n", report.agent));
    md.push_str(&format!(
        "**{}** | accuracy {:.1}% (95% CI {:.1}%-{:.1}%) | threshold {:.1}% | {} cases | {}ms\n\n",
        if report.passed { "PASS" } else { "FAIL" },
        s.accuracy * 100.0,
        s.accuracy_ci_low * 100.0,
        s.accuracy_ci_high * 100.0,
        report.min_accuracy * 100.0,
        s.total,
        report.duration_ms,
    ));

    md.push_str("| ok | incorrect | generate_error | agent_error | grade_error |\n");
    md.push_str("|----|-----------|----------------|-------------|-------------|\n");
    md.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        s.ok, s.incorrect, s.generate_errors, s.agent_errors, s.grade_errors
    ));

    if !s.per_skill.is_empty() {
        md.push_str("### Per skill\n\n");
        md.push_str("| Skill | Cases | OK | Accuracy |\n");
        md.push_str("|-------|-------|----|----------|\n");
        for (skill, stats) in &s.per_skill {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                skill,
                stats.total,
                stats.ok,
                stats.accuracy * 100.0
            ));
        }
        md.push('\n');
    }

    md.push_str("### Choice ids\n\n");
    md.push_str("| Id | Picked | Solution |\n");
    md.push_str("|----|--------|----------|\n");
    for id in ChoiceId::ALL {
        let key = id.as_str();
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            key,
            s.picked_histogram.get(key).copied().unwrap_or(0),
            s.solution_histogram.get(key).copied().unwrap_or(0)
        ));
    }
    md.push('\n');

    let failures: Vec<_> = report.rows.iter().filter(|r| r.status.is_error()).collect();
    if !failures.is_empty() {
        md.push_str("### Errors\n\n");
        md.push_str("| Case | Status | Message |\n");
        md.push_str("|------|--------|---------|\n");
        for row in failures {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                row.id,
                row.status,
                row.error.as_deref().unwrap_or("").replace('|', "\\|")
            ));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemforge_core::report::{ResultRow, RowStatus};
    use itemforge_core::statistics::RunSummary;

    fn row(id: &str, status: RowStatus, error: Option<&str>) -> ResultRow {
        ResultRow {
            id: id.into(),
            skill_id: "quad.discriminant".into(),
            difficulty: "easy".into(),
            seed: 1,
            status,
            ok: status == RowStatus::Ok,
            picked: Some(ChoiceId::A),
            solution: Some(ChoiceId::A),
            gen_ms: 1.0,
            grade_ms: 0.5,
            stem_hash: None,
            error: error.map(String::from),
        }
    }

    fn report(rows: Vec<ResultRow>, passed: bool) -> EvalReport {
        EvalReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            agent: "fixed".into(),
            min_accuracy: 0.5,
            passed,
            duration_ms: 3,
            summary: RunSummary::from_rows(&rows),
            rows,
        }
    }

    #[test]
    fn summary_sections() {
        let md = generate_markdown(&report(
            vec![
                row("c1", RowStatus::Ok, None),
                row("c2", RowStatus::GradeError, Some("bad | item")),
            ],
            true,
        ));
        assert!(md.contains("**PASS**"));
        assert!(md.contains("| quad.discriminant | 2 | 1 | 50.0% |"));
        assert!(md.contains("| A | 2 | 2 |"));
        assert!(md.contains("### Errors"));
        assert!(md.contains("bad \\| item"));
    }

    #[test]
    fn no_error_section_when_clean() {
        let md = generate_markdown(&report(vec![row("c1", RowStatus::Incorrect, None)], false));
        assert!(md.contains("**FAIL**"));
        assert!(!md.contains("### Errors"));
    }
}
