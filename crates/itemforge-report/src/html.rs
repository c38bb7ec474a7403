//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use itemforge_core::report::EvalReport;
use itemforge_core::statistics::SkillStats;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an eval report.
pub fn generate_html(report: &EvalReport) -> String {
    let summary = &report.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>itemforge report: {}</title>\n",
        html_escape(&report.agent)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>itemforge report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Agent: <strong>{}</strong> | {} cases | threshold {:.1}% | {}</p>\n",
        html_escape(&report.agent),
        summary.total,
        report.min_accuracy * 100.0,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    let verdict = if report.passed { "pass" } else { "fail" };
    html.push_str(&format!(
        "<p class=\"verdict {verdict}\">{} : accuracy {:.1}% (95% CI {:.1}% to {:.1}%)</p>\n",
        verdict.to_uppercase(),
        summary.accuracy * 100.0,
        summary.accuracy_ci_low * 100.0,
        summary.accuracy_ci_high * 100.0,
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>OK</th><th>Incorrect</th><th>Generate errors</th><th>Agent errors</th><th>Grade errors</th><th>Mean gen</th><th>Mean grade</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.3}ms</td><td>{:.3}ms</td></tr></tbody></table>\n",
        summary.ok,
        summary.incorrect,
        summary.generate_errors,
        summary.agent_errors,
        summary.grade_errors,
        summary.mean_gen_ms,
        summary.mean_grade_ms,
    ));

    if !summary.per_skill.is_empty() {
        html.push_str("<h3>Accuracy by skill</h3>\n");
        html.push_str(&generate_bar_chart(&summary.per_skill));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Case</th><th onclick=\"sortTable(1)\">Skill</th><th onclick=\"sortTable(2)\">Difficulty</th><th onclick=\"sortTable(3)\">Seed</th><th onclick=\"sortTable(4)\">Status</th><th onclick=\"sortTable(5)\">Picked</th><th onclick=\"sortTable(6)\">Solution</th><th>Detail</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.rows {
        let class = if r.ok { "pass" } else { "fail" };
        let id_text = |id: Option<itemforge_core::model::ChoiceId>| {
            id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&r.id),
            html_escape(&r.skill_id),
            html_escape(&r.difficulty),
            r.seed,
            r.status,
            id_text(r.picked),
            id_text(r.solution),
            html_escape(r.error.as_deref().unwrap_or("")),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvalReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(per_skill: &BTreeMap<String, SkillStats>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = per_skill.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (skill, stats)) in per_skill.iter().enumerate() {
        let score = stats.accuracy;
        let y = i * (bar_height + padding) + padding;
        let width = (score * max_width as f64) as usize;

        let color = if score >= 0.8 {
            "#22c55e"
        } else if score >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(skill)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}% ({}/{})</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score * 100.0,
            stats.ok,
            stats.total
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.verdict { font-size: 1.25rem; font-weight: bold; padding: 0.5rem 1rem; border-radius: 8px; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
