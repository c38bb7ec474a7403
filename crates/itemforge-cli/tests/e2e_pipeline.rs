//! End-to-end pipeline tests: case file in, JSONL rows and exit code out.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use itemforge_core::{Difficulty, EvalReport, RowStatus};
use itemforge_report::read_rows;

fn itemforge(cwd: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("itemforge").unwrap();
    cmd.current_dir(cwd)
        .env_remove("ITEMFORGE_AGENT")
        .env_remove("ITEMFORGE_MIN_ACCURACY");
    cmd
}

fn smoke_cases() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../cases/smoke.jsonl")
}

/// Many parameterized cases across the quadratic skills.
fn write_large_pool(path: &Path) {
    let skills = [
        "quad.graph.vertex",
        "quad.solve.factoring",
        "quad.solve.formula",
        "quad.discriminant",
    ];
    let mut lines = String::new();
    for skill in skills {
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..50 {
                lines.push_str(&format!(
                    "{{\"id\": \"{skill}-{difficulty}-{seed}\", \"skill_id\": \"{skill}\", \"difficulty\": \"{difficulty}\", \"seed\": {seed}}}\n"
                ));
            }
        }
    }
    std::fs::write(path, lines).unwrap();
}

#[test]
fn oracle_passes_smoke_set() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.jsonl");

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .arg("--out")
        .arg(&out)
        .args(["--agent", "oracle", "--min-accuracy", "1.0"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("6/6 correct"));

    let rows = read_rows(&out).unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.ok && r.status == RowStatus::Ok));
    assert_eq!(rows[0].id, "smoke-vertex-easy");
    assert_eq!(rows[5].id, "smoke-linear");
}

#[test]
fn fixed_choice_lands_near_chance() {
    let dir = TempDir::new().unwrap();
    let cases = dir.path().join("pool.jsonl");
    let out = dir.path().join("out.jsonl");
    write_large_pool(&cases);

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(&cases)
        .arg("--out")
        .arg(&out)
        .args(["--agent", "fixed", "--min-accuracy", "0.5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("below the required"));

    let rows = read_rows(&out).unwrap();
    assert_eq!(rows.len(), 400);
    assert!(rows.iter().all(|r| !r.status.is_error()));
    let accuracy = rows.iter().filter(|r| r.ok).count() as f64 / rows.len() as f64;
    assert!((0.17..=0.33).contains(&accuracy), "accuracy {accuracy}");
}

#[test]
fn router_passes_quadratic_skills() {
    let dir = TempDir::new().unwrap();
    let cases = dir.path().join("pool.jsonl");
    let out = dir.path().join("out.jsonl");
    write_large_pool(&cases);

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(&cases)
        .arg("--out")
        .arg(&out)
        .args(["--agent", "router", "--min-accuracy", "1.0", "--parallelism", "8"])
        .assert()
        .code(0);
}

#[test]
fn summary_and_markdown_outputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.jsonl");
    let summary = dir.path().join("summary.json");

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .arg("--out")
        .arg(&out)
        .arg("--summary")
        .arg(&summary)
        .args(["--format", "markdown"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("quad.discriminant"));

    let report = EvalReport::load_json(&summary).unwrap();
    assert_eq!(report.agent, "oracle");
    assert_eq!(report.summary.total, 6);
    assert_eq!(report.rows.len(), 6);
    assert!(report.passed);
}

#[test]
fn html_report_lands_in_output_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("itemforge.toml"),
        "output_dir = \"reports\"\n",
    )
    .unwrap();

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .args(["--out", "out.jsonl", "--format", "html"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("HTML report"));

    let html: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    assert_eq!(html.len(), 1);
}

#[test]
fn config_and_env_pick_the_agent() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("itemforge.toml"),
        "default_agent = \"fixed:B\"\nmin_accuracy = 0.0\n",
    )
    .unwrap();

    // Config alone: fixed:B with no threshold passes.
    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .args(["--out", "config.jsonl"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("agent 'fixed:B'"));

    // Env beats the file, and the flag beats env.
    itemforge(dir.path())
        .env("ITEMFORGE_AGENT", "oracle")
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .args(["--out", "env.jsonl"])
        .assert()
        .stderr(predicate::str::contains("agent 'oracle'"));

    itemforge(dir.path())
        .env("ITEMFORGE_AGENT", "oracle")
        .arg("run")
        .arg("--cases")
        .arg(smoke_cases())
        .args(["--out", "flag.jsonl", "--agent", "random"])
        .assert()
        .stderr(predicate::str::contains("agent 'random'"));
}

#[test]
fn bad_cases_become_rows_not_failures() {
    let dir = TempDir::new().unwrap();
    let cases = dir.path().join("mixed.jsonl");
    let out = dir.path().join("out.jsonl");
    std::fs::write(
        &cases,
        concat!(
            r#"{"id": "good", "skill_id": "quad.discriminant", "difficulty": "easy", "seed": 1}"#,
            "\n",
            r#"{"id": "no-skill", "skill_id": "geometry.area", "difficulty": "easy", "seed": 1}"#,
            "\n",
            r#"{"id": "no-level", "skill_id": "quad.discriminant", "difficulty": "extreme", "seed": 1}"#,
            "\n",
        ),
    )
    .unwrap();

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(&cases)
        .arg("--out")
        .arg(&out)
        .args(["--min-accuracy", "0.0"])
        .assert()
        .code(0);

    let rows = read_rows(&out).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].status, RowStatus::Ok);
    assert_eq!(rows[1].status, RowStatus::GenerateError);
    assert_eq!(rows[2].status, RowStatus::GenerateError);
    assert!(rows[1].stem_hash.is_none());
}

#[test]
fn malformed_case_file_exits_2() {
    let dir = TempDir::new().unwrap();
    let cases = dir.path().join("broken.jsonl");
    std::fs::write(&cases, "{\"id\": \"a\"\n").unwrap();

    itemforge(dir.path())
        .arg("run")
        .arg("--cases")
        .arg(&cases)
        .args(["--out", "out.jsonl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.jsonl:1"));
}
