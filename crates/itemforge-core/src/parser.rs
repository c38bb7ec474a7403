//! JSONL eval case loader.
//!
//! One `EvalCase` per line. Blank lines and lines whose first non-space
//! character is `#` are skipped; any other malformed line fails the whole
//! load with its line number.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Difficulty, EvalCase};
use crate::skills::Skill;

/// Load cases from a JSONL file.
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cases file: {}", path.display()))?;

    parse_cases_str(&content, path)
}

/// Parse JSONL content into cases (useful for testing).
pub fn parse_cases_str(content: &str, source_path: &Path) -> Result<Vec<EvalCase>> {
    let mut cases = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let case: EvalCase = serde_json::from_str(trimmed).with_context(|| {
            format!(
                "{}:{}: malformed case line",
                source_path.display(),
                index + 1
            )
        })?;
        cases.push(case);
    }
    Ok(cases)
}

/// Load all `.jsonl` case files from a directory, sorted by file name.
pub fn load_case_directory(dir: &Path) -> Result<Vec<EvalCase>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = BTreeSet::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "jsonl") {
            paths.insert(path);
        }
    }

    let mut cases = Vec::new();
    for path in &paths {
        cases.extend(load_cases(path)?);
    }
    Ok(cases)
}

/// Load a file or, when given a directory, every `.jsonl` file inside it.
pub fn load_cases_from(path: &Path) -> Result<Vec<EvalCase>> {
    if path.is_dir() {
        load_case_directory(path)
    } else {
        load_cases(path)
    }
}

/// A warning from case validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The case ID (if applicable).
    pub case_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check cases for problems that will surface as per-case failures at run time.
pub fn validate_cases(cases: &[EvalCase]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = BTreeSet::new();
    for case in cases {
        if !seen_ids.insert(case.id.as_str()) {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: format!("duplicate case ID: {}", case.id),
            });
        }
    }

    for case in cases {
        let Some(skill) = Skill::from_id(&case.skill_id) else {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: format!("unknown skill: {}", case.skill_id),
            });
            continue;
        };
        match case.difficulty.parse::<Difficulty>() {
            Ok(difficulty) if !skill.difficulties().contains(&difficulty) => {
                warnings.push(ValidationWarning {
                    case_id: Some(case.id.clone()),
                    message: format!("{} does not support {difficulty}", case.skill_id),
                });
            }
            Ok(_) => {}
            Err(_) => warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: format!("unknown difficulty: {}", case.difficulty),
            }),
        }
    }

    if cases.is_empty() {
        warnings.push(ValidationWarning {
            case_id: None,
            message: "no cases found".into(),
        });
    }

    warnings
}
