//! The `itemforge validate` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;

use itemforge_core::generator::generate_for_case;
use itemforge_core::parser;
use itemforge_core::validate;

use super::{EXIT_FAILED, EXIT_OK};

pub fn execute(cases_path: PathBuf) -> Result<i32> {
    let cases = parser::load_cases_from(&cases_path)?;
    println!("Cases: {} ({} cases)", cases_path.display(), cases.len());

    let warnings = parser::validate_cases(&cases);
    for w in &warnings {
        let prefix = w
            .case_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    // Catalog problems were reported above; dry-run everything else.
    let flagged: BTreeSet<&str> = warnings
        .iter()
        .filter(|w| !w.message.starts_with("duplicate"))
        .filter_map(|w| w.case_id.as_deref())
        .collect();
    let mut failures = 0;
    for case in cases.iter().filter(|c| !flagged.contains(c.id.as_str())) {
        let checked = generate_for_case(case)
            .map_err(anyhow::Error::from)
            .and_then(|item| validate(&item).map_err(anyhow::Error::from));
        if let Err(e) = checked {
            println!("  [{}] ERROR: {e}", case.id);
            failures += 1;
        }
    }

    let problems = warnings.len() + failures;
    if problems == 0 {
        println!("All cases valid.");
        Ok(EXIT_OK)
    } else {
        println!("\n{problems} problem(s) found.");
        Ok(EXIT_FAILED)
    }
}
