//! JSONL row sink: one `ResultRow` per line, in case order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use itemforge_core::report::ResultRow;

/// Write every row to `path`, replacing any existing file.
pub fn write_rows(path: &Path, rows: &[ResultRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        serde_json::to_writer(&mut writer, row).context("failed to serialize result row")?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write report file: {}", path.display()))?;
    tracing::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read rows back from a JSONL report. Blank lines are skipped.
pub fn read_rows(path: &Path) -> Result<Vec<ResultRow>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open report file: {}", path.display()))?;
    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row: ResultRow = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed result row", path.display(), index + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemforge_core::model::ChoiceId;
    use itemforge_core::report::RowStatus;

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow {
                id: "c1".into(),
                skill_id: "quad.graph.vertex".into(),
                difficulty: "easy".into(),
                seed: 42,
                status: RowStatus::Ok,
                ok: true,
                picked: Some(ChoiceId::C),
                solution: Some(ChoiceId::C),
                gen_ms: 0.25,
                grade_ms: 0.125,
                stem_hash: Some("0123456789abcdef".into()),
                error: None,
            },
            ResultRow {
                id: "c2".into(),
                skill_id: "geometry.area".into(),
                difficulty: "easy".into(),
                seed: 1,
                status: RowStatus::GenerateError,
                ok: false,
                picked: None,
                solution: None,
                gen_ms: 0.0,
                grade_ms: 0.0,
                stem_hash: None,
                error: Some("unknown skill: geometry.area".into()),
            },
        ]
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rows.jsonl");
        write_rows(&path, &rows()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"status\":\"generate_error\""));

        assert_eq!(read_rows(&path).unwrap(), rows());
    }

    #[test]
    fn malformed_row_names_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{}\n").unwrap();
        let err = read_rows(&path).unwrap_err();
        assert!(format!("{err:#}").contains(":1:"));
    }
}
