//! Writes a score table as a two-column CSV report.

use crate::scorer::ScoreTable;
use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

/// Writes `Task,Score` plus one row per table entry, in table order,
/// replacing any existing file.
pub fn write_report(table: &ScoreTable, path: &Path) -> Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("cannot open {}", path.display()))?;
    writer.write_record(["Task", "Score"])?;
    for (task, score) in table {
        writer.write_record([task.as_str(), &format_score(*score)])?;
    }
    writer
        .flush()
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Renders a two-decimal-rounded score the way Python's `repr` would:
/// shortest form with at least one decimal place (`100.0`, `85.7`,
/// `42.35`).
pub fn format_score(score: f64) -> String {
    let mut text = format!("{score:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.push('0');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(path: &Path) -> (Vec<String>, Vec<(String, f64)>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_owned)
            .collect();
        let rows = reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                (record[0].to_owned(), record[1].parse().unwrap())
            })
            .collect();
        (header, rows)
    }

    #[test]
    fn scores_render_like_python_floats() {
        assert_eq!(format_score(100.0), "100.0");
        assert_eq!(format_score(85.7), "85.7");
        assert_eq!(format_score(42.35), "42.35");
        assert_eq!(format_score(0.0), "0.0");
    }

    #[test]
    fn report_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let table: ScoreTable = vec![
            ("B.json".into(), 12.34),
            ("A.json".into(), 100.0),
            ("C.json".into(), 0.5),
        ];

        write_report(&table, &path).unwrap();
        let (header, rows) = read_back(&path);
        assert_eq!(header, ["Task", "Score"]);
        assert_eq!(rows, table);
    }

    #[test]
    fn self_score_row_matches_the_published_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_report(&vec![("A.json".into(), 100.0)], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("A.json,100.0"));
    }

    #[test]
    fn existing_report_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_report(&vec![("Old.json".into(), 1.0)], &path).unwrap();
        write_report(&vec![("New.json".into(), 2.0)], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("New.json"));
        assert!(!text.contains("Old.json"));
    }
}
