//! Loads a directory of per-task response files into memory.
//!
//! Each task file holds the two responses a model gave for that prompt:
//! `{"R1": "...", "R2": "..."}`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fmt, fs, path::Path};

/// Both responses a model produced for one task.
#[derive(Debug, Deserialize, Clone)]
pub struct TaskRecord {
    #[serde(rename = "R1")]
    pub r1: String,
    #[serde(rename = "R2")]
    pub r2: String,
}

/// File name -> parsed record, one map per model.
pub type Corpus = HashMap<String, TaskRecord>;

/// Which of the two responses a comparison reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    R1,
    R2,
}

impl Response {
    pub fn select<'a>(&self, record: &'a TaskRecord) -> &'a str {
        match self {
            Response::R1 => &record.r1,
            Response::R2 => &record.r2,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Response::R1 => "R1",
            Response::R2 => "R2",
        })
    }
}

/// Reads every regular file in `dir` as a JSON task record, keyed by file
/// name. Subdirectories are skipped; anything else that fails to parse
/// aborts the run.
pub fn load_corpus(dir: &Path) -> Result<Corpus> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut corpus = Corpus::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let record: TaskRecord = serde_json::from_str(&raw)
            .with_context(|| format!("malformed task file {}", path.display()))?;
        corpus.insert(entry.file_name().to_string_lossy().into_owned(), record);
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_task(dir: &Path, name: &str, r1: &str, r2: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        write!(
            f,
            "{}",
            serde_json::json!({ "R1": r1, "R2": r2 })
        )
        .unwrap();
    }

    #[test]
    fn loads_all_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        write_task(dir.path(), "A.json", "alpha", "beta");
        write_task(dir.path(), "B.json", "gamma", "delta");
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus["A.json"].r1, "alpha");
        assert_eq!(corpus["B.json"].r2, "delta");
    }

    #[test]
    fn selector_picks_the_right_field() {
        let record = TaskRecord {
            r1: "first".into(),
            r2: "second".into(),
        };
        assert_eq!(Response::R1.select(&record), "first");
        assert_eq!(Response::R2.select(&record), "second");
        assert_eq!(Response::R1.to_string(), "R1");
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "not json").unwrap();
        let err = load_corpus(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn record_without_both_fields_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("half.json"), r#"{"R1": "only one"}"#).unwrap();
        assert!(load_corpus(dir.path()).is_err());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nowhere");
        assert!(load_corpus(&gone).is_err());
    }
}
