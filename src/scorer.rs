//! Builds per-task score tables from loaded corpora.

use crate::bleu::sentence_bleu;
use crate::codebleu::calc_codebleu;
use crate::corpus::{Corpus, Response, TaskRecord};
use crate::registry::Metric;
use anyhow::{Context, Result};

/// Task name -> rounded score, in registry order.
pub type ScoreTable = Vec<(String, f64)>;

/// Scores one reference/hypothesis pair with the task's metric, on the
/// 0-100 scale, rounded to two decimals.
pub fn score_pair(reference: &str, hypothesis: &str, metric: Metric) -> Result<f64> {
    let score = match metric {
        Metric::TextBleu => sentence_bleu(reference, hypothesis),
        Metric::CodeBleu(lang) => calc_codebleu(reference, hypothesis, lang)?.score * 100.0,
    };
    Ok(round2(score))
}

/// Self-consistency: one model's R1 against its own R2, per task.
pub fn self_scores(corpus: &Corpus, tasks: &[(&str, Metric)]) -> Result<ScoreTable> {
    let mut table = ScoreTable::with_capacity(tasks.len());
    for (task, metric) in tasks {
        let record = lookup(corpus, task)?;
        let score = score_pair(&record.r1, &record.r2, *metric)
            .with_context(|| format!("failed to score {task}"))?;
        table.push((task.to_string(), score));
    }
    Ok(table)
}

/// Cross-model agreement: the same response slot from two models, per task.
pub fn cross_scores(
    reference: &Corpus,
    hypothesis: &Corpus,
    which: Response,
    tasks: &[(&str, Metric)],
) -> Result<ScoreTable> {
    let mut table = ScoreTable::with_capacity(tasks.len());
    for (task, metric) in tasks {
        let reference_record = lookup(reference, task)?;
        let hypothesis_record = lookup(hypothesis, task)?;
        let score = score_pair(
            which.select(reference_record),
            which.select(hypothesis_record),
            *metric,
        )
        .with_context(|| format!("failed to score {task} on {which}"))?;
        table.push((task.to_string(), score));
    }
    Ok(table)
}

fn lookup<'c>(corpus: &'c Corpus, task: &str) -> Result<&'c TaskRecord> {
    corpus
        .get(task)
        .with_context(|| format!("corpus has no responses for task {task}"))
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
