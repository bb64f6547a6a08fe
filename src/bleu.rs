//! Sentence-level BLEU on the 0-100 scale used by the reports.
//!
//! Tokenization follows the mteval-13a conventions: punctuation becomes
//! its own token, periods and commas are split off unless digit-adjacent,
//! a dash after a digit is split off. Scoring is BLEU-4 with clipped
//! modified precision, exponential smoothing of zero numerators and the
//! usual brevity penalty. Orders longer than the hypothesis are excluded
//! so short identical pairs still score 100.

use itertools::Itertools;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const MAX_ORDER: usize = 4;

/// BLEU between one reference and one hypothesis, 0-100.
pub fn sentence_bleu(reference: &str, hypothesis: &str) -> f64 {
    let reference = tokenize_13a(reference);
    let hypothesis = tokenize_13a(hypothesis);
    let reference: Vec<&str> = reference.iter().map(String::as_str).collect();
    let hypothesis: Vec<&str> = hypothesis.iter().map(String::as_str).collect();
    100.0 * bleu_on_tokens(&reference, &hypothesis)
}

/// BLEU as a fraction over already-tokenized input. Shared with the
/// CodeBLEU n-gram components, which tokenize differently.
pub fn bleu_on_tokens(reference: &[&str], hypothesis: &[&str]) -> f64 {
    if reference.is_empty() || hypothesis.is_empty() {
        return 0.0;
    }

    let effective_order = hypothesis.len().min(MAX_ORDER);
    let mut smooth = 1.0f64;
    let mut log_sum = 0.0f64;
    for n in 1..=effective_order {
        let (clipped, total) = clipped_counts(reference, hypothesis, n);
        let precision = if clipped == 0 {
            smooth *= 2.0;
            1.0 / (smooth * total as f64)
        } else {
            clipped as f64 / total as f64
        };
        log_sum += precision.ln();
    }

    brevity_penalty(reference.len(), hypothesis.len())
        * (log_sum / effective_order as f64).exp()
}

/// Clipped n-gram matches and the hypothesis n-gram total for one order.
fn clipped_counts(reference: &[&str], hypothesis: &[&str], n: usize) -> (usize, usize) {
    let ref_counts = ngram_counts(reference, n);
    let hyp_counts = ngram_counts(hypothesis, n);

    let mut clipped = 0;
    let mut total = 0;
    for (gram, count) in &hyp_counts {
        total += count;
        clipped += count.min(ref_counts.get(gram).unwrap_or(&0));
    }
    (clipped, total)
}

fn ngram_counts(tokens: &[&str], n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window.iter().join(" ")).or_insert(0) += 1;
    }
    counts
}

fn brevity_penalty(reference_len: usize, hypothesis_len: usize) -> f64 {
    if hypothesis_len >= reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / hypothesis_len as f64).exp()
    }
}

/// mteval-13a style tokenization.
pub fn tokenize_13a(text: &str) -> Vec<String> {
    let mut text = text
        .replace("<skipped>", "")
        .replace("-\n", "")
        .replace('\n', " ")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    for (pattern, replacement) in rules() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.split_whitespace().map(str::to_owned).collect()
}

fn rules() -> &'static [(Regex, &'static str); 4] {
    static RULES: OnceLock<[(Regex, &'static str); 4]> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // punctuation and symbols become standalone tokens
            (Regex::new(r"([\{-\~\[-` -&\(-\+:-@/])").unwrap(), " ${1} "),
            // period/comma split unless surrounded by digits
            (Regex::new(r"([^0-9])([\.,])").unwrap(), "${1} ${2} "),
            (Regex::new(r"([\.,])([^0-9])").unwrap(), " ${1} ${2}"),
            // dash after a digit
            (Regex::new(r"([0-9])(-)").unwrap(), "${1} ${2} "),
        ]
    })
}
