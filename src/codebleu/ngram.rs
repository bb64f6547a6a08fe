//! N-gram components of CodeBLEU, over whitespace-split code tokens.

use super::keywords::token_weight;
use crate::bleu::bleu_on_tokens;
use crate::registry::Language;
use itertools::Itertools;
use std::collections::HashMap;

const MAX_ORDER: usize = 4;

/// Plain BLEU over code tokens.
pub fn ngram_match(reference: &[&str], hypothesis: &[&str]) -> f64 {
    bleu_on_tokens(reference, hypothesis)
}

/// Like [`ngram_match`], but each n-gram carries the weight of its leading
/// token so matching a language keyword counts more than matching an
/// identifier. Weights cancel for identical inputs.
pub fn weighted_ngram_match(reference: &[&str], hypothesis: &[&str], lang: Language) -> f64 {
    if reference.is_empty() || hypothesis.is_empty() {
        return 0.0;
    }

    let effective_order = hypothesis.len().min(MAX_ORDER);
    let mut smooth = 1.0f64;
    let mut log_sum = 0.0f64;
    for n in 1..=effective_order {
        let ref_counts = weighted_counts(reference, n, lang);
        let hyp_counts = weighted_counts(hypothesis, n, lang);

        let mut clipped = 0.0f64;
        let mut total = 0.0f64;
        let mut raw_total = 0usize;
        for (gram, (count, weight)) in &hyp_counts {
            raw_total += count;
            total += *count as f64 * weight;
            let matched = ref_counts
                .get(gram)
                .map(|(ref_count, _)| (*count).min(*ref_count))
                .unwrap_or(0);
            clipped += matched as f64 * weight;
        }

        let precision = if clipped == 0.0 {
            // weighted totals can dip below one, so smooth on the raw count
            smooth *= 2.0;
            1.0 / (smooth * raw_total as f64)
        } else {
            clipped / total
        };
        log_sum += precision.ln();
    }

    let brevity = if hypothesis.len() >= reference.len() {
        1.0
    } else {
        (1.0 - reference.len() as f64 / hypothesis.len() as f64).exp()
    };
    brevity * (log_sum / effective_order as f64).exp()
}

/// n-gram -> (occurrences, leading-token weight)
fn weighted_counts(
    tokens: &[&str],
    n: usize,
    lang: Language,
) -> HashMap<String, (usize, f64)> {
    let mut counts: HashMap<String, (usize, f64)> = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        let entry = counts
            .entry(window.iter().join(" "))
            .or_insert((0, token_weight(lang, window[0])));
        entry.0 += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn identical_tokens_score_one_both_ways() {
        let code = toks("def f ( x ) : return x");
        assert!((ngram_match(&code, &code) - 1.0).abs() < 1e-9);
        assert!((weighted_ngram_match(&code, &code, Language::Python) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn keeping_the_keyword_beats_keeping_the_identifier() {
        let reference = toks("return a");
        let kept_keyword = toks("return b");
        let kept_identifier = toks("other a");
        let with_keyword = weighted_ngram_match(&reference, &kept_keyword, Language::Python);
        let without = weighted_ngram_match(&reference, &kept_identifier, Language::Python);
        assert!(
            with_keyword > without,
            "keyword match {with_keyword} should beat identifier match {without}"
        );
    }

    #[test]
    fn empty_sides_score_zero() {
        let code = toks("x = 1");
        assert_eq!(ngram_match(&code, &[]), 0.0);
        assert_eq!(weighted_ngram_match(&[], &code, Language::Python), 0.0);
    }
}
