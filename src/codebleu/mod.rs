//! CodeBLEU: composite structural similarity for code responses.
//!
//! Four equally-weighted components: plain n-gram match, keyword-weighted
//! n-gram match, syntax-tree match and data-flow match. Code is tokenized
//! by whitespace for the n-gram components; the tree components parse with
//! the task language's tree-sitter grammar.

pub mod dataflow;
pub mod keywords;
pub mod ngram;
pub mod syntax;

use crate::registry::Language;
use anyhow::{anyhow, Context, Result};
use tree_sitter::{Parser, Tree};

const COMPONENT_WEIGHT: f64 = 0.25;

/// Component scores and their weighted sum, all fractions in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct CodeBleu {
    pub ngram: f64,
    pub weighted_ngram: f64,
    pub syntax: f64,
    pub dataflow: f64,
    pub score: f64,
}

pub fn calc_codebleu(reference: &str, hypothesis: &str, lang: Language) -> Result<CodeBleu> {
    let ref_tokens: Vec<&str> = reference.split_whitespace().collect();
    let hyp_tokens: Vec<&str> = hypothesis.split_whitespace().collect();

    let ngram = ngram::ngram_match(&ref_tokens, &hyp_tokens);
    let weighted_ngram = ngram::weighted_ngram_match(&ref_tokens, &hyp_tokens, lang);
    let syntax = syntax::syntax_match(reference, hypothesis, lang)?;
    let dataflow = dataflow::dataflow_match(reference, hypothesis, lang)?;

    let score = COMPONENT_WEIGHT * (ngram + weighted_ngram + syntax + dataflow);
    Ok(CodeBleu {
        ngram,
        weighted_ngram,
        syntax,
        dataflow,
        score,
    })
}

pub(crate) fn parse(source: &str, lang: Language) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(lang))
        .with_context(|| format!("grammar for {lang} is incompatible with the parser"))?;
    parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("failed to parse {lang} source"))
}

fn grammar(lang: Language) -> tree_sitter::Language {
    match lang {
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::Java => tree_sitter_java::LANGUAGE.into(),
        Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
    }
}
