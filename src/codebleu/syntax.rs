//! Syntax-tree component: how many reference subtrees reappear in the
//! candidate's parse tree.

use super::parse;
use crate::registry::Language;
use anyhow::Result;
use std::collections::HashSet;
use tree_sitter::Node;

/// Fraction of the reference tree's subtrees (as S-expressions) that also
/// occur somewhere in the candidate tree.
pub fn syntax_match(reference: &str, candidate: &str, lang: Language) -> Result<f64> {
    let reference_tree = parse(reference, lang)?;
    let candidate_tree = parse(candidate, lang)?;

    let reference_sexps = subtree_sexps(reference_tree.root_node());
    let candidate_sexps: HashSet<String> =
        subtree_sexps(candidate_tree.root_node()).into_iter().collect();

    if reference_sexps.is_empty() {
        return Ok(1.0);
    }
    let matched = reference_sexps
        .iter()
        .filter(|sexp| candidate_sexps.contains(*sexp))
        .count();
    Ok(matched as f64 / reference_sexps.len() as f64)
}

/// S-expressions of the root and every interior node, one entry per
/// occurrence.
fn subtree_sexps(root: Node) -> Vec<String> {
    let mut sexps = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        sexps.push(node.to_sexp());
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.child_count() > 0 {
                stack.push(child);
            }
        }
    }
    sexps
}
