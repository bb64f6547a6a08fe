//! Data-flow component: def-use edges with position-normalized variable
//! names, so two snippets match when their values flow the same way
//! regardless of what the variables are called.

use super::parse;
use crate::registry::Language;
use anyhow::Result;
use std::collections::HashMap;
use tree_sitter::Node;

/// target-variable <- source-variable, names replaced by first-appearance
/// indices
type Edge = (usize, usize);

/// Fraction of the reference's data-flow edges present in the candidate
/// (multiset overlap). A reference with no edges matches vacuously.
pub fn dataflow_match(reference: &str, candidate: &str, lang: Language) -> Result<f64> {
    let reference_edges = extract_edges(reference, lang)?;
    let candidate_edges = extract_edges(candidate, lang)?;

    if reference_edges.is_empty() {
        return Ok(1.0);
    }

    let mut remaining: HashMap<Edge, usize> = HashMap::new();
    for edge in &candidate_edges {
        *remaining.entry(*edge).or_insert(0) += 1;
    }
    let mut matched = 0usize;
    for edge in &reference_edges {
        if let Some(count) = remaining.get_mut(edge) {
            if *count > 0 {
                *count -= 1;
                matched += 1;
            }
        }
    }
    Ok(matched as f64 / reference_edges.len() as f64)
}

fn extract_edges(source: &str, lang: Language) -> Result<Vec<Edge>> {
    let tree = parse(source, lang)?;
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut edges = Vec::new();
    collect_edges(tree.root_node(), source.as_bytes(), &mut order, &mut edges);
    Ok(edges)
}

fn collect_edges(
    node: Node,
    source: &[u8],
    order: &mut HashMap<String, usize>,
    edges: &mut Vec<Edge>,
) {
    if let Some((target_node, value_node)) = assignment_parts(node) {
        let targets = identifiers_in(target_node, source);
        let sources = identifiers_in(value_node, source);
        for target in &targets {
            let target_index = normalize(order, target);
            for value in &sources {
                let value_index = normalize(order, value);
                edges.push((target_index, value_index));
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_edges(child, source, order, edges);
    }
}

/// (assigned-to node, assigned-from node) for the assignment shapes of the
/// four grammars.
fn assignment_parts<'t>(node: Node<'t>) -> Option<(Node<'t>, Node<'t>)> {
    match node.kind() {
        "assignment"
        | "augmented_assignment"
        | "assignment_expression"
        | "augmented_assignment_expression" => {
            let left = node.child_by_field_name("left")?;
            let right = node.child_by_field_name("right")?;
            Some((left, right))
        }
        // java/javascript `int x = e;` / `let x = e;`
        "variable_declarator" => {
            let name = node
                .child_by_field_name("name")
                .or_else(|| node.child_by_field_name("declarator"))?;
            let value = node.child_by_field_name("value")?;
            Some((name, value))
        }
        // cpp `int x = e;`
        "init_declarator" => {
            let declarator = node.child_by_field_name("declarator")?;
            let value = node.child_by_field_name("value")?;
            Some((declarator, value))
        }
        _ => None,
    }
}

/// All identifier leaves under `node`, in document order.
fn identifiers_in<'s>(node: Node, source: &'s [u8]) -> Vec<&'s str> {
    let mut names = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if matches!(current.kind(), "identifier" | "field_identifier") {
            if let Ok(text) = current.utf8_text(source) {
                names.push(text);
            }
        }
        let mut cursor = current.walk();
        let children: Vec<Node> = current.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    names
}

fn normalize(order: &mut HashMap<String, usize>, name: &str) -> usize {
    let next = order.len();
    *order.entry(name.to_owned()).or_insert(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_flow_matches_fully() {
        let code = "a = 1\nb = a + 2\nc = a + b\n";
        let score = dataflow_match(code, code, Language::Python).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn renamed_variables_still_match() {
        let score = dataflow_match(
            "a = read()\nb = a + 1\n",
            "x = read()\ny = x + 1\n",
            Language::Python,
        )
        .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn broken_flow_scores_zero() {
        // reference feeds a into b; candidate assigns a constant instead
        let score = dataflow_match("a = 1\nb = a\n", "a = 1\nb = 2\n", Language::Python).unwrap();
        assert!(score < 1e-9);
    }

    #[test]
    fn reference_without_flow_matches_vacuously() {
        let score = dataflow_match("print(42)\n", "x = y\n", Language::Python).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn declarator_forms_produce_edges() {
        let java = extract_edges("class A { void m() { int x = y + 1; } }", Language::Java).unwrap();
        assert!(!java.is_empty());
        let cpp = extract_edges("int f() { int x = y + 1; return x; }", Language::Cpp).unwrap();
        assert!(!cpp.is_empty());
        let js = extract_edges("let x = y + 1;", Language::JavaScript).unwrap();
        assert!(!js.is_empty());
    }
}
