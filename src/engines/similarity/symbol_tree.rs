use super::{paired, SimilarityMeasure};
use crate::program::Program;
use std::collections::BTreeMap;

/// Frequency trie keyed by (label, argument position)
#[derive(Debug, Default)]
struct SymbolNode {
    count: usize,
    children: BTreeMap<(String, usize), SymbolNode>,
}

impl SymbolNode {
    /// Every node of `program` is inserted at the top level, each followed by
    /// its own descendants
    fn build(program: &Program) -> Self {
        let mut root = SymbolNode::default();
        for node in program.pre_order() {
            root.insert(node, 0);
        }
        root
    }

    fn insert(&mut self, program: &Program, position: usize) {
        let entry = self
            .children
            .entry((program.label().to_string(), position))
            .or_default();
        entry.count += 1;
        for (index, child) in program.children().iter().enumerate() {
            entry.insert(child, index);
        }
    }

    fn total(&self) -> usize {
        self.children
            .values()
            .map(|child| child.count + child.total())
            .sum()
    }

    fn overlap(&self, other: &SymbolNode) -> usize {
        self.children
            .iter()
            .filter_map(|(key, child)| {
                other
                    .children
                    .get(key)
                    .map(|matched| child.count.min(matched.count) + child.overlap(matched))
            })
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolTreeSimilarity;

impl SimilarityMeasure for SymbolTreeSimilarity {
    fn name(&self) -> &'static str {
        "symbol-tree"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        let (first, second) = match paired(first, second) {
            Ok(pair) => pair,
            Err(score) => return score,
        };
        let first = SymbolNode::build(first);
        let second = SymbolNode::build(second);
        let total = first.total() + second.total();
        if total == 0 {
            return 0.0;
        }
        2.0 * first.overlap(&second) as f64 / total as f64
    }
}
