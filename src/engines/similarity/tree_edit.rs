//! Approximate tree-edit similarity.
//!
//! 1. Shared structure is factored out: the largest sub-program of the second
//!    tree that also occurs in the first is replaced in both by a placeholder
//!    that remembers how many nodes it stands for. Repeated until nothing of
//!    size two or more is shared.
//! 2. Every pair of pre-order offsets is tried as a starting alignment. Each
//!    node outside the two aligned sub-trees, before or after them, is
//!    charged as skip cost.
//! 3. Aligned nodes are compared recursively: 1 per label mismatch, the full
//!    weight of any unmatched child, and the larger weight when a placeholder
//!    meets anything else. When either side is commutative the swapped operand
//!    pairing is also tried, one level deep only.
//!
//! The score is `1 - min(1, cost / (length1 + length2))` for the cheapest
//! alignment.

use super::{paired, SimilarityMeasure};
use crate::program::Program;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EditNode {
    Symbol {
        label: String,
        commutative: bool,
        weight: usize,
        children: Vec<EditNode>,
    },
    Shared {
        id: usize,
        weight: usize,
    },
}

impl EditNode {
    fn from_program(program: &Program) -> Self {
        let children: Vec<EditNode> = program.children().iter().map(EditNode::from_program).collect();
        EditNode::Symbol {
            label: program.label().to_string(),
            commutative: program.is_commutative(),
            weight: 1 + children.iter().map(EditNode::weight).sum::<usize>(),
            children,
        }
    }

    fn weight(&self) -> usize {
        match self {
            EditNode::Symbol { weight, .. } | EditNode::Shared { weight, .. } => *weight,
        }
    }

    fn children(&self) -> &[EditNode] {
        match self {
            EditNode::Symbol { children, .. } => children,
            EditNode::Shared { .. } => &[],
        }
    }

    fn pre_order(&self) -> Vec<&EditNode> {
        let mut nodes = vec![self];
        for child in self.children() {
            nodes.extend(child.pre_order());
        }
        nodes
    }

    fn contains(&self, target: &EditNode) -> bool {
        self == target || self.children().iter().any(|child| child.contains(target))
    }

    fn substitute(&self, target: &EditNode, placeholder: &EditNode) -> EditNode {
        if self == target {
            return placeholder.clone();
        }
        match self {
            EditNode::Symbol {
                label,
                commutative,
                weight,
                children,
            } => EditNode::Symbol {
                label: label.clone(),
                commutative: *commutative,
                weight: *weight,
                children: children
                    .iter()
                    .map(|child| child.substitute(target, placeholder))
                    .collect(),
            },
            shared @ EditNode::Shared { .. } => shared.clone(),
        }
    }
}

/// Largest symbol subtree of `second` (two or more nodes) that occurs in `first`
fn largest_shared(first: &EditNode, second: &EditNode) -> Option<EditNode> {
    let mut candidates: Vec<&EditNode> = second
        .pre_order()
        .into_iter()
        .filter(|node| matches!(node, EditNode::Symbol { .. }) && node.weight() > 1)
        .collect();
    candidates.sort_by(|a, b| b.weight().cmp(&a.weight()));
    candidates
        .into_iter()
        .find(|candidate| first.contains(candidate))
        .cloned()
}

fn factor_shared(mut first: EditNode, mut second: EditNode) -> (EditNode, EditNode) {
    let mut next_id = 0;
    while let Some(shared) = largest_shared(&first, &second) {
        let placeholder = EditNode::Shared {
            id: next_id,
            weight: shared.weight(),
        };
        first = first.substitute(&shared, &placeholder);
        second = second.substitute(&shared, &placeholder);
        next_id += 1;
    }
    (first, second)
}

fn distance(first: &EditNode, second: &EditNode, reorder: bool) -> usize {
    if first == second {
        return 0;
    }
    match (first, second) {
        (
            EditNode::Symbol {
                label: first_label,
                commutative: first_commutative,
                children: first_children,
                ..
            },
            EditNode::Symbol {
                label: second_label,
                commutative: second_commutative,
                children: second_children,
                ..
            },
        ) => {
            let mismatch = usize::from(first_label != second_label);
            let straight = mismatch + children_cost(first_children, second_children, reorder);
            let swappable = reorder
                && (*first_commutative || *second_commutative)
                && first_children.len() == 2
                && second_children.len() == 2;
            if swappable {
                let swapped = mismatch
                    + distance(&first_children[0], &second_children[1], false)
                    + distance(&first_children[1], &second_children[0], false);
                straight.min(swapped)
            } else {
                straight
            }
        }
        _ => first.weight().max(second.weight()),
    }
}

fn children_cost(first: &[EditNode], second: &[EditNode], reorder: bool) -> usize {
    let paired: usize = first
        .iter()
        .zip(second)
        .map(|(a, b)| distance(a, b, reorder))
        .sum();
    let common = first.len().min(second.len());
    let unmatched: usize = first[common..]
        .iter()
        .chain(&second[common..])
        .map(EditNode::weight)
        .sum();
    paired + unmatched
}

/// Cheapest alignment cost over every pair of starting offsets
fn alignment_cost(first: &EditNode, second: &EditNode, ceiling: usize) -> usize {
    let first_nodes = first.pre_order();
    let second_nodes = second.pre_order();
    let mut best = ceiling;
    for a in &first_nodes {
        let first_skipped = first.weight().saturating_sub(a.weight());
        for b in &second_nodes {
            let skipped = first_skipped + second.weight().saturating_sub(b.weight());
            if skipped >= best {
                continue;
            }
            best = best.min(skipped + distance(a, b, true));
        }
    }
    best
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEditSimilarity;

impl TreeEditSimilarity {
    /// Estimated edit cost between two programs
    pub fn cost(&self, first: &Program, second: &Program) -> usize {
        let total = first.length() + second.length();
        let (first, second) = factor_shared(EditNode::from_program(first), EditNode::from_program(second));
        alignment_cost(&first, &second, total)
    }
}

impl SimilarityMeasure for TreeEditSimilarity {
    fn name(&self) -> &'static str {
        "tree-edit"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        let (first, second) = match paired(first, second) {
            Ok(pair) => pair,
            Err(score) => return score,
        };
        let total = first.length() + second.length();
        let cost = self.cost(first, second);
        1.0 - (cost as f64 / total as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Range;

    fn var(name: &str) -> Program {
        Program::variable(name, Range::default())
    }

    fn node(program: &Program) -> EditNode {
        EditNode::from_program(program)
    }

    #[test]
    fn test_single_label_change() {
        let first = Program::sub(var("x"), var("y"));
        let second = Program::div(var("x"), var("y"));
        assert_eq!(TreeEditSimilarity.cost(&first, &second), 1);
        let score = TreeEditSimilarity.similarity(Some(&first), Some(&second));
        assert!((score - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_subtree_costs_nothing() {
        let shared = Program::sin(Program::mul(var("x"), var("y")));
        let first = Program::sub(shared.clone(), var("z"));
        let second = Program::div(shared.clone(), var("z"));
        // sin(x*y) becomes one placeholder on both sides
        assert_eq!(TreeEditSimilarity.cost(&first, &second), 1);
    }

    #[test]
    fn test_offset_alignment() {
        let inner = Program::sub(var("x"), var("y"));
        let outer = Program::sin(inner.clone());
        // inner is factored out, outer's placeholder sits one node in
        assert_eq!(TreeEditSimilarity.cost(&outer, &inner), 1);
    }

    #[test]
    fn test_unmatched_children_are_charged() {
        let first = Program::sin(var("x"));
        let second = Program::max(var("x"), var("y"));
        // label mismatch plus the unmatched y
        assert_eq!(TreeEditSimilarity.cost(&first, &second), 2);
    }

    #[test]
    fn test_commutative_reorder() {
        let first = Program::sub(Program::sin(var("x")), Program::cos(var("y")));
        let second = Program::add(Program::sin(var("x")), Program::cos(var("y")));
        let (first_node, second_node) =
            factor_shared(EditNode::from_program(&first), EditNode::from_program(&second));
        // both operands become placeholders, stored in opposite order
        assert_eq!(distance(&first_node, &second_node, false), 5);
        assert_eq!(distance(&first_node, &second_node, true), 1);
        assert_eq!(TreeEditSimilarity.cost(&first, &second), 1);
    }

    #[test]
    fn test_cost_never_exceeds_total() {
        let first = Program::cond(var("a"), var("b"), var("c"), var("d"));
        let second = Program::constant(7.0);
        let cost = TreeEditSimilarity.cost(&first, &second);
        assert!(cost <= first.length() + second.length());
        assert!(TreeEditSimilarity.similarity(Some(&first), Some(&second)) >= 0.0);
    }

    #[test]
    fn test_nodes_outside_alignment_are_charged() {
        // sub(a10, sub(a9, ... a0)) against cos(cos(... cos(b)))
        let mut chain = var("a0");
        for k in 1..=10 {
            chain = Program::sub(var(&format!("a{}", k)), chain);
        }
        let mut tower = var("b");
        for _ in 0..20 {
            tower = Program::cos(tower);
        }
        assert_eq!(chain.length(), 21);
        assert_eq!(tower.length(), 21);
        assert_eq!(TreeEditSimilarity.cost(&chain, &tower), 40);
        assert!(TreeEditSimilarity.similarity(Some(&chain), Some(&tower)) < 0.1);
    }

    #[test]
    fn test_trailing_branches_are_charged() {
        // ((a*b)+(cos(c)-(d/log(e,f)))) vs max((b*z),(sin(c)-(d/(e^f))))
        let first = Program::add(
            Program::mul(var("a"), var("b")),
            Program::sub(
                Program::cos(var("c")),
                Program::div(var("d"), Program::log(var("e"), var("f"))),
            ),
        );
        let second = Program::max(
            Program::mul(var("b"), var("z")),
            Program::sub(
                Program::sin(var("c")),
                Program::div(var("d"), Program::pow(var("e"), var("f"))),
            ),
        );
        assert_eq!(TreeEditSimilarity.cost(&first, &second), 4);
    }

    #[test]
    fn test_no_reorder_inside_swapped_pairing() {
        // sub(sub(y,x), cos(z)) vs add(cos(z), min(x,y))
        let first = node(&Program::sub(Program::sub(var("y"), var("x")), Program::cos(var("z"))));
        let second = node(&Program::add(Program::cos(var("z")), Program::min(var("x"), var("y"))));
        let inner_first = node(&Program::sub(var("y"), var("x")));
        let inner_second = node(&Program::min(var("x"), var("y")));
        // on its own the inner pair is one swap away
        assert_eq!(distance(&inner_first, &inner_second, true), 1);
        assert_eq!(distance(&inner_first, &inner_second, false), 3);
        // root mismatch plus the unswapped inner pair
        assert_eq!(distance(&first, &second, true), 4);
    }

    #[test]
    fn test_reorder_below_non_commutative_root() {
        let first = node(&Program::sin(Program::sub(var("y"), var("x"))));
        let second = node(&Program::sin(Program::min(var("x"), var("y"))));
        assert_eq!(distance(&first, &second, true), 1);
        assert_eq!(distance(&first, &second, false), 3);
    }
}
