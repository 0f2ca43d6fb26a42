//! Pre-order position algebra over programs.
//!
//! Every algorithm in the crate addresses nodes by their zero-based pre-order
//! index: the root is `0`, followed by each child's subtree in order.

use super::node::Program;
use crate::types::Range;
use std::collections::{BTreeMap, BTreeSet};

/// One aligned position of the common region of two programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPosition {
    pub first: usize,
    pub second: usize,
    /// Both parents carry the same label (always true for the roots)
    pub same_context: bool,
}

impl Program {
    /// Sub-program at pre-order `index`, or `None` past the end
    pub fn program_at(&self, index: usize) -> Option<&Program> {
        let mut counter = index;
        self.locate(&mut counter)
    }

    /// Counter-based lookup. The counter is decremented by every node walked
    /// over, so on a miss it holds `index - length` and several lookups can be
    /// chained across sibling trees.
    pub fn locate(&self, counter: &mut usize) -> Option<&Program> {
        if *counter == 0 {
            return Some(self);
        }
        *counter -= 1;
        for child in self.children() {
            if *counter < child.length() {
                return child.locate(counter);
            }
            *counter -= child.length();
        }
        None
    }

    /// New tree with the node at `index` replaced. Ancestors are rebuilt,
    /// siblings shared. Out-of-range indexes return the tree unchanged.
    pub fn replace_at(&self, index: usize, replacement: &Program) -> Program {
        if index == 0 {
            return replacement.clone();
        }
        if index >= self.length() {
            return self.clone();
        }

        let mut offset = index - 1;
        let mut children = self.children().to_vec();
        for child in children.iter_mut() {
            if offset < child.length() {
                *child = child.replace_at(offset, replacement);
                break;
            }
            offset -= child.length();
        }
        self.with_children(children)
    }

    /// Replaces every sub-tree equal to `target`
    pub fn replace(&self, target: &Program, replacement: &Program) -> Program {
        if self == target {
            return replacement.clone();
        }
        if self.length() <= target.length() {
            return self.clone();
        }

        let children: Vec<Program> = self
            .children()
            .iter()
            .map(|child| child.replace(target, replacement))
            .collect();
        let unchanged = children
            .iter()
            .zip(self.children())
            .all(|(new, old)| new.shares_root(old));
        if unchanged {
            self.clone()
        } else {
            self.with_children(children)
        }
    }

    /// Every node in pre-order, starting with `self`
    pub fn pre_order(&self) -> Vec<&Program> {
        let mut nodes = Vec::with_capacity(self.length());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children().iter().rev());
        }
        nodes
    }

    /// The `length - 1` strict descendants in pre-order
    pub fn sub_programs(&self) -> Vec<Program> {
        self.pre_order().into_iter().skip(1).cloned().collect()
    }

    pub fn leaves(&self) -> Vec<&Program> {
        self.pre_order()
            .into_iter()
            .filter(|node| node.is_leaf())
            .collect()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Program::depth)
            .max()
            .unwrap_or(0)
    }

    /// Distinct variables by name, with their declared ranges
    pub fn variables(&self) -> BTreeMap<String, Range> {
        let mut variables = BTreeMap::new();
        for node in self.pre_order() {
            if let Some(variable) = node.as_variable() {
                variables
                    .entry(variable.name.clone())
                    .or_insert(variable.range);
            }
        }
        variables
    }

    /// Trees reachable by substituting each child with one of its own
    /// combinations, plus every child's combinations, without `self`.
    pub fn sub_combinations(&self) -> BTreeSet<Program> {
        let mut combinations = self.combinations();
        combinations.remove(self);
        combinations
    }

    fn combinations(&self) -> BTreeSet<Program> {
        let mut combinations = BTreeSet::new();
        combinations.insert(self.clone());
        if self.is_leaf() {
            return combinations;
        }

        let per_child: Vec<Vec<Program>> = self
            .children()
            .iter()
            .map(|child| child.combinations().into_iter().collect())
            .collect();
        for children in cartesian(&per_child) {
            combinations.insert(self.with_children(children));
        }
        for options in per_child {
            combinations.extend(options);
        }
        combinations
    }

    /// Pre-order index pairs of the common region, keyed by this tree's index
    pub fn common_region_indexes(&self, other: &Program) -> BTreeMap<usize, usize> {
        self.common_region(other)
            .into_iter()
            .map(|position| (position.first, position.second))
            .collect()
    }

    /// Lock-step walk from both roots. Children are visited only while both
    /// sides have the same arity at the current position.
    pub fn common_region(&self, other: &Program) -> Vec<AlignedPosition> {
        let mut positions = Vec::new();
        align(self, other, 0, 0, true, &mut positions);
        positions
    }

    /// `true` if `sub` equals this tree or one of its descendants
    pub fn contains_sub_program(&self, sub: &Program) -> bool {
        if self.length() < sub.length() {
            return false;
        }
        self == sub
            || self
                .children()
                .iter()
                .any(|child| child.contains_sub_program(sub))
    }

    pub fn is_sub_program_of(&self, other: &Program) -> bool {
        other.contains_sub_program(self)
    }
}

fn align(
    first: &Program,
    second: &Program,
    first_index: usize,
    second_index: usize,
    same_context: bool,
    positions: &mut Vec<AlignedPosition>,
) {
    positions.push(AlignedPosition {
        first: first_index,
        second: second_index,
        same_context,
    });
    if first.is_leaf() || first.arity() != second.arity() {
        return;
    }

    let parents_match = first.label() == second.label();
    let mut first_child_index = first_index + 1;
    let mut second_child_index = second_index + 1;
    for (a, b) in first.children().iter().zip(second.children()) {
        align(a, b, first_child_index, second_child_index, parents_match, positions);
        first_child_index += a.length();
        second_child_index += b.length();
    }
}

/// Cross product of per-position options; a single empty row for no positions
pub(crate) fn cartesian(options: &[Vec<Program>]) -> Vec<Vec<Program>> {
    let mut rows: Vec<Vec<Program>> = vec![Vec::with_capacity(options.len())];
    for choices in options {
        let mut next = Vec::with_capacity(rows.len() * choices.len());
        for row in &rows {
            for choice in choices {
                let mut extended = row.clone();
                extended.push(choice.clone());
                next.push(extended);
            }
        }
        rows = next;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Program {
        Program::variable(name, Range::default())
    }

    fn sample() -> Program {
        // ((a-b)+(c-(d+e)))
        Program::add(
            Program::sub(var("a"), var("b")),
            Program::sub(var("c"), Program::add(var("d"), var("e"))),
        )
    }

    #[test]
    fn test_program_at() {
        let program = sample();
        assert_eq!(program.program_at(0), Some(&program));
        assert_eq!(program.program_at(1).unwrap().expression(), "(a-b)");
        assert_eq!(program.program_at(3), Some(&var("b")));
        assert_eq!(program.program_at(6).unwrap().expression(), "(d+e)");
        assert_eq!(program.program_at(8), Some(&var("e")));
        assert!(program.program_at(9).is_none());
    }

    #[test]
    fn test_locate_counter_stays_aligned_on_miss() {
        let first = Program::sub(var("a"), var("b"));
        let second = Program::sin(var("c"));
        let mut counter = 4;
        assert!(first.locate(&mut counter).is_none());
        assert_eq!(counter, 1);
        assert_eq!(second.locate(&mut counter), Some(&var("c")));
    }

    #[test]
    fn test_replace_at_shares_siblings() {
        let program = sample();
        let replaced = program.replace_at(2, &Program::constant(7.0));
        assert_eq!(replaced.expression(), "((7-b)+(c-(d+e)))");
        assert!(replaced.children()[1].shares_root(&program.children()[1]));
        assert_eq!(program.replace_at(99, &var("z")), program);
    }

    #[test]
    fn test_replace_every_occurrence() {
        let program = Program::mul(Program::sin(var("x")), Program::add(Program::sin(var("x")), var("y")));
        let replaced = program.replace(&Program::sin(var("x")), &var("z"));
        assert_eq!(replaced, Program::mul(var("z"), Program::add(var("z"), var("y"))));
        assert_eq!(program.replace(&program, &var("q")), var("q"));
        let untouched = program.replace(&var("w"), &var("q"));
        assert!(untouched.shares_root(&program));
    }

    #[test]
    fn test_common_region_stops_at_arity_mismatch() {
        let first = Program::sub(Program::sin(var("x")), Program::div(var("a"), var("b")));
        let second = Program::pow(Program::sub(var("y"), var("z")), Program::log(var("c"), var("d")));
        let region = first.common_region_indexes(&second);
        let expected: BTreeMap<usize, usize> =
            [(0, 0), (1, 1), (3, 4), (4, 5), (5, 6)].into_iter().collect();
        assert_eq!(region, expected);
    }

    #[test]
    fn test_common_region_context() {
        let first = Program::add(var("a"), var("b"));
        let second = Program::add(var("c"), var("d"));
        let third = Program::sub(var("c"), var("d"));
        assert!(first.common_region(&second).iter().all(|p| p.same_context));
        let mixed = first.common_region(&third);
        assert!(mixed[0].same_context);
        assert!(!mixed[1].same_context && !mixed[2].same_context);
    }

    #[test]
    fn test_sub_program_membership() {
        let program = sample();
        assert!(Program::add(var("e"), var("d")).is_sub_program_of(&program));
        assert!(program.contains_sub_program(&program));
        assert!(!var("z").is_sub_program_of(&program));
    }

    #[test]
    fn test_helpers() {
        let program = sample();
        assert_eq!(program.depth(), 4);
        assert_eq!(program.leaves().len(), 5);
        assert_eq!(program.variables().len(), 5);
    }

    #[test]
    fn test_cartesian() {
        assert_eq!(cartesian(&[]), vec![Vec::<Program>::new()]);
        let rows = cartesian(&[vec![var("a"), var("b")], vec![var("c"), var("d"), var("e")]]);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], vec![var("a"), var("c")]);
    }
}
