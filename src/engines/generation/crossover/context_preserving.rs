use crate::engines::generation::operators::{graft, CrossoverOperator};
use crate::program::Program;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::BTreeSet;

/// One-point crossover restricted to aligned positions whose parents have the
/// same operator on both sides, so the swapped branch lands in the same
/// structural context it came from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextPreservingCrossover;

impl ContextPreservingCrossover {
    fn swap_points(first: &Program, second: &Program) -> Vec<(usize, usize)> {
        first
            .common_region(second)
            .into_iter()
            .filter(|position| position.first != 0 && position.same_context)
            .map(|position| (position.first, position.second))
            .collect()
    }
}

impl CrossoverOperator for ContextPreservingCrossover {
    fn name(&self) -> &'static str {
        "context-preserving"
    }

    fn crossover(
        &self,
        parent1: Option<&Program>,
        parent2: Option<&Program>,
        rng: &mut dyn RngCore,
    ) -> Option<Program> {
        let (first, second) = (parent1?, parent2?);
        let points = Self::swap_points(first, second);
        match points.choose(rng) {
            Some(&(i, j)) => Some(graft(first, i, second, j)),
            None => Some(second.clone()),
        }
    }

    fn all_offspring(&self, parent1: Option<&Program>, parent2: Option<&Program>) -> BTreeSet<Program> {
        let (Some(first), Some(second)) = (parent1, parent2) else {
            return BTreeSet::new();
        };

        let points = Self::swap_points(first, second);
        if points.is_empty() {
            return BTreeSet::from([second.clone()]);
        }
        points
            .into_iter()
            .map(|(i, j)| graft(first, i, second, j))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::crossover::OnePointCrossover;
    use crate::types::Range;

    fn var(name: &str) -> Program {
        Program::variable(name, Range::default())
    }

    #[test]
    fn test_only_matching_parents_are_eligible() {
        // parents differ at the root, agree on the left branch operator
        let first = Program::sub(Program::div(var("a"), var("b")), Program::pow(var("c"), var("d")));
        let second = Program::log(Program::div(var("e"), var("f")), Program::sub(var("g"), var("h")));
        let offspring = ContextPreservingCrossover.all_offspring(Some(&first), Some(&second));
        let expected = BTreeSet::from([
            Program::sub(Program::div(var("e"), var("b")), Program::pow(var("c"), var("d"))),
            Program::sub(Program::div(var("a"), var("f")), Program::pow(var("c"), var("d"))),
        ]);
        assert_eq!(offspring, expected);

        let one_point = OnePointCrossover.all_offspring(Some(&first), Some(&second));
        assert!(offspring.is_subset(&one_point));
        assert!(offspring.len() < one_point.len());
    }

    #[test]
    fn test_same_shape_same_operators_matches_one_point() {
        let first = Program::sub(var("a"), var("b"));
        let second = Program::sub(var("c"), var("d"));
        assert_eq!(
            ContextPreservingCrossover.all_offspring(Some(&first), Some(&second)),
            OnePointCrossover.all_offspring(Some(&first), Some(&second))
        );
    }
}
