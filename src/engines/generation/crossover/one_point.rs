use crate::engines::generation::operators::{graft, CrossoverOperator};
use crate::program::Program;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::BTreeSet;

/// Swaps in the second parent's branch at one position of the common region.
///
/// The root is never a swap point. When the parents share nothing beyond the
/// root the offspring is the second parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    fn swap_points(first: &Program, second: &Program) -> Vec<(usize, usize)> {
        first
            .common_region_indexes(second)
            .into_iter()
            .filter(|(index, _)| *index != 0)
            .collect()
    }
}

impl CrossoverOperator for OnePointCrossover {
    fn name(&self) -> &'static str {
        "one-point"
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
    use crate::types::Range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn var(name: &str) -> Program {
        Program::variable(name, Range::default())
    }

    #[test]
    fn test_one_candidate_per_aligned_position() {
        let first = Program::sub(var("a"), Program::sin(var("b")));
        let second = Program::div(var("c"), Program::cos(var("d")));
        let offspring = OnePointCrossover.all_offspring(Some(&first), Some(&second));
        let expected = BTreeSet::from([
            Program::sub(var("c"), Program::sin(var("b"))),
            Program::sub(var("a"), Program::cos(var("d"))),
            Program::sub(var("a"), Program::sin(var("d"))),
        ]);
        assert_eq!(offspring, expected);
    }

    #[test]
    fn test_no_shared_structure_yields_second_parent() {
        let first = Program::sin(var("x"));
        let second = Program::add(var("a"), var("b"));
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            OnePointCrossover.crossover(Some(&first), Some(&second), &mut rng),
            Some(second.clone())
        );
        assert_eq!(
            OnePointCrossover.all_offspring(Some(&first), Some(&second)),
            BTreeSet::from([second])
        );
    }

    #[test]
    fn test_absent_parent() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(OnePointCrossover.crossover(None, None, &mut rng).is_none());
        assert!(OnePointCrossover.all_offspring(None, Some(&var("x"))).is_empty());
    }
}
