use crate::engines::generation::operators::CrossoverOperator;
use crate::program::index::cartesian;
use crate::program::Program;
use rand::{Rng, RngCore};
use std::collections::BTreeSet;

/// Walks the common region and, at every aligned non-root position, takes the
/// second parent's branch with probability `swap_probability`. Where arities
/// diverge the first parent's branch is kept unless it is swapped whole.
#[derive(Debug, Clone, Copy)]
pub struct UniformCrossover {
    swap_probability: f64,
}

impl UniformCrossover {
    pub fn new(swap_probability: f64) -> Self {
        let swap_probability = if swap_probability.is_nan() {
            0.5
        } else {
            swap_probability.clamp(0.0, 1.0)
        };
        Self { swap_probability }
    }

    pub fn swap_probability(&self) -> f64 {
        self.swap_probability
    }

    fn shares_structure(first: &Program, second: &Program) -> bool {
        !first.is_leaf() && first.arity() == second.arity()
    }

    fn recombine(&self, first: &Program, second: &Program, is_root: bool, rng: &mut dyn RngCore) -> Program {
        if !is_root && rng.gen_bool(self.swap_probability) {
            return second.clone();
        }
        if !Self::shares_structure(first, second) {
            return first.clone();
        }
        let children = first
            .children()
            .iter()
            .zip(second.children())
            .map(|(a, b)| self.recombine(a, b, false, rng))
            .collect();
        first.with_children(children)
    }

    fn candidates(first: &Program, second: &Program, is_root: bool) -> BTreeSet<Program> {
        let mut candidates = BTreeSet::new();
        if !is_root {
            candidates.insert(second.clone());
        }
        if !Self::shares_structure(first, second) {
            candidates.insert(first.clone());
            return candidates;
        }

        let per_child: Vec<Vec<Program>> = first
            .children()
            .iter()
            .zip(second.children())
            .map(|(a, b)| Self::candidates(a, b, false).into_iter().collect())
            .collect();
        for children in cartesian(&per_child) {
            candidates.insert(first.with_children(children));
        }
        candidates
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl CrossoverOperator for UniformCrossover {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn crossover(
        &self,
        parent1: Option<&Program>,
        parent2: Option<&Program>,
        rng: &mut dyn RngCore,
    ) -> Option<Program> {
        let (first, second) = (parent1?, parent2?);
        if !Self::shares_structure(first, second) {
            return Some(second.clone());
        }
        Some(self.recombine(first, second, true, rng))
    }

    fn all_offspring(&self, parent1: Option<&Program>, parent2: Option<&Program>) -> BTreeSet<Program> {
        let (Some(first), Some(second)) = (parent1, parent2) else {
            return BTreeSet::new();
        };
        if !Self::shares_structure(first, second) {
            return BTreeSet::from([second.clone()]);
        }
        Self::candidates(first, second, true)
    }
}
