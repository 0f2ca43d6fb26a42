use crate::program::Program;
use rand::{Rng, RngCore};
use std::collections::BTreeSet;

/// Two-parent recombination.
///
/// Every implementation returns `None` from `crossover` and an empty set from
/// `all_offspring` when either parent is absent.
pub trait CrossoverOperator: Send + Sync {
    fn name(&self) -> &'static str;

    /// One offspring drawn with `rng`
    fn crossover(
        &self,
        parent1: Option<&Program>,
        parent2: Option<&Program>,
        rng: &mut dyn RngCore,
    ) -> Option<Program>;

    /// Every offspring `crossover` can produce for these parents
    fn all_offspring(&self, parent1: Option<&Program>, parent2: Option<&Program>) -> BTreeSet<Program>;
}

/// Single-parent variation.
///
/// Every implementation returns `None` from `mutate` and an empty set from
/// `all_mutations` when the program is absent.
pub trait MutationOperator: Send + Sync {
    fn name(&self) -> &'static str;

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program>;

    /// Every mutant `mutate` can produce for this program
    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program>;
}

/// Source of fresh random trees (full/grow/ramped generators live outside the crate)
pub trait ProgramGenerator: Send + Sync {
    fn generate(&self, max_depth: usize, rng: &mut dyn RngCore) -> Option<Program>;
}

/// Uniform pre-order position of `program`
pub(crate) fn random_position(program: &Program, rng: &mut dyn RngCore) -> usize {
    rng.gen_range(0..program.length())
}

/// `first` with the node at `first_index` replaced by `second`'s node at `second_index`
pub(crate) fn graft(first: &Program, first_index: usize, second: &Program, second_index: usize) -> Program {
    match second.program_at(second_index) {
        Some(donor) => first.replace_at(first_index, donor),
        None => first.clone(),
    }
}

/// Pick an index by weight; non-positive or non-finite weights fall back to uniform
pub(crate) fn weighted_choice(weights: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
    use rand::distributions::{Distribution, WeightedIndex};

    if weights.is_empty() {
        return None;
    }
    // an infinite total overflows the sampler's range
    if !weights.iter().sum::<f64>().is_finite() {
        log::warn!("operator weights {:?} do not sum to a finite total, choosing uniformly", weights);
        return Some(rng.gen_range(0..weights.len()));
    }
    match WeightedIndex::new(weights) {
        Ok(distribution) => Some(distribution.sample(rng)),
        Err(err) => {
            log::warn!("invalid operator weights {:?} ({}), choosing uniformly", weights, err);
            Some(rng.gen_range(0..weights.len()))
        }
    }
}
