use crate::engines::generation::operators::{graft, random_position, CrossoverOperator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Replaces a random position of the first parent with a random sub-program
/// (root included) of the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeCrossover;

impl CrossoverOperator for SubtreeCrossover {
    fn name(&self) -> &'static str {
        "subtree"
    }

    fn crossover(
        &self,
        parent1: Option<&Program>,
        parent2: Option<&Program>,
        rng: &mut dyn RngCore,
    ) -> Option<Program> {
        let (first, second) = (parent1?, parent2?);
        let index = random_position(first, rng);
        let donor = random_position(second, rng);
        Some(graft(first, index, second, donor))
    }

    fn all_offspring(&self, parent1: Option<&Program>, parent2: Option<&Program>) -> BTreeSet<Program> {
        let (Some(first), Some(second)) = (parent1, parent2) else {
            return BTreeSet::new();
        };

        let donors: BTreeSet<&Program> = second.pre_order().into_iter().collect();
        let mut offspring = BTreeSet::new();
        for index in 0..first.length() {
            for donor in &donors {
                offspring.insert(first.replace_at(index, donor));
            }
        }
        offspring
    }
}
