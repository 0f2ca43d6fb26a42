use crate::engines::generation::operators::MutationOperator;
use crate::engines::simplification::{simplify_with_fitness, FitnessFn};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Runs the fitness-guided simplifier on the whole program. Deterministic:
/// the only mutant is the simplifier's result.
#[derive(Clone)]
pub struct FitnessSimplifyMutation {
    fitness: FitnessFn,
    margin: f64,
}

impl FitnessSimplifyMutation {
    pub fn new(fitness: FitnessFn, margin: f64) -> Self {
        Self { fitness, margin }
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    fn simplified(&self, program: &Program) -> Program {
        simplify_with_fitness(program, |candidate| (self.fitness)(candidate), self.margin)
    }
}

impl MutationOperator for FitnessSimplifyMutation {
    fn name(&self) -> &'static str {
        "fitness-simplify"
    }

    fn mutate(&self, program: Option<&Program>, _rng: &mut dyn RngCore) -> Option<Program> {
        Some(self.simplified(program?))
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        match program {
            Some(program) => BTreeSet::from([self.simplified(program)]),
            None => BTreeSet::new(),
        }
    }
}
