use crate::engines::generation::operators::{random_position, MutationOperator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Replaces the whole program with one of its own sub-programs
#[derive(Debug, Clone, Copy, Default)]
pub struct HoistMutation;

impl MutationOperator for HoistMutation {
    fn name(&self) -> &'static str {
        "hoist"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let index = random_position(program, rng);
        program.program_at(index).cloned()
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        match program {
            Some(program) => program.pre_order().into_iter().cloned().collect(),
            None => BTreeSet::new(),
        }
    }
}
