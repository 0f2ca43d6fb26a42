use crate::engines::generation::operators::{random_position, MutationOperator};
use crate::functions::PrimitiveSet;
use crate::program::Program;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::BTreeSet;

/// Replaces a random sub-program with a random terminal from the catalog
#[derive(Debug, Clone)]
pub struct ShrinkMutation {
    terminals: Vec<Program>,
}

impl ShrinkMutation {
    pub fn new(primitives: &PrimitiveSet) -> Self {
        Self {
            terminals: primitives.terminals().cloned().collect(),
        }
    }
}

impl MutationOperator for ShrinkMutation {
    fn name(&self) -> &'static str {
        "shrink"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let index = random_position(program, rng);
        match self.terminals.choose(rng) {
            Some(terminal) => Some(program.replace_at(index, terminal)),
            None => {
                log::warn!("shrink mutation has no terminals, returning program unchanged");
                Some(program.clone())
            }
        }
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        let Some(program) = program else {
            return BTreeSet::new();
        };
        let mut mutations = BTreeSet::new();
        for index in 0..program.length() {
            for terminal in &self.terminals {
                mutations.insert(program.replace_at(index, terminal));
            }
        }
        mutations
    }
}
