use crate::engines::generation::operators::{random_position, MutationOperator, ProgramGenerator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Replaces a random sub-program with a fresh tree of at most `max_depth`
/// levels from the generator.
///
/// The generator's output space is not enumerable, so `all_mutations` is
/// always empty.
#[derive(Clone)]
pub struct SubtreeMutation {
    generator: Arc<dyn ProgramGenerator>,
    max_depth: usize,
}

impl SubtreeMutation {
    pub fn new(generator: Arc<dyn ProgramGenerator>, max_depth: usize) -> Self {
        Self {
            generator,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl MutationOperator for SubtreeMutation {
    fn name(&self) -> &'static str {
        "subtree"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let index = random_position(program, rng);
        match self.generator.generate(self.max_depth, rng) {
            Some(subtree) => Some(program.replace_at(index, &subtree)),
            None => {
                log::debug!("generator produced no tree, returning program unchanged");
                Some(program.clone())
            }
        }
    }

    fn all_mutations(&self, _program: Option<&Program>) -> BTreeSet<Program> {
        BTreeSet::new()
    }
}
