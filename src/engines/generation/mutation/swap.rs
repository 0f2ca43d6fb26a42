use crate::engines::generation::operators::{random_position, MutationOperator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Reverses the argument order of one random node. Leaves and unary nodes are
/// left as they are, and commutative nodes are unchanged by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

fn reversed_at(program: &Program, index: usize) -> Program {
    match program.program_at(index) {
        Some(node) if node.arity() > 1 => {
            let mut children = node.children().to_vec();
            children.reverse();
            program.replace_at(index, &node.with_children(children))
        }
        _ => program.clone(),
    }
}

impl MutationOperator for SwapMutation {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let index = random_position(program, rng);
        Some(reversed_at(program, index))
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        let Some(program) = program else {
            return BTreeSet::new();
        };
        let mut mutations = BTreeSet::from([program.clone()]);
        for index in 0..program.length() {
            mutations.insert(reversed_at(program, index));
        }
        mutations
    }
}
