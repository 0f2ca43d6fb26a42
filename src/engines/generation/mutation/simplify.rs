use crate::engines::generation::operators::{random_position, MutationOperator};
use crate::engines::simplification::simplify;
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Replaces a random sub-program by its algebraic simplification. Only the
/// chosen sub-program is simplified, not the tree around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyMutation;

fn simplified_at(program: &Program, index: usize) -> Program {
    match program.program_at(index) {
        Some(node) => program.replace_at(index, &simplify(node)),
        None => program.clone(),
    }
}

impl MutationOperator for SimplifyMutation {
    fn name(&self) -> &'static str {
        "simplify"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let index = random_position(program, rng);
        Some(simplified_at(program, index))
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        let Some(program) = program else {
            return BTreeSet::new();
        };
        (0..program.length())
            .map(|index| simplified_at(program, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Range;

    #[test]
    fn test_one_candidate_per_position() {
        let x = Program::variable("x", Range::default());
        // ((x*1)-(2+3))
        let program = Program::sub(
            Program::mul(x.clone(), Program::constant(1.0)),
            Program::add(Program::constant(2.0), Program::constant(3.0)),
        );
        let mutations = SimplifyMutation.all_mutations(Some(&program));
        let expected = BTreeSet::from([
            program.clone(),
            Program::sub(x.clone(), Program::constant(5.0)),
            Program::sub(x.clone(), Program::add(Program::constant(2.0), Program::constant(3.0))),
            Program::sub(Program::mul(x.clone(), Program::constant(1.0)), Program::constant(5.0)),
        ]);
        assert_eq!(mutations, expected);
    }
}
