use crate::engines::generation::operators::{weighted_choice, MutationOperator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Delegates each mutation to one of several operators, chosen by weight
#[derive(Default)]
pub struct StochasticMutation {
    operators: Vec<(Box<dyn MutationOperator>, f64)>,
}

impl StochasticMutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operator: impl MutationOperator + 'static, weight: f64) -> Self {
        self.operators.push((Box::new(operator), weight));
        self
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl MutationOperator for StochasticMutation {
    fn name(&self) -> &'static str {
        "stochastic"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        let program = program?;
        let weights: Vec<f64> = self.operators.iter().map(|(_, weight)| *weight).collect();
        let (operator, _) = &self.operators[weighted_choice(&weights, rng)?];
        log::trace!("stochastic mutation delegating to {}", operator.name());
        operator.mutate(Some(program), rng)
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        if program.is_none() {
            return BTreeSet::new();
        }
        self.operators
            .iter()
            .flat_map(|(operator, _)| operator.all_mutations(program))
            .collect()
    }
}
