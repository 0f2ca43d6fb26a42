use crate::engines::generation::operators::{weighted_choice, CrossoverOperator};
use crate::program::Program;
use rand::RngCore;
use std::collections::BTreeSet;

/// Delegates each crossover to one of several operators, chosen by weight
#[derive(Default)]
pub struct StochasticCrossover {
    operators: Vec<(Box<dyn CrossoverOperator>, f64)>,
}

impl StochasticCrossover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operator: impl CrossoverOperator + 'static, weight: f64) -> Self {
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

impl CrossoverOperator for StochasticCrossover {
    fn name(&self) -> &'static str {
        "stochastic"
    }

    fn crossover(
        &self,
        parent1: Option<&Program>,
        parent2: Option<&Program>,
        rng: &mut dyn RngCore,
    ) -> Option<Program> {
        let (first, second) = (parent1?, parent2?);
        let weights: Vec<f64> = self.operators.iter().map(|(_, weight)| *weight).collect();
        let (operator, _) = &self.operators[weighted_choice(&weights, rng)?];
        log::trace!("stochastic crossover delegating to {}", operator.name());
        operator.crossover(Some(first), Some(second), rng)
    }

    fn all_offspring(&self, parent1: Option<&Program>, parent2: Option<&Program>) -> BTreeSet<Program> {
        if parent1.is_none() || parent2.is_none() {
            return BTreeSet::new();
        }
        self.operators
            .iter()
            .flat_map(|(operator, _)| operator.all_offspring(parent1, parent2))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::crossover::{OnePointCrossover, SubtreeCrossover, UniformCrossover};
    use crate::types::Range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn var(name: &str) -> Program {
        Program::variable(name, Range::default())
    }

    #[test]
    fn test_union_of_wrapped_operators() {
        let first = Program::sub(var("a"), Program::sin(var("b")));
        let second = Program::mul(var("c"), var("d"));
        let stochastic = StochasticCrossover::new()
            .with(OnePointCrossover, 1.0)
            .with(SubtreeCrossover, 2.0);
        let mut expected = OnePointCrossover.all_offspring(Some(&first), Some(&second));
        expected.extend(SubtreeCrossover.all_offspring(Some(&first), Some(&second)));
        assert_eq!(stochastic.all_offspring(Some(&first), Some(&second)), expected);
    }

    #[test]
    fn test_zero_weight_operator_never_chosen() {
        let first = Program::sub(var("a"), var("b"));
        let second = Program::div(var("c"), var("d"));
        let stochastic = StochasticCrossover::new()
            .with(UniformCrossover::new(0.0), 1.0)
            .with(SubtreeCrossover, 0.0);
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            let child = stochastic.crossover(Some(&first), Some(&second), &mut rng);
            assert_eq!(child, Some(first.clone()));
        }
    }

    #[test]
    fn test_overflowing_weights_still_choose() {
        let first = Program::sub(var("a"), var("b"));
        let second = Program::div(var("c"), var("d"));
        let stochastic = StochasticCrossover::new()
            .with(SubtreeCrossover, f64::INFINITY)
            .with(OnePointCrossover, 1.0);
        let mut rng = StdRng::seed_from_u64(4);
        let all = stochastic.all_offspring(Some(&first), Some(&second));
        for _ in 0..20 {
            let child = stochastic.crossover(Some(&first), Some(&second), &mut rng);
            assert!(all.contains(&child.unwrap()));
        }
    }

    #[test]
    fn test_empty_and_absent() {
        let mut rng = StdRng::seed_from_u64(0);
        let program = var("x");
        assert!(StochasticCrossover::new()
            .crossover(Some(&program), Some(&program), &mut rng)
            .is_none());
        let stochastic = StochasticCrossover::new().with(SubtreeCrossover, 1.0);
        assert!(stochastic.crossover(None, Some(&program), &mut rng).is_none());
        assert!(stochastic.all_offspring(Some(&program), None).is_empty());
    }
}
