use crate::engines::generation::operators::MutationOperator;
use crate::functions::PrimitiveSet;
use crate::program::index::cartesian;
use crate::program::Program;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::BTreeSet;

/// Visits every node (leaves included) and, with probability
/// `mutation_probability`, swaps it for a different catalog primitive of the
/// same arity. Children are kept, after being visited themselves.
#[derive(Debug, Clone)]
pub struct PointMutation {
    primitives: PrimitiveSet,
    mutation_probability: f64,
}

impl PointMutation {
    pub fn new(primitives: PrimitiveSet, mutation_probability: f64) -> Self {
        let mutation_probability = if mutation_probability.is_nan() {
            0.0
        } else {
            mutation_probability.clamp(0.0, 1.0)
        };
        Self {
            primitives,
            mutation_probability,
        }
    }

    pub fn primitives(&self) -> &PrimitiveSet {
        &self.primitives
    }

    fn replacements(&self, node: &Program) -> Vec<&Program> {
        self.primitives
            .with_arity(node.arity())
            .into_iter()
            .filter(|template| template.label() != node.label())
            .collect()
    }

    fn mutate_node(&self, node: &Program, rng: &mut dyn RngCore) -> Program {
        let children: Vec<Program> = node
            .children()
            .iter()
            .map(|child| self.mutate_node(child, rng))
            .collect();

        if rng.gen_bool(self.mutation_probability) {
            let replacements = self.replacements(node);
            if let Some(template) = replacements.choose(rng) {
                if let Some(mutant) = template.create_new(children.clone()) {
                    return mutant;
                }
            }
        }
        node.with_children(children)
    }

    fn variants(&self, node: &Program) -> BTreeSet<Program> {
        let per_child: Vec<Vec<Program>> = node
            .children()
            .iter()
            .map(|child| self.variants(child).into_iter().collect())
            .collect();
        let replacements = self.replacements(node);

        let mut variants = BTreeSet::new();
        for children in cartesian(&per_child) {
            for template in &replacements {
                if let Some(mutant) = template.create_new(children.clone()) {
                    variants.insert(mutant);
                }
            }
            variants.insert(node.with_children(children));
        }
        variants
    }
}

impl MutationOperator for PointMutation {
    fn name(&self) -> &'static str {
        "point"
    }

    fn mutate(&self, program: Option<&Program>, rng: &mut dyn RngCore) -> Option<Program> {
        Some(self.mutate_node(program?, rng))
    }

    fn all_mutations(&self, program: Option<&Program>) -> BTreeSet<Program> {
        match program {
            Some(program) => self.variants(program),
            None => BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> PrimitiveSet {
        let mut set = PrimitiveSet::default_functions();
        set.add(&PrimitiveSet::new().with_terminals([Program::constant(4.0)]));
        set
    }

    #[test]
    fn test_leaf_mutations() {
        let operator = PointMutation::new(catalog(), 0.5);
        let mutations = operator.all_mutations(Some(&Program::constant(1.0)));
        assert_eq!(
            mutations,
            BTreeSet::from([Program::constant(1.0), Program::constant(4.0)])
        );
    }

    #[test]
    fn test_unary_node_cross_product() {
        let operator = PointMutation::new(catalog(), 0.5);
        let program = Program::sin(Program::constant(1.0));
        let mutations = operator.all_mutations(Some(&program));
        // {sin, cos} x {1, 4}
        assert_eq!(mutations.len(), 4);
        assert!(mutations.contains(&Program::cos(Program::constant(4.0))));
    }

    #[test]
    fn test_probability_one_changes_every_node() {
        let x = Program::variable("x", Range::default());
        let set = PrimitiveSet::new().with_terminals([x.clone(), Program::constant(2.0)]);
        let mut primitives = PrimitiveSet::default_functions();
        primitives.add(&set);
        let operator = PointMutation::new(primitives, 1.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mutant = operator
            .mutate(Some(&Program::sin(x.clone())), &mut rng)
            .unwrap();
        assert_eq!(mutant, Program::cos(Program::constant(2.0)));
    }

    #[test]
    fn test_probability_zero_is_identity() {
        let operator = PointMutation::new(catalog(), 0.0);
        let program = Program::add(Program::constant(1.0), Program::sin(Program::constant(3.0)));
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(operator.mutate(Some(&program), &mut rng), Some(program));
    }

    #[test]
    fn test_absent_program() {
        let operator = PointMutation::new(catalog(), 0.5);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(operator.mutate(None, &mut rng).is_none());
        assert!(operator.all_mutations(None).is_empty());
    }
}
