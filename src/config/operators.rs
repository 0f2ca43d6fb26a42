use super::traits::{check_probability, ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::generation::{
    ContextPreservingCrossover, HoistMutation, OnePointCrossover, PointMutation, ProgramGenerator,
    ShrinkMutation, SimplifyMutation, StochasticCrossover, StochasticMutation, SubtreeCrossover,
    SubtreeMutation, SwapMutation, UniformCrossover,
};
use crate::error::{GpError, Result};
use crate::functions::PrimitiveSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub point_mutation_probability: f64,
    pub uniform_swap_probability: f64,
    pub subtree_max_depth: usize,
    pub crossover_weights: CrossoverWeights,
    pub mutation_weights: MutationWeights,
}

/// Relative weights of the crossover variants inside a stochastic crossover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverWeights {
    pub subtree: f64,
    pub one_point: f64,
    pub uniform: f64,
    pub context_preserving: f64,
}

/// Relative weights of the mutation variants inside a stochastic mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationWeights {
    pub point: f64,
    pub shrink: f64,
    pub swap: f64,
    pub hoist: f64,
    pub simplify: f64,
    pub subtree: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            point_mutation_probability: 0.1,
            uniform_swap_probability: 0.5,
            subtree_max_depth: 4,
            crossover_weights: CrossoverWeights::default(),
            mutation_weights: MutationWeights::default(),
        }
    }
}

impl Default for CrossoverWeights {
    fn default() -> Self {
        Self {
            subtree: 0.6,
            one_point: 0.1,
            uniform: 0.1,
            context_preserving: 0.2,
        }
    }
}

impl Default for MutationWeights {
    fn default() -> Self {
        Self {
            point: 0.3,
            shrink: 0.15,
            swap: 0.1,
            hoist: 0.15,
            simplify: 0.1,
            subtree: 0.2,
        }
    }
}

fn check_weights(section: &str, weights: &[f64]) -> Result<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GpError::Configuration(format!(
            "{} weights must be finite and non-negative",
            section
        )));
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(GpError::Configuration(format!(
            "{} weights must sum to a finite total",
            section
        )));
    }
    if total <= 0.0 {
        return Err(GpError::Configuration(format!(
            "{} weights must not all be zero",
            section
        )));
    }
    Ok(())
}

impl CrossoverWeights {
    fn as_slice(&self) -> [f64; 4] {
        [self.subtree, self.one_point, self.uniform, self.context_preserving]
    }
}

impl MutationWeights {
    fn as_slice(&self) -> [f64; 6] {
        [self.point, self.shrink, self.swap, self.hoist, self.simplify, self.subtree]
    }
}

impl OperatorConfig {
    pub fn point_mutation(&self, primitives: &PrimitiveSet) -> PointMutation {
        PointMutation::new(primitives.clone(), self.point_mutation_probability)
    }

    pub fn uniform_crossover(&self) -> UniformCrossover {
        UniformCrossover::new(self.uniform_swap_probability)
    }

    pub fn subtree_mutation(&self, generator: Arc<dyn ProgramGenerator>) -> SubtreeMutation {
        SubtreeMutation::new(generator, self.subtree_max_depth)
    }

    /// All crossover variants with a positive weight
    pub fn stochastic_crossover(&self) -> StochasticCrossover {
        let weights = &self.crossover_weights;
        let mut crossover = StochasticCrossover::new();
        if weights.subtree > 0.0 {
            crossover = crossover.with(SubtreeCrossover, weights.subtree);
        }
        if weights.one_point > 0.0 {
            crossover = crossover.with(OnePointCrossover, weights.one_point);
        }
        if weights.uniform > 0.0 {
            crossover = crossover.with(self.uniform_crossover(), weights.uniform);
        }
        if weights.context_preserving > 0.0 {
            crossover = crossover.with(ContextPreservingCrossover, weights.context_preserving);
        }
        crossover
    }

    /// All mutation variants with a positive weight. Subtree mutation is only
    /// included when a generator is supplied.
    pub fn stochastic_mutation(
        &self,
        primitives: &PrimitiveSet,
        generator: Option<Arc<dyn ProgramGenerator>>,
    ) -> StochasticMutation {
        let weights = &self.mutation_weights;
        let mut mutation = StochasticMutation::new();
        if weights.point > 0.0 {
            mutation = mutation.with(self.point_mutation(primitives), weights.point);
        }
        if weights.shrink > 0.0 {
            mutation = mutation.with(ShrinkMutation::new(primitives), weights.shrink);
        }
        if weights.swap > 0.0 {
            mutation = mutation.with(SwapMutation, weights.swap);
        }
        if weights.hoist > 0.0 {
            mutation = mutation.with(HoistMutation, weights.hoist);
        }
        if weights.simplify > 0.0 {
            mutation = mutation.with(SimplifyMutation, weights.simplify);
        }
        match generator {
            Some(generator) if weights.subtree > 0.0 => {
                mutation = mutation.with(self.subtree_mutation(generator), weights.subtree);
            }
            Some(_) => {}
            None => log::debug!("no generator supplied, subtree mutation disabled"),
        }
        mutation
    }
}

impl ConfigSection for OperatorConfig {
    fn section_name() -> &'static str {
        "operators"
    }

    fn validate(&self) -> Result<()> {
        check_probability("Point mutation probability", self.point_mutation_probability)?;
        check_probability("Uniform swap probability", self.uniform_swap_probability)?;
        if self.subtree_max_depth == 0 {
            return Err(GpError::Configuration(
                "Subtree max depth must be at least 1".to_string(),
            ));
        }
        check_weights("Crossover", &self.crossover_weights.as_slice())?;
        check_weights("Mutation", &self.mutation_weights.as_slice())?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: Self::section_name().to_string(),
            fields: vec![
                FieldManifest::new(
                    "point_mutation_probability",
                    "float",
                    serde_json::json!(self.point_mutation_probability),
                    "Chance that each node is replaced during point mutation",
                )
                .bounded(0.0, 1.0),
                FieldManifest::new(
                    "uniform_swap_probability",
                    "float",
                    serde_json::json!(self.uniform_swap_probability),
                    "Chance that uniform crossover takes a child from the second parent",
                )
                .bounded(0.0, 1.0),
                FieldManifest::new(
                    "subtree_max_depth",
                    "integer",
                    serde_json::json!(self.subtree_max_depth),
                    "Depth limit for trees grafted by subtree mutation",
                )
                .bounded(1.0, 64.0),
                FieldManifest::new(
                    "crossover_weights",
                    "table",
                    serde_json::to_value(&self.crossover_weights).unwrap_or_default(),
                    "Relative weights of subtree, one-point, uniform and context-preserving crossover",
                ),
                FieldManifest::new(
                    "mutation_weights",
                    "table",
                    serde_json::to_value(&self.mutation_weights).unwrap_or_default(),
                    "Relative weights of the mutation variants",
                ),
            ],
        }
    }
}
