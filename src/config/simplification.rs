use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::generation::FitnessSimplifyMutation;
use crate::engines::simplification::FitnessFn;
use crate::error::{GpError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplificationConfig {
    /// Largest fitness change a simplification may cause
    pub fitness_margin: f64,
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            fitness_margin: 1e-6,
        }
    }
}

impl SimplificationConfig {
    pub fn fitness_simplify_mutation(&self, fitness: FitnessFn) -> FitnessSimplifyMutation {
        FitnessSimplifyMutation::new(fitness, self.fitness_margin)
    }
}

impl ConfigSection for SimplificationConfig {
    fn section_name() -> &'static str {
        "simplification"
    }

    fn validate(&self) -> Result<()> {
        if !self.fitness_margin.is_finite() || self.fitness_margin < 0.0 {
            return Err(GpError::Configuration(
                "Fitness margin must be a finite non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: Self::section_name().to_string(),
            fields: vec![FieldManifest::new(
                "fitness_margin",
                "float",
                serde_json::json!(self.fitness_margin),
                "Tolerated fitness change when fitness-guided simplification shortens a program",
            )],
        }
    }
}
