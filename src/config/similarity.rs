use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::similarity::value::DEFAULT_SAMPLES;
use crate::engines::similarity::ValueSimilarity;
use crate::error::{GpError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub value_samples: usize,
    pub value_seed: u64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            value_samples: DEFAULT_SAMPLES,
            value_seed: 0,
        }
    }
}

impl SimilarityConfig {
    pub fn value_similarity(&self) -> ValueSimilarity {
        ValueSimilarity::new(self.value_samples, self.value_seed)
    }
}

impl ConfigSection for SimilarityConfig {
    fn section_name() -> &'static str {
        "similarity"
    }

    fn validate(&self) -> Result<()> {
        if self.value_samples == 0 {
            return Err(GpError::Configuration(
                "Value similarity needs at least one sample".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: Self::section_name().to_string(),
            fields: vec![
                FieldManifest::new(
                    "value_samples",
                    "integer",
                    serde_json::json!(self.value_samples),
                    "Sample points per variable for value similarity",
                )
                .bounded(1.0, 100_000.0),
                FieldManifest::new(
                    "value_seed",
                    "integer",
                    serde_json::json!(self.value_seed),
                    "Seed for shuffling the value similarity samples",
                ),
            ],
        }
    }
}
