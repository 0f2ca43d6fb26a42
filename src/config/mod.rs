pub mod manager;
pub mod operators;
pub mod similarity;
pub mod simplification;
pub mod traits;

pub use manager::{ConfigManager, EngineConfig};
pub use operators::{CrossoverWeights, MutationWeights, OperatorConfig};
pub use similarity::SimilarityConfig;
pub use simplification::SimplificationConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
