//! Structural and numeric similarity between programs.
//!
//! Every measure returns a score in `[0, 1]`: 0 when either program is absent,
//! 1 when both are structurally equal.

pub mod common_region;
pub mod multiset;
pub mod symbol_tree;
pub mod tree_edit;
pub mod value;

pub use common_region::CommonRegionSimilarity;
pub use multiset::{LeafSimilarity, PrimitiveSimilarity, SubCombinationSimilarity, SubProgramSimilarity};
pub use symbol_tree::SymbolTreeSimilarity;
pub use tree_edit::TreeEditSimilarity;
pub use value::ValueSimilarity;

use crate::program::Program;

pub trait SimilarityMeasure: Send + Sync {
    fn name(&self) -> &'static str;

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64;
}

/// Both programs when a full comparison is needed, otherwise the settled score
pub(crate) fn paired<'a>(
    first: Option<&'a Program>,
    second: Option<&'a Program>,
) -> Result<(&'a Program, &'a Program), f64> {
    match (first, second) {
        (Some(first), Some(second)) if first == second => Err(1.0),
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(0.0),
    }
}
