use super::{paired, SimilarityMeasure};
use crate::program::Program;

/// Share of the larger tree covered by the common region, not counting the
/// shared root. Depends only on the arity shape of both trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonRegionSimilarity;

impl SimilarityMeasure for CommonRegionSimilarity {
    fn name(&self) -> &'static str {
        "common-region"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        let (first, second) = match paired(first, second) {
            Ok(pair) => pair,
            Err(score) => return score,
        };
        let longest = first.length().max(second.length());
        if longest <= 1 {
            return 0.0;
        }
        let shared = first.common_region_indexes(second).len();
        (shared - 1) as f64 / (longest - 1) as f64
    }
}
