use super::{paired, SimilarityMeasure};
use crate::program::Program;
use std::collections::BTreeMap;

type Counts = BTreeMap<Program, usize>;

fn counts<I>(programs: I) -> Counts
where
    I: IntoIterator<Item = Program>,
{
    let mut counts = Counts::new();
    for program in programs {
        *counts.entry(program).or_insert(0) += 1;
    }
    counts
}

/// Ratio of shared occurrences to all occurrences. A key present on both
/// sides contributes the sum of its counts, not the smaller one.
pub fn jaccard(first: &Counts, second: &Counts) -> f64 {
    let union: usize = first.values().sum::<usize>() + second.values().sum::<usize>();
    if union == 0 {
        return 0.0;
    }
    let intersection: usize = first
        .iter()
        .filter_map(|(key, count)| second.get(key).map(|other| count + other))
        .sum();
    intersection as f64 / union as f64
}

fn compare<F>(first: Option<&Program>, second: Option<&Program>, collect: F) -> f64
where
    F: Fn(&Program) -> Counts,
{
    match paired(first, second) {
        Ok((first, second)) => jaccard(&collect(first), &collect(second)),
        Err(score) => score,
    }
}

/// Compares the multisets of leaves
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafSimilarity;

impl SimilarityMeasure for LeafSimilarity {
    fn name(&self) -> &'static str {
        "leaf"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        compare(first, second, |program| {
            counts(program.leaves().into_iter().cloned())
        })
    }
}

/// Compares the multisets of node kinds, with function children replaced by
/// zero constants so only the operator itself counts
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveSimilarity;

impl SimilarityMeasure for PrimitiveSimilarity {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        compare(first, second, |program| {
            counts(program.pre_order().into_iter().map(Program::template))
        })
    }
}

/// Compares the multisets of proper sub-programs
#[derive(Debug, Clone, Copy, Default)]
pub struct SubProgramSimilarity;

impl SimilarityMeasure for SubProgramSimilarity {
    fn name(&self) -> &'static str {
        "sub-program"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        compare(first, second, |program| counts(program.sub_programs()))
    }
}

/// Compares sub-combination sets. Exponential in tree size.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubCombinationSimilarity;

impl SimilarityMeasure for SubCombinationSimilarity {
    fn name(&self) -> &'static str {
        "sub-combination"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        compare(first, second, |program| counts(program.sub_combinations()))
    }
}
