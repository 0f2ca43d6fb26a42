use super::{paired, SimilarityMeasure};
use crate::engines::simplification::simplify;
use crate::program::Program;
use crate::types::{Bindings, Range};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

pub const DEFAULT_SAMPLES: usize = 100;

/// Compares what two programs compute rather than how they are written.
///
/// Variables are matched by name; a variable's sample range is the union of
/// the ranges declared on either side. Each variable receives `samples`
/// evenly spaced values that are shuffled independently with an RNG seeded
/// from `seed`, so results are reproducible. The score is `1 - min(1, RMSD)`
/// over those sample points.
#[derive(Debug, Clone, Copy)]
pub struct ValueSimilarity {
    samples: usize,
    seed: u64,
}

impl Default for ValueSimilarity {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: 0,
        }
    }
}

impl ValueSimilarity {
    pub fn new(samples: usize, seed: u64) -> Self {
        Self {
            samples: samples.max(1),
            seed,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn sample_points(&self, variables: &BTreeMap<String, Range>) -> Vec<Bindings> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let columns: Vec<(&String, Vec<f64>)> = variables
            .iter()
            .map(|(name, range)| {
                let mut values = range.spread(self.samples);
                values.shuffle(&mut rng);
                (name, values)
            })
            .collect();

        (0..self.samples)
            .map(|row| {
                columns
                    .iter()
                    .map(|(name, values)| ((*name).clone(), values[row]))
                    .collect()
            })
            .collect()
    }
}

fn same_value(first: f64, second: f64) -> bool {
    first == second || (first.is_nan() && second.is_nan())
}

fn unified_variables(first: &Program, second: &Program) -> BTreeMap<String, Range> {
    let mut variables = first.variables();
    for (name, range) in second.variables() {
        variables
            .entry(name)
            .and_modify(|existing| *existing = existing.union(&range))
            .or_insert(range);
    }
    variables
}

impl SimilarityMeasure for ValueSimilarity {
    fn name(&self) -> &'static str {
        "value"
    }

    fn similarity(&self, first: Option<&Program>, second: Option<&Program>) -> f64 {
        let (first, second) = match paired(first, second) {
            Ok(pair) => pair,
            Err(score) => return score,
        };
        let first = simplify(first);
        let second = simplify(second);

        if let (Some(a), Some(b)) = (first.as_constant(), second.as_constant()) {
            return if same_value(a, b) { 1.0 } else { 0.0 };
        }

        let first_names = first.variables();
        let second_names = second.variables();
        if !first_names.keys().any(|name| second_names.contains_key(name)) {
            return 0.0;
        }

        let points = self.sample_points(&unified_variables(&first, &second));
        let squared: f64 = points
            .iter()
            .map(|bindings| {
                let a = first.evaluate(bindings);
                let b = second.evaluate(bindings);
                if same_value(a, b) {
                    0.0
                } else {
                    (a - b) * (a - b)
                }
            })
            .sum();
        let rmsd = (squared / points.len() as f64).sqrt();
        if rmsd.is_nan() {
            log::trace!("value similarity undefined for {} vs {}", first, second);
            return 0.0;
        }
        1.0 - rmsd.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Program {
        Program::variable("x", Range::new(0.0, 1.0))
    }

    fn y() -> Program {
        Program::variable("y", Range::new(0.0, 1.0))
    }

    #[test]
    fn test_equivalent_forms_score_one() {
        let first = Program::mul(x(), Program::constant(2.0));
        let second = Program::add(x(), x());
        assert_eq!(ValueSimilarity::default().similarity(Some(&first), Some(&second)), 1.0);
    }

    #[test]
    fn test_constant_offset() {
        let first = Program::add(x(), Program::constant(0.25));
        let score = ValueSimilarity::default().similarity(Some(&first), Some(&x()));
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_constants_compare_exactly() {
        let measure = ValueSimilarity::default();
        let three = Program::add(Program::constant(1.0), Program::constant(2.0));
        assert_eq!(measure.similarity(Some(&three), Some(&Program::constant(3.0))), 1.0);
        assert_eq!(measure.similarity(Some(&three), Some(&Program::constant(3.5))), 0.0);
    }

    #[test]
    fn test_no_shared_variables() {
        let measure = ValueSimilarity::default();
        assert_eq!(measure.similarity(Some(&x()), Some(&y())), 0.0);
        assert_eq!(measure.similarity(Some(&x()), Some(&Program::constant(0.5))), 0.0);
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let measure = ValueSimilarity::new(25, 42);
        let first = Program::mul(x(), y());
        let second = Program::sin(Program::add(x(), y()));
        let once = measure.similarity(Some(&first), Some(&second));
        let twice = measure.similarity(Some(&first), Some(&second));
        assert_eq!(once, twice);
        assert!((0.0..=1.0).contains(&once));
    }

    #[test]
    fn test_sample_points_cover_range() {
        let measure = ValueSimilarity::new(5, 3);
        let variables = BTreeMap::from([("x".to_string(), Range::new(0.0, 4.0))]);
        let mut values: Vec<f64> = measure
            .sample_points(&variables)
            .iter()
            .map(|bindings| bindings["x"])
            .collect();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
