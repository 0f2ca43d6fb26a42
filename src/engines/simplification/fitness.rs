use super::simplify;
use crate::program::Program;
use std::sync::Arc;

/// Shared fitness callback used by fitness-aware operators
pub type FitnessFn = Arc<dyn Fn(&Program) -> f64 + Send + Sync>;

/// Values tried at every position by the sentinel phase
pub const SENTINELS: [f64; 3] = [f64::NEG_INFINITY, f64::NAN, f64::INFINITY];

/// Fitness-guided simplification.
///
/// Candidates are accepted only if their fitness stays within `margin` of the
/// original program's fitness and they are strictly shorter than the current
/// best:
/// 1. the algebraic simplification of the whole program;
/// 2. repeated scans substituting each sentinel at each position (followed by
///    algebraic simplification) until no substitution shortens the tree;
/// 3. the shortest acceptable sub-combination of the result.
///
/// Heuristic; the result is not guaranteed to be the shortest equivalent.
pub fn simplify_with_fitness<F>(program: &Program, fitness: F, margin: f64) -> Program
where
    F: Fn(&Program) -> f64,
{
    let target = fitness(program);
    let acceptable = |candidate: &Program| (fitness(candidate) - target).abs() <= margin;

    let mut best = program.clone();
    let algebraic = simplify(program);
    if algebraic.length() < best.length() && acceptable(&algebraic) {
        best = algebraic;
    }

    let mut rounds = 0usize;
    while let Some(shorter) = sentinel_substitution(&best, &acceptable) {
        log::trace!("sentinel substitution: {} -> {}", best, shorter);
        best = shorter;
        rounds += 1;
    }

    let combination = best
        .sub_combinations()
        .into_iter()
        .filter(|candidate| candidate.length() < best.length())
        .filter(|candidate| acceptable(candidate))
        .min_by_key(Program::length);
    if let Some(combination) = combination {
        log::trace!("sub-combination: {} -> {}", best, combination);
        best = combination;
    }

    log::debug!(
        "fitness simplification {} -> {} ({} sentinel rounds)",
        program.length(),
        best.length(),
        rounds
    );
    best
}

/// First sentinel substitution that shortens `program` and keeps it acceptable
fn sentinel_substitution<A>(program: &Program, acceptable: &A) -> Option<Program>
where
    A: Fn(&Program) -> bool,
{
    for index in 0..program.length() {
        for sentinel in SENTINELS {
            let candidate = simplify(&program.replace_at(index, &Program::constant(sentinel)));
            if candidate.length() < program.length() && acceptable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
