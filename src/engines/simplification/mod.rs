//! Algebraic simplification of programs.
//!
//! `simplify` is a single bottom-up pass: children are simplified first, a node
//! whose children are all constants collapses to its computed value, and
//! otherwise at most one identity from [`rules`] is applied. The result is not
//! iterated to a fixed point.

pub mod fitness;
mod rules;

pub use fitness::{simplify_with_fitness, FitnessFn, SENTINELS};

use crate::program::Program;

pub fn simplify(program: &Program) -> Program {
    if program.is_leaf() {
        return program.clone();
    }

    let children: Vec<Program> = program.children().iter().map(simplify).collect();
    let rebuilt = program.with_children(children);
    if rebuilt.children().iter().all(Program::is_constant) {
        return Program::constant(rebuilt.compute());
    }
    rules::rewrite(&rebuilt).unwrap_or(rebuilt)
}
