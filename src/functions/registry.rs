use crate::functions::primitives::FunctionKind;
use crate::program::Program;
use std::collections::BTreeSet;

/// Catalog of terminal and function templates.
///
/// Function templates carry `0` constants as children; only their kind and
/// arity matter. The set only grows: `add` is a union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimitiveSet {
    terminals: BTreeSet<Program>,
    functions: BTreeSet<Program>,
}

impl PrimitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One template per function kind and no terminals
    pub fn default_functions() -> Self {
        let mut set = Self::new();
        for kind in FunctionKind::ALL {
            if let Some(template) = Program::function(kind, vec![Program::constant(0.0); kind.arity()]) {
                set.functions.insert(template);
            }
        }
        set
    }

    /// Builds a catalog from arbitrary programs: leaves become terminals,
    /// everything else is reduced to its function template.
    pub fn from_programs<I: IntoIterator<Item = Program>>(programs: I) -> Self {
        let mut set = Self::new();
        for program in programs {
            set.insert(program);
        }
        set
    }

    pub fn with_terminals<I: IntoIterator<Item = Program>>(mut self, terminals: I) -> Self {
        for terminal in terminals {
            self.insert(terminal);
        }
        self
    }

    /// Union with another catalog; duplicates are ignored
    pub fn add(&mut self, other: &PrimitiveSet) {
        self.terminals.extend(other.terminals.iter().cloned());
        self.functions.extend(other.functions.iter().cloned());
    }

    fn insert(&mut self, program: Program) {
        if program.is_leaf() {
            self.terminals.insert(program);
        } else {
            self.functions.insert(program.template());
        }
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Program> {
        self.terminals.iter()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Program> {
        self.functions.iter()
    }

    /// Templates that can stand in for a node with `arity` children
    pub fn with_arity(&self, arity: usize) -> Vec<&Program> {
        if arity == 0 {
            return self.terminals.iter().collect();
        }
        self.functions
            .iter()
            .filter(|function| function.arity() == arity)
            .collect()
    }

    pub fn contains(&self, program: &Program) -> bool {
        if program.is_leaf() {
            self.terminals.contains(program)
        } else {
            self.functions.contains(&program.template())
        }
    }

    pub fn len(&self) -> usize {
        self.terminals.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty() && self.functions.is_empty()
    }
}
