use crate::functions::primitives::{render_constant, FunctionKind};
use crate::types::{Bindings, Range};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Named input of an expression with its declared sampling range
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub range: Range,
}

/// What a program node is, independent of its children
#[derive(Debug, Clone)]
pub enum Node {
    Constant(f64),
    Variable(Variable),
    Function(FunctionKind),
}

impl Node {
    /// Rank used to order and distinguish variants
    fn rank(&self) -> u8 {
        match self {
            Node::Constant(_) => 0,
            Node::Variable(_) => 1,
            Node::Function(_) => 2,
        }
    }
}

struct ProgramData {
    node: Node,
    children: Vec<Program>,
    expression: String,
    length: u16,
    hash: u64,
}

/// Immutable expression tree node.
///
/// Subtrees are shared between programs through `Arc`, so cloning is cheap and
/// every transformation builds a new root while reusing untouched branches.
/// Expression, length and structural hash are computed once at construction.
/// Operands of commutative kinds are stored in canonical order.
#[derive(Clone)]
pub struct Program(Arc<ProgramData>);

impl Program {
    pub fn constant(value: f64) -> Program {
        Self::assemble(Node::Constant(value), Vec::new())
    }

    pub fn variable(name: impl Into<String>, range: Range) -> Program {
        let name = name.into();
        Self::assemble(Node::Variable(Variable { name, range }), Vec::new())
    }

    /// Arity-checked function constructor
    pub fn function(kind: FunctionKind, children: Vec<Program>) -> Option<Program> {
        if children.len() != kind.arity() {
            return None;
        }
        Some(Self::assemble(Node::Function(kind), children))
    }

    pub fn add(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Add), vec![left, right])
    }

    pub fn sub(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Sub), vec![left, right])
    }

    pub fn mul(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Mul), vec![left, right])
    }

    pub fn div(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Div), vec![left, right])
    }

    pub fn pow(base: Program, exponent: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Pow), vec![base, exponent])
    }

    pub fn log(value: Program, base: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Log), vec![value, base])
    }

    pub fn min(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Min), vec![left, right])
    }

    pub fn max(left: Program, right: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Max), vec![left, right])
    }

    pub fn sin(operand: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Sin), vec![operand])
    }

    pub fn cos(operand: Program) -> Program {
        Self::assemble(Node::Function(FunctionKind::Cos), vec![operand])
    }

    /// `(condition?zero:positive:negative)`
    pub fn cond(condition: Program, zero: Program, positive: Program, negative: Program) -> Program {
        Self::assemble(
            Node::Function(FunctionKind::If),
            vec![condition, zero, positive, negative],
        )
    }

    /// New program of the same kind with the given children, or `None` if the
    /// child count does not match the kind's arity.
    pub fn create_new(&self, children: Vec<Program>) -> Option<Program> {
        match &self.0.node {
            Node::Function(kind) => Program::function(*kind, children),
            _ if children.is_empty() => Some(self.clone()),
            _ => None,
        }
    }

    /// Same kind, new children; callers guarantee the arity
    pub(crate) fn with_children(&self, children: Vec<Program>) -> Program {
        match &self.0.node {
            Node::Function(kind) => Self::assemble(Node::Function(*kind), children),
            _ => self.clone(),
        }
    }

    /// Catalog form of this node: terminals as-is, functions with `0` children
    pub fn template(&self) -> Program {
        match &self.0.node {
            Node::Function(kind) => Self::assemble(
                Node::Function(*kind),
                vec![Program::constant(0.0); kind.arity()],
            ),
            _ => self.clone(),
        }
    }

    fn assemble(node: Node, mut children: Vec<Program>) -> Program {
        if let Node::Function(kind) = &node {
            if kind.is_commutative() {
                children.sort_by(compare_programs);
            }
        }

        let expression = match &node {
            Node::Constant(value) => render_constant(*value),
            Node::Variable(variable) => variable.name.clone(),
            Node::Function(kind) => {
                let args: Vec<&str> = children.iter().map(Program::expression).collect();
                kind.render(&args)
            }
        };

        let length = children
            .iter()
            .fold(1u16, |total, child| total.saturating_add(child.0.length));

        let mut hasher = DefaultHasher::new();
        node.rank().hash(&mut hasher);
        match &node {
            Node::Function(kind) => kind.hash(&mut hasher),
            _ => expression.hash(&mut hasher),
        }
        for child in &children {
            child.0.hash.hash(&mut hasher);
        }
        let hash = hasher.finish();

        Program(Arc::new(ProgramData {
            node,
            children,
            expression,
            length,
            hash,
        }))
    }

    /// Same allocation, i.e. an untouched shared subtree
    pub(crate) fn shares_root(&self, other: &Program) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn node(&self) -> &Node {
        &self.0.node
    }

    /// Token identifying the node kind: the rendered value for constants, the
    /// name for variables and the operator symbol for functions.
    pub fn label(&self) -> &str {
        match &self.0.node {
            Node::Function(kind) => kind.label(),
            _ => &self.0.expression,
        }
    }

    pub fn expression(&self) -> &str {
        &self.0.expression
    }

    pub fn children(&self) -> &[Program] {
        &self.0.children
    }

    pub fn length(&self) -> usize {
        self.0.length as usize
    }

    pub fn arity(&self) -> usize {
        self.0.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    pub fn kind(&self) -> Option<FunctionKind> {
        match &self.0.node {
            Node::Function(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_commutative(&self) -> bool {
        self.kind().is_some_and(FunctionKind::is_commutative)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.0.node, Node::Constant(_))
    }

    pub fn as_constant(&self) -> Option<f64> {
        match &self.0.node {
            Node::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match &self.0.node {
            Node::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    /// Evaluates with no variable bindings; variables yield NaN
    pub fn compute(&self) -> f64 {
        self.evaluate(&Bindings::new())
    }

    /// Recursive numeric evaluation. Division by zero and friends produce IEEE
    /// infinities or NaN.
    pub fn evaluate(&self, bindings: &Bindings) -> f64 {
        match &self.0.node {
            Node::Constant(value) => *value,
            Node::Variable(variable) => bindings.get(&variable.name).copied().unwrap_or(f64::NAN),
            Node::Function(kind) => {
                let mut args = [0.0; 4];
                for (slot, child) in args.iter_mut().zip(&self.0.children) {
                    *slot = child.evaluate(bindings);
                }
                kind.apply(&args[..self.0.children.len()])
            }
        }
    }
}

/// Ordinal comparison of expressions, with a structural tie-break so the
/// order stays total and consistent with equality.
pub fn compare_programs(first: &Program, second: &Program) -> Ordering {
    first.cmp(second)
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        if self.0.hash != other.0.hash || self.0.length != other.0.length {
            return false;
        }
        self.0.node.rank() == other.0.node.rank()
            && self.label() == other.label()
            && self.0.children == other.0.children
    }
}

impl Eq for Program {}

impl Hash for Program {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl Ord for Program {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .expression
            .cmp(&other.0.expression)
            .then_with(|| self.0.node.rank().cmp(&other.0.node.rank()))
            .then_with(|| self.label().cmp(other.label()))
            .then_with(|| self.0.children.cmp(&other.0.children))
    }
}

impl PartialOrd for Program {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.expression)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", self.0.expression)
    }
}
