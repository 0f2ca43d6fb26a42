use serde::{Deserialize, Serialize};

/// Operator kinds a function node can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Log,
    Min,
    Max,
    Sin,
    Cos,
    If,
}

/// Static metadata shared by every node of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub ui_name: &'static str,
    pub label: &'static str,
    pub arity: usize,
    pub commutative: bool,
}

const KIND_TABLE: [KindInfo; 11] = [
    KindInfo { ui_name: "Addition", label: "+", arity: 2, commutative: true },
    KindInfo { ui_name: "Subtraction", label: "-", arity: 2, commutative: false },
    KindInfo { ui_name: "Multiplication", label: "*", arity: 2, commutative: true },
    KindInfo { ui_name: "Division", label: "/", arity: 2, commutative: false },
    KindInfo { ui_name: "Power", label: "^", arity: 2, commutative: false },
    KindInfo { ui_name: "Logarithm", label: "log", arity: 2, commutative: false },
    KindInfo { ui_name: "Minimum", label: "min", arity: 2, commutative: true },
    KindInfo { ui_name: "Maximum", label: "max", arity: 2, commutative: true },
    KindInfo { ui_name: "Sine", label: "sin", arity: 1, commutative: false },
    KindInfo { ui_name: "Cosine", label: "cos", arity: 1, commutative: false },
    KindInfo { ui_name: "Conditional", label: "if", arity: 4, commutative: false },
];

impl FunctionKind {
    pub const ALL: [FunctionKind; 11] = [
        FunctionKind::Add,
        FunctionKind::Sub,
        FunctionKind::Mul,
        FunctionKind::Div,
        FunctionKind::Pow,
        FunctionKind::Log,
        FunctionKind::Min,
        FunctionKind::Max,
        FunctionKind::Sin,
        FunctionKind::Cos,
        FunctionKind::If,
    ];

    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    pub fn ui_name(self) -> &'static str {
        self.info().ui_name
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn arity(self) -> usize {
        self.info().arity
    }

    pub fn is_commutative(self) -> bool {
        self.info().commutative
    }

    pub fn from_label(label: &str) -> Option<FunctionKind> {
        Self::ALL.iter().copied().find(|kind| kind.label() == label)
    }

    /// Numeric semantics. `args` must hold exactly `arity()` values.
    pub fn apply(self, args: &[f64]) -> f64 {
        match self {
            FunctionKind::Add => args[0] + args[1],
            FunctionKind::Sub => args[0] - args[1],
            FunctionKind::Mul => args[0] * args[1],
            FunctionKind::Div => args[0] / args[1],
            FunctionKind::Pow => args[0].powf(args[1]),
            FunctionKind::Log => args[0].ln() / args[1].ln(),
            // NaN propagates, unlike f64::min/max
            FunctionKind::Min => {
                if args[0].is_nan() || args[1].is_nan() {
                    f64::NAN
                } else {
                    args[0].min(args[1])
                }
            }
            FunctionKind::Max => {
                if args[0].is_nan() || args[1].is_nan() {
                    f64::NAN
                } else {
                    args[0].max(args[1])
                }
            }
            FunctionKind::Sin => args[0].sin(),
            FunctionKind::Cos => args[0].cos(),
            FunctionKind::If => {
                if args[0] == 0.0 {
                    args[1]
                } else if args[0] > 0.0 {
                    args[2]
                } else {
                    args[3]
                }
            }
        }
    }

    /// Normal-notation rendering from the children's expressions
    pub fn render(self, args: &[&str]) -> String {
        match self {
            FunctionKind::Add => format!("({}+{})", args[0], args[1]),
            FunctionKind::Sub => format!("({}-{})", args[0], args[1]),
            FunctionKind::Mul => format!("({}*{})", args[0], args[1]),
            FunctionKind::Div => format!("({}/{})", args[0], args[1]),
            FunctionKind::Pow => format!("({}^{})", args[0], args[1]),
            FunctionKind::If => format!("({}?{}:{}:{})", args[0], args[1], args[2], args[3]),
            FunctionKind::Log | FunctionKind::Min | FunctionKind::Max => {
                format!("{}({},{})", self.label(), args[0], args[1])
            }
            FunctionKind::Sin | FunctionKind::Cos => format!("{}({})", self.label(), args[0]),
        }
    }
}

/// Renders a constant the way it appears inside expressions
pub fn render_constant(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // -0 renders like 0
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
