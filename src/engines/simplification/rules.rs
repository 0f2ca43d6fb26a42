use crate::functions::primitives::FunctionKind;
use crate::program::Program;

/// Applies the first matching identity for the node's kind. Children are
/// expected to be simplified already.
pub(crate) fn rewrite(node: &Program) -> Option<Program> {
    let kind = node.kind()?;
    let args = node.children();
    match kind {
        FunctionKind::Add => addition(&args[0], &args[1]),
        FunctionKind::Sub => subtraction(&args[0], &args[1]),
        FunctionKind::Mul => multiplication(&args[0], &args[1]),
        FunctionKind::Div => division(&args[0], &args[1]),
        FunctionKind::Pow => power(&args[0], &args[1]),
        FunctionKind::Max => extremum(&args[0], &args[1], f64::NEG_INFINITY),
        FunctionKind::Min => extremum(&args[0], &args[1], f64::INFINITY),
        FunctionKind::If => conditional(&args[0], &args[1], &args[2], &args[3]),
        FunctionKind::Log | FunctionKind::Sin | FunctionKind::Cos => None,
    }
}

fn is_value(program: &Program, value: f64) -> bool {
    program.as_constant() == Some(value)
}

/// Both operand orders of a commutative pair
fn orders<'a>(a: &'a Program, b: &'a Program) -> [(&'a Program, &'a Program); 2] {
    [(a, b), (b, a)]
}

/// `k` when `scaled` is `k*base` with a constant `k`
fn coefficient_of(scaled: &Program, base: &Program) -> Option<f64> {
    if scaled.kind() != Some(FunctionKind::Mul) {
        return None;
    }
    let args = scaled.children();
    orders(&args[0], &args[1])
        .into_iter()
        .find_map(|(factor, rest)| factor.as_constant().filter(|_| rest == base))
}

/// `k` when `power` is `base^k` with a constant `k`
fn exponent_of(power: &Program, base: &Program) -> Option<f64> {
    if power.kind() != Some(FunctionKind::Pow) {
        return None;
    }
    let args = power.children();
    args[1].as_constant().filter(|_| &args[0] == base)
}

fn addition(a: &Program, b: &Program) -> Option<Program> {
    for (x, other) in orders(a, b) {
        if is_value(other, 0.0) {
            return Some(x.clone());
        }
    }
    if a == b {
        return Some(Program::mul(Program::constant(2.0), a.clone()));
    }
    for (scaled, base) in orders(a, b) {
        if let Some(k) = coefficient_of(scaled, base) {
            return Some(Program::mul(Program::constant(k + 1.0), base.clone()));
        }
    }
    None
}

fn subtraction(a: &Program, b: &Program) -> Option<Program> {
    if a == b {
        return Some(Program::constant(0.0));
    }
    if is_value(b, 0.0) {
        return Some(a.clone());
    }
    None
}

fn multiplication(a: &Program, b: &Program) -> Option<Program> {
    for (x, other) in orders(a, b) {
        if is_value(other, 1.0) {
            return Some(x.clone());
        }
        if is_value(other, 0.0) {
            return Some(Program::constant(0.0));
        }
    }
    if a == b {
        return Some(Program::pow(a.clone(), Program::constant(2.0)));
    }
    for (power, base) in orders(a, b) {
        if let Some(k) = exponent_of(power, base) {
            return Some(Program::pow(base.clone(), Program::constant(k + 1.0)));
        }
    }
    None
}

fn division(a: &Program, b: &Program) -> Option<Program> {
    if is_value(b, 1.0) {
        return Some(a.clone());
    }
    if a == b {
        return Some(Program::constant(1.0));
    }
    if is_value(a, 0.0) {
        return Some(Program::constant(0.0));
    }
    None
}

fn power(base: &Program, exponent: &Program) -> Option<Program> {
    if is_value(exponent, 1.0) {
        return Some(base.clone());
    }
    None
}

/// Shared by max (neutral `-inf`) and min (neutral `+inf`)
fn extremum(a: &Program, b: &Program, neutral: f64) -> Option<Program> {
    if a == b {
        return Some(a.clone());
    }
    for (x, other) in orders(a, b) {
        if is_value(other, neutral) {
            return Some(x.clone());
        }
    }
    None
}

fn conditional(condition: &Program, zero: &Program, positive: &Program, negative: &Program) -> Option<Program> {
    let sign = match (condition.as_constant(), condition.as_variable()) {
        (Some(value), _) => Some(if value == 0.0 {
            0
        } else if value > 0.0 {
            1
        } else {
            -1
        }),
        (None, Some(variable)) => variable.range.sign(),
        (None, None) => None,
    };
    match sign {
        Some(0) => return Some(zero.clone()),
        Some(1) => return Some(positive.clone()),
        Some(_) => return Some(negative.clone()),
        None => {}
    }

    if zero == positive && positive == negative {
        return Some(zero.clone());
    }
    None
}
