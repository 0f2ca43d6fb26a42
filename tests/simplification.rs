use gpcore::engines::simplification::{simplify, simplify_with_fitness};
use gpcore::{Bindings, Program, Range};

fn x() -> Program {
    Program::variable("x", Range::new(-1.0, 1.0))
}

#[test]
fn test_like_terms_are_collected() {
    // ((1.1+1)*x)+x
    let program = Program::add(
        Program::mul(Program::add(Program::constant(1.1), Program::constant(1.0)), x()),
        x(),
    );
    assert_eq!(simplify(&program), Program::mul(x(), Program::constant(3.1)));
}

#[test]
fn test_conditional_with_zero_condition() {
    // (x*0)?(x-0):log(3,0):max(3,1)
    let program = Program::cond(
        Program::mul(x(), Program::constant(0.0)),
        Program::sub(x(), Program::constant(0.0)),
        Program::log(Program::constant(3.0), Program::constant(0.0)),
        Program::max(Program::constant(3.0), Program::constant(1.0)),
    );
    assert_eq!(simplify(&program), x());
}

#[test]
fn test_simplified_program_evaluates_the_same() {
    let program = Program::sub(
        Program::add(Program::mul(x(), Program::constant(1.0)), Program::constant(0.0)),
        Program::div(x(), Program::constant(1.0)),
    );
    let simplified = simplify(&program);
    assert!(simplified.length() < program.length());

    let mut bindings = Bindings::new();
    for value in [-1.0, -0.25, 0.0, 0.5, 1.0] {
        bindings.insert("x".to_string(), value);
        assert_eq!(simplified.evaluate(&bindings), program.evaluate(&bindings));
    }
}

#[test]
fn test_fitness_guided_removes_dead_branch() {
    // min(x, x+5) equals x on [-1, 1]
    let program = Program::min(x(), Program::add(x(), Program::constant(5.0)));
    let fitness = |candidate: &Program| {
        let mut bindings = Bindings::new();
        (0..=10)
            .map(|step| {
                let value = -1.0 + 0.2 * step as f64;
                bindings.insert("x".to_string(), value);
                -(candidate.evaluate(&bindings) - value).abs()
            })
            .sum::<f64>()
    };
    assert_eq!(simplify_with_fitness(&program, fitness, 1e-9), x());
}
