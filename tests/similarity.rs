use gpcore::engines::similarity::{
    CommonRegionSimilarity, LeafSimilarity, PrimitiveSimilarity, SimilarityMeasure,
    SubCombinationSimilarity, SubProgramSimilarity, SymbolTreeSimilarity, TreeEditSimilarity,
    ValueSimilarity,
};
use gpcore::{Program, Range};

fn var(name: &str) -> Program {
    Program::variable(name, Range::default())
}

#[test]
fn test_common_region_ignores_labels() {
    // sin((z+4)*(1+x)) vs cos((3^x)-(y/2))
    let first = Program::sin(Program::mul(
        Program::add(var("z"), Program::constant(4.0)),
        Program::add(Program::constant(1.0), var("x")),
    ));
    let second = Program::cos(Program::sub(
        Program::pow(Program::constant(3.0), var("x")),
        Program::div(var("y"), Program::constant(2.0)),
    ));
    assert_eq!(CommonRegionSimilarity.similarity(Some(&first), Some(&second)), 1.0);
    assert!(TreeEditSimilarity.similarity(Some(&first), Some(&second)) < 1.0);
}

#[test]
fn test_small_edit_scores_higher_than_rewrite() {
    let base = Program::sub(Program::sin(var("x")), Program::mul(var("x"), var("y")));
    let tweaked = Program::sub(Program::sin(var("x")), Program::mul(var("x"), var("z")));
    let unrelated = Program::log(Program::constant(7.0), Program::cos(var("w")));

    let measures: Vec<Box<dyn SimilarityMeasure>> = vec![
        Box::new(LeafSimilarity),
        Box::new(PrimitiveSimilarity),
        Box::new(SubProgramSimilarity),
        Box::new(SubCombinationSimilarity),
        Box::new(SymbolTreeSimilarity),
        Box::new(TreeEditSimilarity),
    ];
    for measure in measures {
        let near = measure.similarity(Some(&base), Some(&tweaked));
        let far = measure.similarity(Some(&base), Some(&unrelated));
        assert!(near > far, "{}: {} <= {}", measure.name(), near, far);
    }
}

#[test]
fn test_value_similarity_sees_through_syntax() {
    let x = Program::variable("x", Range::new(0.0, 2.0));
    let first = Program::add(x.clone(), x.clone());
    let second = Program::mul(Program::constant(2.0), x.clone());
    let measure = ValueSimilarity::new(50, 7);
    assert_eq!(measure.similarity(Some(&first), Some(&second)), 1.0);
    assert!(TreeEditSimilarity.similarity(Some(&first), Some(&second)) < 1.0);
}
