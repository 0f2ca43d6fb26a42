use gpcore::config::{ConfigManager, EngineConfig};
use gpcore::engines::generation::{CrossoverOperator, MutationOperator, OnePointCrossover};
use gpcore::engines::similarity::{
    CommonRegionSimilarity, LeafSimilarity, SimilarityMeasure, SymbolTreeSimilarity,
    TreeEditSimilarity,
};
use gpcore::engines::simplification::{simplify, simplify_with_fitness, FitnessFn};
use gpcore::{Bindings, PrimitiveSet, Program, Range};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager.load_from_file(&path)?;
    }
    let config: EngineConfig = manager.get();

    let x = Program::variable("x", Range::new(-2.0, 2.0));
    let y = Program::variable("y", Range::new(0.0, 1.0));

    // ((1.1+1)*x)+x
    let scaled = Program::add(
        Program::mul(Program::add(Program::constant(1.1), Program::constant(1.0)), x.clone()),
        x.clone(),
    );
    println!("simplify {} => {}", scaled, simplify(&scaled));

    let target = Program::add(Program::mul(x.clone(), x.clone()), y.clone());
    let bloated = Program::add(
        Program::max(Program::mul(x.clone(), x.clone()), Program::sub(y.clone(), Program::constant(10.0))),
        Program::min(y.clone(), Program::add(y.clone(), Program::constant(5.0))),
    );
    let fitness = fitness_against(target.clone());
    let shortened = simplify_with_fitness(&bloated, fitness.as_ref(), config.simplification.fitness_margin);
    println!("fitness simplify {} => {}", bloated, shortened);

    let primitives = PrimitiveSet::default_functions()
        .with_terminals([x.clone(), y.clone(), Program::constant(1.0), Program::constant(2.0)]);
    let mutation = config.operators.stochastic_mutation(&primitives, None);
    let crossover = config.operators.stochastic_crossover();
    // point mutation enumerates every combination of per-node swaps, keep the tree small
    println!("{} mutations of {}", mutation.all_mutations(Some(&target)).len(), target);
    println!(
        "{} offspring of {} and {}",
        crossover.all_offspring(Some(&bloated), Some(&target)).len(),
        bloated,
        target
    );
    println!(
        "{} one-point offspring",
        OnePointCrossover.all_offspring(Some(&bloated), Some(&target)).len()
    );

    let mut rng = StdRng::seed_from_u64(config.similarity.value_seed);
    let mut current = bloated.clone();
    for step in 0..5 {
        if let Some(next) = mutation.mutate(Some(&current), &mut rng) {
            current = next;
        }
        if let Some(child) = crossover.crossover(Some(&current), Some(&target), &mut rng) {
            current = child;
        }
        println!("step {}: {}", step, current);
    }

    let measures: Vec<Box<dyn SimilarityMeasure>> = vec![
        Box::new(LeafSimilarity),
        Box::new(CommonRegionSimilarity),
        Box::new(SymbolTreeSimilarity),
        Box::new(TreeEditSimilarity),
        Box::new(config.similarity.value_similarity()),
    ];
    for measure in &measures {
        println!(
            "{:>14}: {:.4}",
            measure.name(),
            measure.similarity(Some(&current), Some(&target))
        );
    }

    Ok(())
}

/// Negated mean absolute error against `target` on a small grid
fn fitness_against(target: Program) -> FitnessFn {
    Arc::new(move |program: &Program| {
        let mut bindings = Bindings::new();
        let mut error = 0.0;
        let mut points = 0.0;
        for i in 0..=8 {
            for j in 0..=4 {
                bindings.insert("x".to_string(), -2.0 + 0.5 * i as f64);
                bindings.insert("y".to_string(), 0.25 * j as f64);
                error += (program.evaluate(&bindings) - target.evaluate(&bindings)).abs();
                points += 1.0;
            }
        }
        -error / points
    })
}
