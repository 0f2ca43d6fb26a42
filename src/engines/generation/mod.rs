pub mod crossover;
pub mod mutation;
pub mod operators;

pub use crossover::{
    ContextPreservingCrossover, OnePointCrossover, StochasticCrossover, SubtreeCrossover,
    UniformCrossover,
};
pub use mutation::{
    FitnessSimplifyMutation, HoistMutation, PointMutation, ShrinkMutation, SimplifyMutation,
    StochasticMutation, SubtreeMutation, SwapMutation,
};
pub use operators::{CrossoverOperator, MutationOperator, ProgramGenerator};
