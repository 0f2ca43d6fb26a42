pub mod context_preserving;
pub mod one_point;
pub mod stochastic;
pub mod subtree;
pub mod uniform;

pub use context_preserving::ContextPreservingCrossover;
pub use one_point::OnePointCrossover;
pub use stochastic::StochasticCrossover;
pub use subtree::SubtreeCrossover;
pub use uniform::UniformCrossover;
