pub mod fitness_simplify;
pub mod hoist;
pub mod point;
pub mod shrink;
pub mod simplify;
pub mod stochastic;
pub mod subtree;
pub mod swap;

pub use fitness_simplify::FitnessSimplifyMutation;
pub use hoist::HoistMutation;
pub use point::PointMutation;
pub use shrink::ShrinkMutation;
pub use simplify::SimplifyMutation;
pub use stochastic::StochasticMutation;
pub use subtree::SubtreeMutation;
pub use swap::SwapMutation;
