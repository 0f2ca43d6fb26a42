pub mod generation;
pub mod similarity;
pub mod simplification;
