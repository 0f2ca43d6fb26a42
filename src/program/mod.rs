pub mod index;
pub mod node;

pub use index::AlignedPosition;
pub use node::{compare_programs, Node, Program, Variable};
