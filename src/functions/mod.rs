pub mod primitives;
pub mod registry;

pub use primitives::{FunctionKind, KindInfo};
pub use registry::PrimitiveSet;
