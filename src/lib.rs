pub mod config;
pub mod engines;
pub mod error;
pub mod functions;
pub mod program;
pub mod types;

pub use error::{GpError, Result};
pub use functions::{FunctionKind, PrimitiveSet};
pub use program::Program;
pub use types::{Bindings, Range};
