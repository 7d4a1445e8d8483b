//! React code generation for form documents.
//!
//! Output is deterministic: the same document always compiles to
//! byte-identical source, so snapshots are stable. Iteration follows
//! document order only.

mod compiler;
mod context;
mod definitions;

pub use compiler::compile_to_react;
pub use context::{CompileOptions, CompilerContext};
pub use definitions::compile_value_definitions;
