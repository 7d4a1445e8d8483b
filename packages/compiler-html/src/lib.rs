//! Plain HTML form generation.
//!
//! The second code-generation target: no framework, just markup. Output is
//! deterministic for snapshot testing.

mod compiler;

pub use compiler::{compile_to_html, CompileOptions};

#[cfg(test)]
mod tests;
