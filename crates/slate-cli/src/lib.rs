//! Slate CLI library for testing and reusability.

pub mod compiler;
pub mod pipeline;
pub mod utils;

pub use compiler::Compiler;
pub use slate_utils::Config;
