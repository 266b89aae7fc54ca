//! Core types and utilities shared across the Slate compiler.
//!
//! This crate provides the error type, result alias, and source span
//! representation used by every other crate in the workspace.

pub mod error;
pub mod span;

pub use error::{Error, Result};
pub use span::Span;
