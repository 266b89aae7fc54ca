//! Shared utilities for Slate tooling.

pub mod config;

pub use config::{Config, Package};
