//! Utility functions shared across the crate.
//!
//! - [`code_generator`] - Short code generation and syntactic validation

pub mod code_generator;
