//! Core operations.
//!
//! This module contains the business logic for weaver commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod pass;

pub use check::check;
pub use generate::{GenerateOptions, generate};
