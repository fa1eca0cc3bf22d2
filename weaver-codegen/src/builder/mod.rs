//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - indentation-aware line buffer
//! - [`Indent`] - indentation style

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
