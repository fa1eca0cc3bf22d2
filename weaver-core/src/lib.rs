//! Core value types for the Weaver C# script generator.
//!
//! This crate provides the leaf descriptors shared by the reflection facts
//! and the script builders: type references, modifier sets, literal values
//! and identifier sanitization.

mod file;
mod ident;
mod literal;
mod modifiers;
mod type_name;

// File operations
pub use file::{File, WriteResult};
// Identifier utilities
pub use ident::{
    CSHARP_KEYWORDS, escape_keyword, is_identifier, is_keyword, to_identifier, unescape_identifier,
};
// Fundamental types
pub use literal::Literal;
pub use modifiers::{Modifiers, ParameterModifier};
pub use type_name::{NameScope, TypeName};
