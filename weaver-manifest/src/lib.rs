//! `weaver.toml` parsing and validation.
//!
//! A manifest lists the constants scripts of a project together with the
//! settings shared by every generation pass. Parse failures and validation
//! errors are reported as [`miette`] diagnostics with spans into the file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    Manifest, ParseContext, ScriptConfig, ScriptKind, SettingsConfig, ValueEntry, WeaverToml,
    parse_manifest,
};
