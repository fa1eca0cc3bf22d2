//! Generation pipeline for one script.
//!
//! A [`Pipeline`] runs its phases over a [`GenerationContext`]:
//!
//! - naming assigns every element its final identifier
//! - reconciliation compares each type with its compiled counterpart
//!
//! Problems are collected as [`Diagnostic`]s rather than aborting the pass,
//! so a caller sees every conflict and rebuild reason at once.
//!
//! # Example
//!
//! ```
//! use weaver_codegen::{FieldBuilder, GenerationSettings, Pipeline, ScriptBuilder, TypeBuilder};
//! use weaver_reflect::SnapshotCache;
//!
//! let mut script = ScriptBuilder::new("Tags");
//! let tags = script.add_root(TypeBuilder::static_class("Tags"));
//! script.add(tags, FieldBuilder::constant("Player", "Player"));
//!
//! let mut cache = SnapshotCache::empty();
//! let ctx = Pipeline::new()
//!     .run(script, GenerationSettings::default(), &mut cache)
//!     .unwrap();
//!
//! assert!(ctx.should_rebuild);
//! assert!(ctx.render().unwrap().contains("public const string Player = \"Player\";"));
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use runner::Pipeline;
