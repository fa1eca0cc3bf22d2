//! Procedural C# script generation for Weaver.
//!
//! A script is described as a tree of desired elements, reconciled with
//! what the host compiler reports about the previous build, and rendered
//! only when something changed.
//!
//! # Module Organization
//!
//! - [`builder`] - Line-oriented output buffer (CodeBuilder, Indent)
//! - [`element`] - Element builders and their kind-specific payloads
//! - [`script`] - The element arena of one generated file
//! - [`naming`] - Deterministic identifier assignment
//! - [`reconcile`] - Comparison with previously compiled types
//! - [`render`] - C# source rendering
//! - [`pipeline`] - Phases, diagnostics and the generation context
//! - [`definitions`] - Ready-made constants scripts
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod definitions;
pub mod element;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod reconcile;
pub mod render;
pub mod script;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, Indent};
pub use element::{
    Accessor, BaseType, ConstructorBuilder, ConstructorInitializer, Declare, Element,
    ElementBuilder, ElementId, ElementKind, FieldBuilder, MatchResult, MethodBuilder,
    NamespaceBuilder, Parameter, PropertyBuilder, TypeBuilder, TypeKind,
};
pub use error::GenerateError;
pub use naming::{NameConflict, resolve_names};
pub use pipeline::{Diagnostic, GenerationContext, Phase, Pipeline, Severity};
pub use reconcile::{ExactComparer, Reconciliation, ValueComparer, reconcile_type};
pub use render::render;
pub use script::ScriptBuilder;
pub use settings::GenerationSettings;
