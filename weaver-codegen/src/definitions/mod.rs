//! Ready-made script definitions.
//!
//! Each definition turns project data into a [`ScriptBuilder`](crate::ScriptBuilder)
//! that the pipeline can reconcile and render.

mod constants;

pub use constants::{ConstantsContent, ConstantsScript};
