//! Built-in generation phases.
//!
//! - [`NamingPhase`] assigns final identifiers
//! - [`ReconcilePhase`] compares types with their compiled counterparts

mod naming;
mod reconcile;

pub use naming::NamingPhase;
pub use reconcile::ReconcilePhase;

/// Phase name of [`NamingPhase`].
pub const NAMING: &str = "naming";
/// Phase name of [`ReconcilePhase`].
pub const RECONCILE: &str = "reconcile";
