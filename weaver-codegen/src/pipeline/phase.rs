//! Generation phase trait.

use eyre::Result;

use super::GenerationContext;

/// Name and description of a phase, for listings.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step of a generation pass.
///
/// Built-in phases:
/// - `NamingPhase` assigns final identifiers
/// - `ReconcilePhase` compares types with their compiled counterparts
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// Name used as the `phase` of the diagnostics it records.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error only if the phase cannot continue at all. Problems
    /// with the script itself are recorded as diagnostics.
    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
