//! Errors surfaced to the caller of a generation pass.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Siblings that could not be given distinct names. Rendering is
    /// suppressed until the script definition is fixed.
    #[error("{script} has {} naming conflict(s): {}", .conflicts.len(), .conflicts.join("; "))]
    NamingConflicts {
        script: String,
        conflicts: Vec<String>,
    },
}
