//! Check operation - report which scripts need a rebuild.

use std::path::Path;

use eyre::Result;
use weaver_manifest::WeaverToml;

use super::pass::run_pass;
use crate::reports::{CheckReport, ScriptStatus};

/// Execute the check operation.
///
/// Runs a generation pass without writing anything.
pub fn check(file: &WeaverToml, snapshot: Option<&Path>) -> Result<CheckReport> {
    let scripts = run_pass(file, snapshot)?
        .into_iter()
        .map(|pass| ScriptStatus {
            name: pass.name,
            output: pass.output,
            up_to_date: !pass.should_rebuild,
            reasons: pass.reasons,
            warnings: pass.warnings,
            errors: pass.errors,
        })
        .collect();

    Ok(CheckReport {
        config_path: file.path().to_path_buf(),
        scripts,
    })
}
