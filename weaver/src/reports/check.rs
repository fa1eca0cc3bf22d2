//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Status of one script.
#[derive(Debug)]
pub struct ScriptStatus {
    pub name: String,
    pub output: PathBuf,
    pub up_to_date: bool,
    /// Why the script needs a rebuild.
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    /// Naming conflicts.
    pub errors: Vec<String>,
}

/// Report data from a check pass.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub scripts: Vec<ScriptStatus>,
}

impl CheckReport {
    /// Whether the check passed (no naming conflicts).
    pub fn is_valid(&self) -> bool {
        self.scripts.iter().all(|s| s.errors.is_empty())
    }

    /// Number of scripts that need a rebuild.
    pub fn stale_count(&self) -> usize {
        self.scripts.iter().filter(|s| !s.up_to_date).count()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for script in &self.scripts {
            for error in &script.errors {
                out.error(error);
            }
            for warning in &script.warnings {
                out.warning(warning);
            }
        }

        for script in &self.scripts {
            let status = if script.up_to_date {
                "up to date"
            } else {
                "needs rebuild"
            };
            out.key_value(
                &script.name,
                &format!("{} ({})", status, script.output.display()),
            );
            for reason in &script.reasons {
                out.list_item(reason);
            }
        }

        out.newline();
        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid, {} of {} script(s) need a rebuild",
                self.config_path.display(),
                self.stale_count(),
                self.scripts.len()
            ));
        }
    }
}
