//! State carried through the phases of a generation pass.

use std::{fmt, sync::Arc};

use weaver_reflect::SnapshotCache;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    error::GenerateError, reconcile::ValueComparer, render::render, script::ScriptBuilder,
    settings::GenerationSettings,
};

/// Context passed through all pipeline phases.
///
/// Owns the script for the duration of the pass. The snapshot cache is
/// borrowed so it outlives the pass and can be shared by every script of a
/// session.
pub struct GenerationContext<'a> {
    pub script: ScriptBuilder,
    pub settings: GenerationSettings,
    pub cache: &'a mut SnapshotCache,
    pub comparer: Arc<dyn ValueComparer + Send + Sync>,
    /// Set by reconciliation when any type has to be regenerated.
    pub should_rebuild: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        script: ScriptBuilder,
        settings: GenerationSettings,
        cache: &'a mut SnapshotCache,
        comparer: Arc<dyn ValueComparer + Send + Sync>,
    ) -> Self {
        Self {
            script,
            settings,
            cache,
            comparer,
            should_rebuild: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic built by the caller, usually one with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Why the script has to be regenerated, in discovery order.
    pub fn rebuild_reasons(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Info)
            .filter(|d| d.phase == super::phases::RECONCILE)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Render the script.
    ///
    /// # Errors
    ///
    /// Refuses to render while any error diagnostic is recorded; every
    /// error message is aggregated into the returned error.
    pub fn render(&self) -> Result<String, GenerateError> {
        if self.has_errors() {
            return Err(GenerateError::NamingConflicts {
                script: self.script.name().to_string(),
                conflicts: self.errors().map(|d| d.message.clone()).collect(),
            });
        }
        Ok(render(&self.script, &self.settings))
    }

    /// Take the resolved script out of the context.
    pub fn into_script(self) -> ScriptBuilder {
        self.script
    }
}

impl fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("script", &self.script.name())
            .field("settings", &self.settings)
            .field("cache", &self.cache)
            .field("should_rebuild", &self.should_rebuild)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ExactComparer;

    fn context(cache: &mut SnapshotCache) -> GenerationContext<'_> {
        GenerationContext::new(
            ScriptBuilder::new("Tags"),
            GenerationSettings::default(),
            cache,
            Arc::new(ExactComparer),
        )
    }

    #[test]
    fn test_counts_by_severity() {
        let mut cache = SnapshotCache::empty();
        let mut ctx = context(&mut cache);
        ctx.add_error("naming", "conflict");
        ctx.add_warning("reconcile", "getter threw");
        ctx.add_info("reconcile", "Tags has not been compiled yet");
        ctx.add_info("custom", "unrelated");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        let reasons: Vec<&str> = ctx.rebuild_reasons().map(|d| d.message.as_str()).collect();
        assert_eq!(reasons, vec!["Tags has not been compiled yet"]);
    }

    #[test]
    fn test_render_refused_with_errors() {
        let mut cache = SnapshotCache::empty();
        let mut ctx = context(&mut cache);
        ctx.add_error("naming", "first");
        ctx.add_error("naming", "second");

        let err = ctx.render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tags has 2 naming conflict(s): first; second"
        );
    }

    #[test]
    fn test_render_without_errors() {
        let mut cache = SnapshotCache::empty();
        let ctx = context(&mut cache);
        assert!(ctx.render().unwrap().starts_with("// <auto-generated>\n"));
    }
}
