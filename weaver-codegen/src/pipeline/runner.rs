//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use log::debug;
use weaver_reflect::SnapshotCache;

use super::{
    GenerationContext, Phase,
    phases::{NamingPhase, ReconcilePhase},
};
use crate::{
    reconcile::{ExactComparer, ValueComparer},
    script::ScriptBuilder,
    settings::GenerationSettings,
};

/// Runs the generation phases for a script.
///
/// The built-in phases (naming, then reconciliation) always run first,
/// followed by any phases added with [`Pipeline::phase`].
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    comparer: Arc<dyn ValueComparer + Send + Sync>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            comparer: Arc::new(ExactComparer),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Use `comparer` to compare desired static values with compiled ones.
    pub fn comparer(mut self, comparer: impl ValueComparer + Send + Sync + 'static) -> Self {
        self.comparer = Arc::new(comparer);
        self
    }

    /// Run every phase on `script`.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase fails fatally. Naming conflicts and
    /// rebuild reasons are diagnostics on the returned context.
    pub fn run<'a>(
        &self,
        script: ScriptBuilder,
        settings: GenerationSettings,
        cache: &'a mut SnapshotCache,
    ) -> Result<GenerationContext<'a>> {
        let mut ctx = GenerationContext::new(script, settings, cache, Arc::clone(&self.comparer));

        let builtin_phases: Vec<Box<dyn Phase>> =
            vec![Box::new(NamingPhase), Box::new(ReconcilePhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            debug!(script = ctx.script.name(), phase = phase.name(); "Running phase");
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use weaver_core::Literal;

    use super::*;
    use crate::element::{FieldBuilder, TypeBuilder};

    struct CountingPhase {
        runs: Arc<AtomicUsize>,
    }

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Count runs"
        }

        fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            ctx.add_info(self.name(), format!("after {} diagnostics", ctx.diagnostics.len()));
            Ok(())
        }
    }

    struct FailingPhase;

    impl Phase for FailingPhase {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "Always fails"
        }

        fn run(&self, _ctx: &mut GenerationContext<'_>) -> Result<()> {
            eyre::bail!("phase failed")
        }
    }

    struct AlwaysEqual;

    impl ValueComparer for AlwaysEqual {
        fn equals(&self, _desired: &Literal, _actual: &Literal) -> bool {
            true
        }
    }

    fn layers() -> ScriptBuilder {
        let mut script = ScriptBuilder::new("Layers");
        let ty = script.add_root(TypeBuilder::static_class("Layers"));
        script.add(ty, FieldBuilder::constant("Water", 4));
        script
    }

    #[test]
    fn test_custom_phase_runs_after_builtins() {
        let runs = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().phase(CountingPhase { runs: runs.clone() });
        let mut cache = SnapshotCache::empty();

        let ctx = pipeline
            .run(layers(), GenerationSettings::default(), &mut cache)
            .expect("pipeline should succeed");

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        let last = ctx.diagnostics.last().expect("diagnostic from custom phase");
        assert_eq!(last.phase, "counting");
        assert_eq!(last.message, "after 1 diagnostics");
    }

    #[test]
    fn test_failing_phase_aborts() {
        let mut cache = SnapshotCache::empty();
        let result = Pipeline::new()
            .phase(FailingPhase)
            .run(layers(), GenerationSettings::default(), &mut cache);

        assert_eq!(result.unwrap_err().to_string(), "phase failed");
    }

    #[test]
    fn test_uncompiled_script_needs_rebuild() {
        let mut cache = SnapshotCache::empty();
        let ctx = Pipeline::new()
            .comparer(AlwaysEqual)
            .run(layers(), GenerationSettings::default(), &mut cache)
            .expect("pipeline should succeed");

        assert!(ctx.should_rebuild);
        assert!(!ctx.has_errors());
    }
}
