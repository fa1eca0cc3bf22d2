//! Naming phase - assigns final identifiers.

use eyre::Result;
use log::debug;

use super::NAMING;
use crate::{
    naming::resolve_names,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Resolves every element name and records unrecoverable conflicts as
/// errors, located at the element that could not be placed.
pub struct NamingPhase;

impl Phase for NamingPhase {
    fn name(&self) -> &'static str {
        NAMING
    }

    fn description(&self) -> &'static str {
        "Assign unique identifiers to sibling elements"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let conflicts = resolve_names(&mut ctx.script);
        for conflict in conflicts {
            let message = conflict.message(&ctx.script);
            debug!(script = ctx.script.name(), name = conflict.name.as_str(); "Unresolved naming conflict");
            let diagnostic =
                Diagnostic::error(self.name(), message).at(ctx.script.qualified_name(conflict.second));
            ctx.add_diagnostic(diagnostic);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use weaver_reflect::SnapshotCache;

    use super::*;
    use crate::{
        element::{FieldBuilder, TypeBuilder},
        reconcile::ExactComparer,
        script::ScriptBuilder,
        settings::GenerationSettings,
    };

    fn run(script: ScriptBuilder) -> Vec<Diagnostic> {
        let mut cache = SnapshotCache::empty();
        let mut ctx = GenerationContext::new(
            script,
            GenerationSettings::default(),
            &mut cache,
            Arc::new(ExactComparer),
        );
        NamingPhase.run(&mut ctx).expect("naming never fails");
        ctx.diagnostics
    }

    #[test]
    fn test_conflict_becomes_error() {
        let mut script = ScriptBuilder::new("Tags");
        let ty = script.add_root(TypeBuilder::static_class("Tags"));
        script.add(ty, FieldBuilder::constant("!", "!"));
        script.add(ty, FieldBuilder::constant("?", "?"));

        let diagnostics = run(script);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(
            diagnostics[0].message,
            "naming conflict: '!' and '?' both resolve to '_'"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("Tags._"));
    }

    #[test]
    fn test_distinct_names_record_nothing() {
        let mut script = ScriptBuilder::new("Tags");
        let ty = script.add_root(TypeBuilder::static_class("Tags"));
        script.add(ty, FieldBuilder::constant("Player", "Player"));
        script.add(ty, FieldBuilder::constant("Enemy", "Enemy"));

        assert!(run(script).is_empty());
    }
}
