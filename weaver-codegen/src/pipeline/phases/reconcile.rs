//! Reconcile phase - compares types with their compiled counterparts.

use eyre::Result;
use log::{debug, info};

use super::RECONCILE;
use crate::{
    element::{ElementId, ElementKind},
    pipeline::{Diagnostic, GenerationContext, Phase},
    reconcile::reconcile_type,
    script::ScriptBuilder,
};

/// Reconciles every type of the script, outer types before nested ones.
///
/// Each type is looked up in the snapshot cache by its reflection name.
/// Matched compiled members are stored on their elements, unmatched ones
/// on the type as obsolete members, and every rebuild reason is recorded
/// as an info diagnostic.
pub struct ReconcilePhase;

impl Phase for ReconcilePhase {
    fn name(&self) -> &'static str {
        RECONCILE
    }

    fn description(&self) -> &'static str {
        "Compare desired members with the compiled types"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let types = type_elements(&ctx.script);
        let mut rebuilt = 0usize;

        for &id in &types {
            let type_name = ctx.script.type_name(id).full_name();
            let existing = ctx.cache.get(&type_name);
            let result = reconcile_type(
                &ctx.script,
                id,
                existing.as_deref(),
                ctx.settings.retain_obsolete,
                ctx.comparer.as_ref(),
            );

            for (member, fact) in result.matches {
                ctx.script.element_mut(member).existing = Some(fact);
            }
            if let Some(def) = ctx.script.type_def_mut(id) {
                def.obsolete_members = result.obsolete_members.unwrap_or_default();
            }

            let location = ctx.script.qualified_name(id);
            for reason in result.reasons {
                debug!(type_name = type_name.as_str(), reason = reason.as_str(); "Rebuild reason");
                ctx.add_diagnostic(Diagnostic::info(self.name(), reason).at(location.as_str()));
            }
            for warning in result.warnings {
                ctx.add_diagnostic(Diagnostic::warning(self.name(), warning).at(location.as_str()));
            }

            if result.should_rebuild {
                rebuilt += 1;
                ctx.should_rebuild = true;
            }
        }

        info!(
            script = ctx.script.name(),
            types = types.len(),
            rebuilt = rebuilt;
            "Reconciled script"
        );
        Ok(())
    }
}

/// Type elements in pre-order, through namespaces and nested types.
fn type_elements(script: &ScriptBuilder) -> Vec<ElementId> {
    let mut types = Vec::new();
    let mut stack: Vec<ElementId> = script.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if script.element(id).is_type() {
            types.push(id);
        }
        stack.extend(script.children(id).iter().rev().copied().filter(|child| {
            matches!(
                script.element(*child).kind(),
                ElementKind::Namespace | ElementKind::Type(_)
            )
        }));
    }
    types
}
