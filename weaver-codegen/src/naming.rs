//! Deterministic identifier assignment for sibling elements.
//!
//! Every element first gets its primary name: the name source with invalid
//! characters dropped. When two siblings collide, both switch to their
//! fallback name, which replaces invalid characters with `_` instead. A
//! collision between two fallback names cannot be resolved and is reported
//! as a [`NameConflict`].

use std::collections::VecDeque;

use indexmap::IndexMap;
use log::trace;
use weaver_core::to_identifier;

use crate::element::{ElementId, ElementKind};
use crate::script::{ScriptBuilder, namespace_identifier};

/// Two siblings that resolve to the same identifier even after fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    /// The element that kept the name.
    pub first: ElementId,
    /// The element that could not be placed.
    pub second: ElementId,
    /// The contested identifier.
    pub name: String,
}

impl NameConflict {
    /// Human readable description naming both sources.
    pub fn message(&self, script: &ScriptBuilder) -> String {
        format!(
            "naming conflict: '{}' and '{}' both resolve to '{}'",
            script.element(self.first).name_source(),
            script.element(self.second).name_source(),
            self.name
        )
    }
}

/// Assign final names to every element of the script.
///
/// Parents are resolved before their children so members can be compared
/// against the final name of their declaring type.
pub fn resolve_names(script: &mut ScriptBuilder) -> Vec<NameConflict> {
    let mut conflicts = Vec::new();
    let roots = script.roots().to_vec();
    resolve_siblings(script, &roots, None, &mut conflicts);

    let mut pending: VecDeque<ElementId> = roots.into();
    while let Some(id) = pending.pop_front() {
        let children = script.children(id).to_vec();
        if children.is_empty() {
            continue;
        }
        let declaring = match script.element(id).kind() {
            ElementKind::Type(_) => Some(script.element(id).name().to_string()),
            _ => None,
        };
        resolve_siblings(script, &children, declaring.as_deref(), &mut conflicts);
        pending.extend(children);
    }

    conflicts
}

/// Resolve one group of siblings in declaration order.
pub fn resolve_siblings(
    script: &mut ScriptBuilder,
    siblings: &[ElementId],
    declaring_type: Option<&str>,
    conflicts: &mut Vec<NameConflict>,
) {
    let mut queue = VecDeque::new();
    for &id in siblings {
        if script.element(id).is_constructor() {
            if let Some(declaring_type) = declaring_type {
                let element = script.element_mut(id);
                element.name = declaring_type.to_string();
                element.is_fallback_name = false;
            }
            continue;
        }
        assign_primary(script, id, declaring_type);
        queue.push_back(id);
    }

    let mut placed: IndexMap<String, ElementId> = IndexMap::new();
    while let Some(id) = queue.pop_front() {
        let name = script.element(id).name().to_string();
        let Some(&holder) = placed.get(&name) else {
            placed.insert(name, id);
            continue;
        };

        let mut renamed = false;
        if !script.element(holder).is_fallback_name() {
            placed.shift_remove(&name);
            assign_fallback(script, holder, declaring_type);
            queue.push_back(holder);
            renamed = true;
        }
        if !script.element(id).is_fallback_name() {
            assign_fallback(script, id, declaring_type);
            renamed = true;
        }

        if renamed {
            queue.push_back(id);
        } else {
            conflicts.push(NameConflict {
                first: holder,
                second: id,
                name,
            });
        }
    }
}

fn assign_primary(script: &mut ScriptBuilder, id: ElementId, declaring_type: Option<&str>) {
    let element = script.element(id);
    let primary = sanitize(&element.kind, element.name_source(), false);
    if declaring_type == Some(primary.as_str()) {
        assign_fallback(script, id, declaring_type);
        return;
    }

    let element = script.element_mut(id);
    element.name = primary;
    element.is_fallback_name = false;
}

fn assign_fallback(script: &mut ScriptBuilder, id: ElementId, declaring_type: Option<&str>) {
    let element = script.element(id);
    let mut fallback = sanitize(&element.kind, element.name_source(), true);
    if declaring_type == Some(fallback.as_str()) {
        fallback.insert(0, '_');
    }
    trace!(
        source = element.name_source(),
        fallback = fallback.as_str();
        "Using fallback name"
    );

    let element = script.element_mut(id);
    element.name = fallback;
    element.is_fallback_name = true;
}

fn sanitize(kind: &ElementKind, source: &str, replace_with_underscores: bool) -> String {
    match kind {
        ElementKind::Namespace => namespace_identifier(source, replace_with_underscores),
        _ => to_identifier(source, replace_with_underscores),
    }
}
