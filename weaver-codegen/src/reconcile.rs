//! Reconciliation of desired elements with previously compiled members.
//!
//! Decides whether a type must be regenerated and which compiled members
//! have to be kept around as obsolete stubs.

use weaver_core::{Literal, TypeName, unescape_identifier};
use weaver_reflect::{MemberKind, ReflectedMember, ReflectionSnapshot};

use crate::element::{BaseType, ElementId, ElementKind, MatchResult, Matcher};
use crate::script::ScriptBuilder;

/// Compares a desired static value with the compiled one.
pub trait ValueComparer {
    fn equals(&self, desired: &Literal, actual: &Literal) -> bool;
}

/// Compares literals exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactComparer;

impl ValueComparer for ExactComparer {
    fn equals(&self, desired: &Literal, actual: &Literal) -> bool {
        desired == actual
    }
}

/// The verdict for one type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub should_rebuild: bool,
    /// Why the type has to be regenerated, in discovery order.
    pub reasons: Vec<String>,
    /// Non-fatal problems met while comparing.
    pub warnings: Vec<String>,
    /// Compiled members without a desired counterpart, when retained.
    pub obsolete_members: Option<Vec<ReflectedMember>>,
    /// Desired elements paired with the compiled member they claimed.
    pub matches: Vec<(ElementId, ReflectedMember)>,
}

impl Reconciliation {
    fn rebuild(&mut self, reason: String) {
        self.should_rebuild = true;
        self.reasons.push(reason);
    }
}

/// Reconcile the direct members of one type element.
///
/// Nested types are only matched here; their own members are reconciled
/// separately against their own snapshot.
pub fn reconcile_type(
    script: &ScriptBuilder,
    type_id: ElementId,
    existing: Option<&ReflectionSnapshot>,
    retain_obsolete: bool,
    comparer: &dyn ValueComparer,
) -> Reconciliation {
    let mut result = Reconciliation::default();
    let element = script.element(type_id);

    let Some(existing) = existing else {
        result.rebuild(format!("{} has not been compiled yet", element.name()));
        return result;
    };

    if let Some(reason) = check_base_type(script, type_id, existing) {
        result.rebuild(reason);
    }

    let members: Vec<ElementId> = script
        .children(type_id)
        .iter()
        .copied()
        .filter(|id| script.element(*id).is_member())
        .collect();
    let mut claimed = vec![false; members.len()];
    let mut obsolete = Vec::new();
    let mut matcher = Matcher::new(comparer);

    for member in existing.members() {
        let mut found = None;
        for (index, &id) in members.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let outcome = matcher.match_member(script.element(id), member);
            if outcome.is_claimed() {
                found = Some((index, id, outcome));
                break;
            }
        }

        match found {
            Some((index, id, outcome)) => {
                claimed[index] = true;
                if let MatchResult::Mismatch(reason) = outcome {
                    result.rebuild(reason);
                }
                let desired = script.element(id);
                match (member.is_obsolete(), desired.obsolete_message().is_some()) {
                    (true, false) => {
                        result.rebuild(format!("{} is no longer obsolete", desired.name()))
                    }
                    (false, true) => {
                        result.rebuild(format!("{} should be marked obsolete", desired.name()))
                    }
                    _ => {}
                }
                result.matches.push((id, member.clone()));
            }
            None if member.is_implicit_constructor() => {}
            None if retain_obsolete && !is_redeclared(script, &members, member) => {
                if !member.is_obsolete() {
                    result.rebuild(format!(
                        "{} {} is now obsolete",
                        member.kind().as_str(),
                        member.name()
                    ));
                }
                obsolete.push(member.clone());
            }
            None => result.rebuild(format!(
                "{} {} should be removed",
                member.kind().as_str(),
                member.name()
            )),
        }
    }

    for (index, &id) in members.iter().enumerate() {
        if !claimed[index] {
            let desired = script.element(id);
            result.rebuild(format!(
                "a new member should be added: {} {}",
                desired.kind().describe(),
                describe_name(script, id)
            ));
        }
    }

    if !obsolete.is_empty() {
        result.obsolete_members = Some(obsolete);
    }
    result.warnings = matcher.into_warnings();
    result
}

/// Whether a desired member reuses the name of a compiled one, so a stub
/// for the compiled member would clash with it. Methods may share a name as
/// overloads.
fn is_redeclared(
    script: &ScriptBuilder,
    members: &[ElementId],
    member: &ReflectedMember,
) -> bool {
    if member.kind() == MemberKind::Constructor {
        return false;
    }
    members.iter().map(|id| script.element(*id)).any(|desired| {
        let both_methods =
            member.kind() == MemberKind::Method && matches!(desired.kind(), ElementKind::Method(_));
        !desired.is_constructor()
            && !both_methods
            && unescape_identifier(desired.name()) == member.name()
    })
}

fn describe_name(script: &ScriptBuilder, id: ElementId) -> String {
    let element = script.element(id);
    match element.kind() {
        ElementKind::Constructor(def) => {
            let parameters: Vec<String> = def
                .parameters
                .iter()
                .map(|p| p.parameter_type.to_string())
                .collect();
            let owner = element
                .parent()
                .map(|parent| script.element(parent).name().to_string())
                .unwrap_or_default();
            format!("{}({})", owner, parameters.join(", "))
        }
        _ => element.name().to_string(),
    }
}

fn check_base_type(
    script: &ScriptBuilder,
    type_id: ElementId,
    existing: &ReflectionSnapshot,
) -> Option<String> {
    let def = script.type_def(type_id)?;
    let expected = match &def.base_type {
        None => None,
        Some(BaseType::Custom(_)) => return None,
        Some(BaseType::Explicit(name)) => Some(name.clone()),
        Some(BaseType::Element(id)) => Some(script.type_name(*id)),
    }
    .filter(|name| *name != TypeName::object());

    let actual = existing
        .base_type()
        .filter(|name| **name != TypeName::object());

    if expected.as_ref() == actual {
        return None;
    }

    let name = script.element(type_id).name();
    Some(match expected {
        Some(expected) => format!("{} does not derive from {}", name, expected.full_name()),
        None => format!("{} should not have a base type", name),
    })
}
