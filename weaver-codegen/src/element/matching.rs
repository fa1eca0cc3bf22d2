//! Kind-specific comparison of desired elements against compiled members.

use weaver_core::unescape_identifier;
use weaver_reflect::{
    GetterResult, ReflectedAccessor, ReflectedConstructor, ReflectedField, ReflectedMember,
    ReflectedMethod, ReflectedParameter, ReflectedProperty, ReflectedType,
};

use super::{
    Accessor, ConstructorDef, Element, ElementKind, FieldDef, MethodDef, Parameter, PropertyDef,
};
use crate::reconcile::ValueComparer;

/// Outcome of comparing one element with one compiled member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The member is something else.
    NoMatch,
    /// The member is the compiled form of the element.
    Match,
    /// The member corresponds to the element but its shape changed.
    Mismatch(String),
}

impl MatchResult {
    /// Whether the member was claimed by the element.
    pub fn is_claimed(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// Compares elements with compiled members, collecting non-fatal warnings.
pub(crate) struct Matcher<'a> {
    comparer: &'a dyn ValueComparer,
    warnings: Vec<String>,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(comparer: &'a dyn ValueComparer) -> Self {
        Self {
            comparer,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    pub(crate) fn match_member(
        &mut self,
        element: &Element,
        existing: &ReflectedMember,
    ) -> MatchResult {
        match (&element.kind, existing) {
            (ElementKind::Field(def), ReflectedMember::Field(field)) => {
                self.match_field(element, def, field)
            }
            (ElementKind::Field(def), ReflectedMember::Property(stub)) if stub.is_obsolete => {
                match_field_stub(element, def, stub)
            }
            (ElementKind::Property(def), ReflectedMember::Property(property)) => {
                self.match_property(element, def, property)
            }
            (ElementKind::Method(def), ReflectedMember::Method(method)) => {
                match_method(element, def, method)
            }
            (ElementKind::Constructor(def), ReflectedMember::Constructor(ctor)) => {
                match_constructor(element, def, ctor)
            }
            (ElementKind::Type(_), ReflectedMember::NestedType(ty)) => match_nested_type(element, ty),
            _ => MatchResult::NoMatch,
        }
    }

    fn match_field(
        &mut self,
        element: &Element,
        def: &FieldDef,
        field: &ReflectedField,
    ) -> MatchResult {
        if !is_named(element, &field.name) {
            return MatchResult::NoMatch;
        }
        if field.field_type != def.field_type {
            return MatchResult::Mismatch(format!(
                "{} is not a {} field",
                element.name, def.field_type
            ));
        }

        let modifiers = element.modifiers.normalized();
        if field.modifiers.normalized() != modifiers {
            return MatchResult::Mismatch(format!("{} is not {}", element.name, modifiers));
        }

        if modifiers.is_static() {
            if let (Some(desired), Some(actual)) = (&def.value, &field.value) {
                if !self.comparer.equals(desired, actual) {
                    return MatchResult::Mismatch(format!(
                        "{} value changed from {} to {}",
                        element.name, actual, desired
                    ));
                }
            }
        }

        MatchResult::Match
    }

    fn match_property(
        &mut self,
        element: &Element,
        def: &PropertyDef,
        property: &ReflectedProperty,
    ) -> MatchResult {
        if !is_named(element, &property.name) {
            return MatchResult::NoMatch;
        }
        if property.property_type != def.property_type {
            return MatchResult::Mismatch(format!(
                "{} is not a {} property",
                element.name, def.property_type
            ));
        }

        let modifiers = element.modifiers.normalized();
        if property.modifiers.normalized() != modifiers {
            return MatchResult::Mismatch(format!("{} is not {}", element.name, modifiers));
        }

        for (accessor, desired, actual) in [
            ("getter", &def.getter, &property.getter),
            ("setter", &def.setter, &property.setter),
        ] {
            if let Some(reason) = compare_accessor(element, accessor, desired, actual) {
                return MatchResult::Mismatch(reason);
            }
        }

        match (&def.expected_value, &property.value) {
            (Some(expected), Some(GetterResult::Value(actual))) => {
                if !self.comparer.equals(expected, actual) {
                    return MatchResult::Mismatch(format!(
                        "{} returns {} instead of {}",
                        element.name, actual, expected
                    ));
                }
            }
            (Some(_), Some(GetterResult::Threw(message))) => {
                let warning = format!(
                    "{} getter threw while checking its value: {}",
                    element.name, message
                );
                log::warn!(member = element.name.as_str(); "{}", warning);
                self.warnings.push(warning);
            }
            _ => {}
        }

        MatchResult::Match
    }
}

/// Compiled names carry no verbatim `@`, element names may.
fn is_named(element: &Element, compiled: &str) -> bool {
    unescape_identifier(&element.name) == compiled
}

/// A removed field is kept as an obsolete property stub. A field of the
/// same name claims the stub back.
fn match_field_stub(element: &Element, def: &FieldDef, stub: &ReflectedProperty) -> MatchResult {
    if !is_named(element, &stub.name) {
        return MatchResult::NoMatch;
    }
    if stub.property_type != def.field_type {
        return MatchResult::Mismatch(format!(
            "{} is not a {} field",
            element.name, def.field_type
        ));
    }
    MatchResult::Match
}

fn compare_accessor(
    element: &Element,
    accessor: &str,
    desired: &Option<Accessor>,
    actual: &Option<ReflectedAccessor>,
) -> Option<String> {
    match (desired, actual) {
        (Some(desired), Some(actual)) => {
            let modifiers = desired.effective_modifiers(element.modifiers).normalized();
            if actual.modifiers.normalized() != modifiers {
                Some(format!(
                    "{} {} is not {}",
                    element.name,
                    accessor,
                    modifiers.visibility()
                ))
            } else {
                None
            }
        }
        (Some(_), None) => Some(format!("{} has no {}", element.name, accessor)),
        (None, Some(_)) => Some(format!("{} should not have a {}", element.name, accessor)),
        (None, None) => None,
    }
}

fn parameters_match(desired: &[Parameter], actual: &[ReflectedParameter]) -> bool {
    desired.len() == actual.len()
        && desired.iter().zip(actual).all(|(desired, actual)| {
            desired.parameter_type == actual.parameter_type && desired.modifier == actual.modifier
        })
}

fn match_method(element: &Element, def: &MethodDef, method: &ReflectedMethod) -> MatchResult {
    if !is_named(element, &method.name) || !parameters_match(&def.parameters, &method.parameters) {
        return MatchResult::NoMatch;
    }
    if method.return_type != def.return_type {
        return MatchResult::Mismatch(format!(
            "{} does not return {}",
            element.name, def.return_type
        ));
    }
    if method.is_extension != def.is_extension() {
        let not = if def.is_extension() { "" } else { "not " };
        return MatchResult::Mismatch(format!(
            "{} should {}be an extension method",
            element.name, not
        ));
    }

    let modifiers = element.modifiers.normalized();
    if method.modifiers.normalized() != modifiers {
        return MatchResult::Mismatch(format!("{} is not {}", element.name, modifiers));
    }
    MatchResult::Match
}

fn match_constructor(
    element: &Element,
    def: &ConstructorDef,
    ctor: &ReflectedConstructor,
) -> MatchResult {
    let is_static = element.modifiers.is_static();
    if ctor.modifiers.is_static() != is_static
        || !parameters_match(&def.parameters, &ctor.parameters)
    {
        return MatchResult::NoMatch;
    }

    let modifiers = element.modifiers.normalized();
    if !is_static && ctor.modifiers.normalized() != modifiers {
        return MatchResult::Mismatch(format!("constructor is not {}", modifiers.visibility()));
    }
    MatchResult::Match
}

fn match_nested_type(element: &Element, ty: &ReflectedType) -> MatchResult {
    if !is_named(element, &ty.name.name) {
        return MatchResult::NoMatch;
    }

    let modifiers = element.modifiers.normalized();
    if ty.modifiers.normalized() != modifiers {
        return MatchResult::Mismatch(format!("{} is not {}", element.name, modifiers));
    }
    MatchResult::Match
}
