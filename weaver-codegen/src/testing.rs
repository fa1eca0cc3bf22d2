//! Test utilities for generated scripts.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use weaver_core::{Modifiers, TypeName, unescape_identifier};
use weaver_reflect::{
    GetterResult, ReflectedAccessor, ReflectedAssembly, ReflectedConstructor, ReflectedField,
    ReflectedMember, ReflectedMethod, ReflectedParameter, ReflectedProperty, ReflectedType,
};

use crate::{
    element::{Accessor, BaseType, ElementId, ElementKind, Parameter, PropertyDef, TypeKind},
    script::ScriptBuilder,
};

/// The facts a host compiler would report after compiling the rendered
/// form of `script`.
///
/// Names are taken as resolved, so run naming resolution first. Like the
/// compiler, member names are reported without a verbatim `@`. Obsolete
/// stubs recorded on types are compiled too, the way the renderer declares
/// them.
pub fn compile_snapshot(script: &ScriptBuilder) -> ReflectedAssembly {
    let mut types = Vec::new();
    for &root in script.roots() {
        collect_types(script, root, &mut types);
    }
    ReflectedAssembly::new(types)
}

fn collect_types(script: &ScriptBuilder, id: ElementId, out: &mut Vec<ReflectedType>) {
    match script.element(id).kind() {
        ElementKind::Namespace => {
            for &child in script.children(id) {
                collect_types(script, child, out);
            }
        }
        ElementKind::Type(_) => out.push(compile_type(script, id)),
        _ => {}
    }
}

fn compile_type(script: &ScriptBuilder, id: ElementId) -> ReflectedType {
    let element = script.element(id);
    let modifiers = element.modifiers().normalized();
    let mut ty = ReflectedType::new(script.type_name(id), modifiers);
    ty.is_obsolete = element.obsolete_message().is_some();

    let Some(def) = script.type_def(id) else {
        return ty;
    };
    ty.base_type = match &def.base_type {
        Some(BaseType::Explicit(name)) if *name != TypeName::object() => Some(name.clone()),
        Some(BaseType::Element(base)) => Some(script.type_name(*base)),
        _ => None,
    };

    let mut has_instance_constructor = false;
    let mut has_static_constructor = false;
    let mut has_static_initializer = false;

    for &child in script.children(id) {
        let member = script.element(child);
        let name = unescape_identifier(member.name());
        let modifiers = member.modifiers().normalized();
        let is_obsolete = member.obsolete_message().is_some();

        match member.kind() {
            ElementKind::Field(field) => {
                let mut compiled =
                    ReflectedField::new(name, field.field_type.clone(), modifiers);
                if modifiers.is_static() {
                    compiled.value = field.value.clone();
                    if !modifiers.contains(Modifiers::CONST) && field.value.is_some() {
                        has_static_initializer = true;
                    }
                }
                compiled.is_obsolete = is_obsolete;
                ty.members.push(compiled.into());
            }
            ElementKind::Property(property) => {
                compile_property(&mut ty, name, property, modifiers, is_obsolete);
            }
            ElementKind::Method(method) => {
                let mut compiled =
                    ReflectedMethod::new(name, method.return_type.clone(), modifiers);
                for parameter in &method.parameters {
                    compiled = compiled.parameter(compile_parameter(parameter));
                }
                compiled.is_obsolete = is_obsolete;
                ty.members.push(compiled.into());
            }
            ElementKind::Constructor(ctor) => {
                if modifiers.contains(Modifiers::STATIC) {
                    has_static_constructor = true;
                } else {
                    has_instance_constructor = true;
                }
                let mut compiled = ReflectedConstructor::new(modifiers);
                for parameter in &ctor.parameters {
                    compiled = compiled.parameter(compile_parameter(parameter));
                }
                compiled.is_obsolete = is_obsolete;
                ty.members.push(compiled.into());
            }
            ElementKind::Type(_) => {
                ty.members
                    .push(ReflectedMember::NestedType(compile_type(script, child)));
            }
            ElementKind::Namespace => {}
        }
    }

    let is_class = def.kind == TypeKind::Class;
    if is_class && !has_instance_constructor && !modifiers.contains(Modifiers::STATIC) {
        let visibility = if modifiers.contains(Modifiers::ABSTRACT) {
            Modifiers::PROTECTED
        } else {
            Modifiers::PUBLIC
        };
        ty.members.push(ReflectedConstructor::new(visibility).into());
    }
    if has_static_initializer && !has_static_constructor {
        ty.members
            .push(ReflectedConstructor::new(Modifiers::PRIVATE | Modifiers::STATIC).into());
    }

    for obsolete in def.obsolete_members() {
        if let Some(stub) = compile_stub(obsolete) {
            ty.members.push(stub);
        }
    }
    ty
}

fn compile_parameter(parameter: &Parameter) -> ReflectedParameter {
    ReflectedParameter::new(&parameter.name, parameter.parameter_type.clone())
        .modifier(parameter.modifier)
}

fn compile_property(
    ty: &mut ReflectedType,
    name: &str,
    property: &PropertyDef,
    modifiers: Modifiers,
    is_obsolete: bool,
) {
    let accessor = |accessor: &Option<Accessor>| {
        accessor.as_ref().map(|a| ReflectedAccessor {
            modifiers: a.effective_modifiers(modifiers).normalized(),
        })
    };

    let mut compiled = ReflectedProperty::new(name, property.property_type.clone(), modifiers);
    compiled.getter = accessor(&property.getter);
    compiled.setter = accessor(&property.setter);
    if modifiers.is_static() {
        compiled.value = property.expected_value.clone().map(GetterResult::Value);
    }
    compiled.is_obsolete = is_obsolete;

    if let Some(getter) = compiled.getter {
        ty.members.push(
            ReflectedMethod::new(
                format!("get_{}", name),
                property.property_type.clone(),
                getter.modifiers,
            )
            .special_name()
            .into(),
        );
    }
    if let Some(setter) = compiled.setter {
        ty.members.push(
            ReflectedMethod::new(format!("set_{}", name), TypeName::void(), setter.modifiers)
                .parameter(ReflectedParameter::new(
                    "value",
                    property.property_type.clone(),
                ))
                .special_name()
                .into(),
        );
    }
    ty.members.push(compiled.into());
}

/// The compiled form of an obsolete stub, if the renderer declares one.
fn compile_stub(member: &ReflectedMember) -> Option<ReflectedMember> {
    match member {
        ReflectedMember::Field(field) => {
            let mut modifiers = field.modifiers.visibility();
            if field.modifiers.is_static() {
                modifiers |= Modifiers::STATIC;
            }
            let accessor = ReflectedAccessor { modifiers };
            let mut property =
                ReflectedProperty::new(&field.name, field.field_type.clone(), modifiers);
            property.getter = Some(accessor);
            if !field
                .modifiers
                .intersects(Modifiers::CONST | Modifiers::READONLY)
            {
                property.setter = Some(accessor);
            }
            property.is_obsolete = true;
            Some(property.into())
        }
        ReflectedMember::Property(property) => {
            let mut property = property.clone();
            property.value = None;
            property.is_obsolete = true;
            Some(property.into())
        }
        ReflectedMember::Method(method) => {
            let mut method = method.clone();
            method.is_obsolete = true;
            Some(method.into())
        }
        ReflectedMember::Constructor(ctor)
            if !ctor.parameters.is_empty() && !ctor.modifiers.contains(Modifiers::STATIC) =>
        {
            let mut ctor = ctor.clone();
            ctor.is_obsolete = true;
            Some(ctor.into())
        }
        ReflectedMember::Constructor(_) | ReflectedMember::NestedType(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use weaver_reflect::{MemberKind, ReflectionSnapshot};

    use super::*;
    use crate::element::{
        ConstructorBuilder, Declare, FieldBuilder, NamespaceBuilder, PropertyBuilder, TypeBuilder,
    };

    #[test]
    fn test_constants_class() {
        let mut script = ScriptBuilder::new("Layers");
        let ns = script.add_root(NamespaceBuilder::new("Weaver"));
        let ty = script.add(ns, TypeBuilder::static_class("Layers"));
        script.add(ty, FieldBuilder::constant("Water", 4));

        let assembly = compile_snapshot(&script);
        let layers = assembly.find_type("Weaver.Layers").expect("compiled type");

        assert_eq!(layers.modifiers, Modifiers::PUBLIC_STATIC);
        assert_eq!(layers.members.len(), 1);
        match &layers.members[0] {
            ReflectedMember::Field(field) => {
                assert_eq!(field.name, "Water");
                assert_eq!(field.value, Some(4.into()));
            }
            other => panic!("unexpected member {:?}", other),
        }
    }

    #[test]
    fn test_keyword_names_unescaped() {
        let mut script = ScriptBuilder::new("Tags");
        let ty = script.add_root(TypeBuilder::static_class("Tags"));
        script.add(ty, FieldBuilder::constant("class", "class"));
        script.add(
            ty,
            PropertyBuilder::new("event", TypeName::string())
                .modifiers(Modifiers::PUBLIC_STATIC)
                .getter("\"event\""),
        );

        let assembly = compile_snapshot(&script);
        let names: Vec<&str> = assembly.types[0].members.iter().map(|m| m.name()).collect();

        assert_eq!(names, vec!["class", "get_event", "event"]);
    }

    #[test]
    fn test_implicit_constructors() {
        let mut script = ScriptBuilder::new("Pool");
        let ty = script.add_root(TypeBuilder::new("Pool"));
        script.add(
            ty,
            FieldBuilder::new("Shared", TypeName::int())
                .modifiers(Modifiers::PUBLIC_STATIC)
                .value(3),
        );

        let assembly = compile_snapshot(&script);
        let ctors: Vec<&ReflectedMember> = assembly.types[0]
            .members
            .iter()
            .filter(|m| m.kind() == MemberKind::Constructor)
            .collect();

        assert_eq!(ctors.len(), 2);
        assert!(ctors.iter().all(|c| c.is_implicit_constructor()));
    }

    #[test]
    fn test_declared_constructor_suppresses_implicit_one() {
        let mut script = ScriptBuilder::new("Pool");
        let ty = script.add_root(TypeBuilder::new("Pool"));
        script.add(ty, ConstructorBuilder::new().modifiers(Modifiers::PRIVATE));

        let assembly = compile_snapshot(&script);
        let ctors: Vec<Modifiers> = assembly.types[0]
            .members
            .iter()
            .filter(|m| m.kind() == MemberKind::Constructor)
            .map(ReflectedMember::modifiers)
            .collect();

        assert_eq!(ctors, vec![Modifiers::PRIVATE]);
    }

    #[test]
    fn test_property_accessors_hidden_from_snapshot() {
        let mut script = ScriptBuilder::new("Settings");
        let ty = script.add_root(TypeBuilder::static_class("Settings"));
        script.add(
            ty,
            PropertyBuilder::new("Volume", TypeName::float())
                .modifiers(Modifiers::PUBLIC_STATIC)
                .getter("0.5f")
                .expected_value(0.5f32),
        );

        let assembly = compile_snapshot(&script);
        assert_eq!(assembly.types[0].members.len(), 2);

        let snapshot = ReflectionSnapshot::new(&assembly.types[0]);
        assert_eq!(snapshot.members().len(), 1);
        assert_eq!(snapshot.members()[0].kind(), MemberKind::Property);
    }
}
