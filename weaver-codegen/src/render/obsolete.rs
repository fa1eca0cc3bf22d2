//! Stubs for compiled members that are no longer generated.
//!
//! Each stub keeps the signature and visibility of the compiled member so
//! existing references still compile, but carries `[Obsolete]` and throws
//! when used.

use log::warn;
use weaver_core::{Literal, Modifiers, NameScope, TypeName, escape_keyword};
use weaver_reflect::{
    ReflectedAccessor, ReflectedConstructor, ReflectedField, ReflectedMember, ReflectedMethod,
    ReflectedProperty,
};

use super::{declaration, render_parameters};
use crate::builder::CodeBuilder;
use crate::settings::GenerationSettings;

const REGION_NAME: &str = "Obsolete Members";

/// Sort retained members by kind, then name.
///
/// The kind order follows the host's member type ordinal, which puts
/// methods before properties.
pub(crate) fn sorted(members: &[ReflectedMember]) -> Vec<&ReflectedMember> {
    let mut sorted: Vec<&ReflectedMember> = members.iter().collect();
    sorted.sort_by(|a, b| {
        a.kind()
            .cmp(&b.kind())
            .then_with(|| a.name().cmp(b.name()))
    });
    sorted
}

struct StubWriter<'a> {
    scope: &'a NameScope,
    attribute: String,
    throw: String,
}

impl StubWriter<'_> {
    fn stub_modifiers(modifiers: Modifiers) -> Modifiers {
        let mut stub = modifiers.visibility();
        if modifiers.is_static() {
            stub |= Modifiers::STATIC;
        }
        stub
    }

    fn field(&self, out: &mut CodeBuilder, field: &ReflectedField) {
        out.push_line(&self.attribute);
        let header = declaration(
            Self::stub_modifiers(field.modifiers),
            &format!(
                "{} {}",
                field.field_type.render_in(self.scope),
                escape_keyword(&field.name)
            ),
        );
        if field
            .modifiers
            .intersects(Modifiers::CONST | Modifiers::READONLY)
        {
            out.push_line(&format!("{} => {};", header, self.throw));
        } else {
            out.push_block(&header, |b| {
                b.push_line(&format!("get => {};", self.throw));
                b.push_line(&format!("set => {};", self.throw));
            });
        }
    }

    fn property(&self, out: &mut CodeBuilder, property: &ReflectedProperty) {
        out.push_line(&self.attribute);
        let modifiers = Self::stub_modifiers(property.modifiers);
        let header = declaration(
            modifiers,
            &format!(
                "{} {}",
                property.property_type.render_in(self.scope),
                escape_keyword(&property.name)
            ),
        );

        let accessor = |keyword: &str, accessor: &ReflectedAccessor| {
            let visibility = accessor.modifiers.visibility();
            if visibility.is_empty() || visibility == modifiers.visibility() {
                format!("{} => {};", keyword, self.throw)
            } else {
                format!("{} {} => {};", visibility, keyword, self.throw)
            }
        };

        match (&property.getter, &property.setter) {
            (Some(getter), None) if getter.modifiers.visibility() == modifiers.visibility() => {
                out.push_line(&format!("{} => {};", header, self.throw));
            }
            (getter, setter) => {
                out.push_block(&header, |b| {
                    if let Some(getter) = getter {
                        b.push_line(&accessor("get", getter));
                    }
                    if let Some(setter) = setter {
                        b.push_line(&accessor("set", setter));
                    }
                });
            }
        }
    }

    fn method(&self, out: &mut CodeBuilder, method: &ReflectedMethod) {
        out.push_line(&self.attribute);
        let parameters = render_parameters(
            method
                .parameters
                .iter()
                .map(|p| (p.modifier, &p.parameter_type, p.name.as_str(), None)),
            self.scope,
        );
        let header = declaration(
            Self::stub_modifiers(method.modifiers),
            &format!(
                "{} {}({})",
                method.return_type.render_in(self.scope),
                escape_keyword(&method.name),
                parameters
            ),
        );
        out.push_line(&format!("{} => {};", header, self.throw));
    }

    fn constructor(&self, out: &mut CodeBuilder, type_name: &str, ctor: &ReflectedConstructor) {
        let parameters = render_parameters(
            ctor.parameters
                .iter()
                .map(|p| (p.modifier, &p.parameter_type, p.name.as_str(), None)),
            self.scope,
        );

        if ctor.parameters.is_empty() || ctor.modifiers.contains(Modifiers::STATIC) {
            out.push_comment(&format!(
                "Constructor {}({}) is obsolete but can not be re-declared.",
                type_name, parameters
            ));
            return;
        }

        out.push_line(&self.attribute);
        let header = declaration(
            ctor.modifiers.visibility(),
            &format!("{}({})", type_name, parameters),
        );
        out.push_line(&format!("{} => {};", header, self.throw));
    }
}

/// Emit the `Obsolete Members` region of a type.
pub(crate) fn emit_obsolete_members(
    out: &mut CodeBuilder,
    settings: &GenerationSettings,
    scope: &NameScope,
    type_name: &str,
    members: &[ReflectedMember],
) {
    let message = Literal::from(settings.obsolete_message.as_str()).to_csharp();
    let writer = StubWriter {
        scope,
        attribute: format!(
            "[{}({})]",
            TypeName::system("Obsolete").render_in(scope),
            message
        ),
        throw: format!(
            "throw new {}({})",
            TypeName::system("NotImplementedException").render_in(scope),
            message
        ),
    };

    if settings.obsolete_members_editor_only {
        out.push_directive("if", Some(&settings.editor_symbol));
    }
    out.push_directive("region", Some(REGION_NAME));

    for member in sorted(members) {
        out.push_blank();
        match member {
            ReflectedMember::Field(field) => writer.field(out, field),
            ReflectedMember::Property(property) => writer.property(out, property),
            ReflectedMember::Method(method) => writer.method(out, method),
            ReflectedMember::Constructor(ctor) => writer.constructor(out, type_name, ctor),
            ReflectedMember::NestedType(ty) => {
                warn!(
                    type_name = type_name,
                    member = ty.name.name.as_str();
                    "Obsolete nested types can not be re-declared"
                );
                out.push_comment(&format!(
                    "Nested type {} is obsolete but can not be re-declared.",
                    ty.name.name
                ));
            }
        }
    }

    out.push_blank();
    out.push_directive("endregion", None);
    if settings.obsolete_members_editor_only {
        out.push_directive("endif", None);
    }
}

#[cfg(test)]
mod tests {
    use weaver_reflect::{ReflectedParameter, ReflectedType};

    use super::*;

    fn render(settings: &GenerationSettings, members: &[ReflectedMember]) -> String {
        let mut out = CodeBuilder::default();
        emit_obsolete_members(&mut out, settings, &NameScope::default(), "Layers", members);
        out.build()
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            obsolete_message: "Gone.".into(),
            ..GenerationSettings::default()
        }
    }

    #[test]
    fn test_const_field_becomes_static_property() {
        let members = [ReflectedMember::from(ReflectedField::new(
            "Water",
            TypeName::int(),
            Modifiers::PUBLIC_CONST,
        ))];

        assert_eq!(
            render(&settings(), &members),
            "#if UNITY_EDITOR\n\
             #region Obsolete Members\n\
             \n\
             [System.Obsolete(\"Gone.\")]\n\
             public static int Water => throw new System.NotImplementedException(\"Gone.\");\n\
             \n\
             #endregion\n\
             #endif\n"
        );
    }

    #[test]
    fn test_keyword_names_escaped() {
        let members = [
            ReflectedMember::from(
                ReflectedField::new("class", TypeName::string(), Modifiers::PUBLIC_CONST)
                    .value("class"),
            ),
            ReflectedMember::from(ReflectedMethod::new(
                "default",
                TypeName::void(),
                Modifiers::PUBLIC_STATIC,
            )),
        ];

        let rendered = render(&settings(), &members);

        assert!(rendered.contains("public static string @class => throw"));
        assert!(rendered.contains("public static void @default() => throw"));
    }

    #[test]
    fn test_mutable_field_gets_accessors() {
        let members = [ReflectedMember::from(ReflectedField::new(
            "Speed",
            TypeName::float(),
            Modifiers::PUBLIC_STATIC,
        ))];
        let settings = GenerationSettings {
            obsolete_members_editor_only: false,
            ..settings()
        };

        let rendered = render(&settings, &members);

        assert!(!rendered.contains("#if"));
        assert!(rendered.contains(
            "public static float Speed\n{\n    get => throw new System.NotImplementedException(\"Gone.\");\n    set => throw"
        ));
    }

    #[test]
    fn test_sorted_by_kind_then_name() {
        let members = [
            ReflectedMember::from(ReflectedProperty::new(
                "Alpha",
                TypeName::int(),
                Modifiers::PUBLIC_STATIC,
            )),
            ReflectedMember::from(ReflectedMethod::new(
                "Zulu",
                TypeName::void(),
                Modifiers::PUBLIC_STATIC,
            )),
            ReflectedMember::from(ReflectedField::new(
                "Beta",
                TypeName::int(),
                Modifiers::PUBLIC_CONST,
            )),
            ReflectedMember::from(ReflectedField::new(
                "Alpha",
                TypeName::int(),
                Modifiers::PUBLIC_CONST,
            )),
        ];

        let names: Vec<(&str, &str)> = sorted(&members)
            .iter()
            .map(|m| (m.kind().as_str(), m.name()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("field", "Alpha"),
                ("field", "Beta"),
                ("method", "Zulu"),
                ("property", "Alpha"),
            ]
        );
    }

    #[test]
    fn test_method_stub_keeps_signature() {
        let members = [ReflectedMember::from(
            ReflectedMethod::new("TryGet", TypeName::bool(), Modifiers::PUBLIC_STATIC)
                .parameter(ReflectedParameter::new("name", TypeName::string()))
                .parameter(
                    ReflectedParameter::new("value", TypeName::int())
                        .modifier(weaver_core::ParameterModifier::Out),
                ),
        )];

        assert!(render(&settings(), &members).contains(
            "public static bool TryGet(string name, out int value) => throw new System.NotImplementedException(\"Gone.\");"
        ));
    }

    #[test]
    fn test_property_with_private_setter() {
        let members = [ReflectedMember::from(
            ReflectedProperty::new("Count", TypeName::int(), Modifiers::PUBLIC)
                .setter(Modifiers::PRIVATE),
        )];

        assert!(render(&settings(), &members).contains(
            "public int Count\n{\n    get => throw new System.NotImplementedException(\"Gone.\");\n    private set => throw"
        ));
    }

    #[test]
    fn test_constructors_and_nested_types_as_comments() {
        let members = [
            ReflectedMember::from(ReflectedConstructor::new(Modifiers::PRIVATE)),
            ReflectedMember::from(ReflectedType::new(
                TypeName::new(None, "Masks"),
                Modifiers::PUBLIC_STATIC,
            )),
        ];

        let rendered = render(&settings(), &members);

        assert!(rendered.contains("// Constructor Layers() is obsolete but can not be re-declared."));
        assert!(rendered.contains("// Nested type Masks is obsolete but can not be re-declared."));
        assert!(!rendered.contains("[System.Obsolete"));
    }

    #[test]
    fn test_constructor_with_parameters_redeclared() {
        let members = [ReflectedMember::from(
            ReflectedConstructor::new(Modifiers::PUBLIC)
                .parameter(ReflectedParameter::new("size", TypeName::int())),
        )];

        assert!(render(&settings(), &members).contains(
            "public Layers(int size) => throw new System.NotImplementedException(\"Gone.\");"
        ));
    }

    #[test]
    fn test_using_system_shortens_names() {
        let members = [ReflectedMember::from(ReflectedField::new(
            "Water",
            TypeName::int(),
            Modifiers::PUBLIC_CONST,
        ))];
        let mut out = CodeBuilder::default();
        emit_obsolete_members(
            &mut out,
            &settings(),
            &NameScope::new(["System"]),
            "Layers",
            &members,
        );

        assert!(out.as_str().contains(
            "[Obsolete(\"Gone.\")]\npublic static int Water => throw new NotImplementedException(\"Gone.\");"
        ));
    }
}
