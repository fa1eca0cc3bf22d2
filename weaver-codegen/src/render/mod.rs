//! Rendering of a [`ScriptBuilder`] to C# source text.
//!
//! Members of a type are written constructors first, then fields,
//! properties, methods and nested types, keeping declaration order within
//! each group. Consecutive members sharing a region or compilation symbol
//! are wrapped in a single `#region` / `#if` block. Obsolete stubs recorded
//! by reconciliation go last, in their own region.

mod body;
mod comment;
mod obsolete;

use weaver_core::{Literal, Modifiers, NameScope, ParameterModifier, TypeName, to_identifier};
use weaver_reflect::ReflectedMember;

use self::{
    body::{BodyStyle, body_style, emit_body, emit_expression},
    comment::emit_doc,
    obsolete::emit_obsolete_members,
};
use crate::{
    builder::CodeBuilder,
    element::{
        Accessor, BaseType, ConstructorDef, Element, ElementId, ElementKind, FieldDef, MethodDef,
        PropertyDef, RegionId, SymbolId, TypeDef,
    },
    script::ScriptBuilder,
    settings::GenerationSettings,
};

/// Render a script to C# source.
///
/// Indentation comes from [`GenerationSettings::indent`], tabs or a number
/// of spaces per level. Rendering never fails; conflicting names are caught earlier by the
/// naming pass.
pub fn render(script: &ScriptBuilder, settings: &GenerationSettings) -> String {
    let mut renderer = Renderer {
        script,
        settings,
        out: CodeBuilder::new(settings.indent),
    };
    renderer.file();
    renderer.out.build()
}

/// Prefix `rest` with the modifier keywords, if any.
pub(crate) fn declaration(modifiers: Modifiers, rest: &str) -> String {
    let keywords = modifiers.keywords();
    if keywords.is_empty() {
        rest.to_string()
    } else {
        format!("{} {}", keywords, rest)
    }
}

/// Render a comma separated parameter list.
pub(crate) fn render_parameters<'a>(
    parameters: impl IntoIterator<
        Item = (
            ParameterModifier,
            &'a TypeName,
            &'a str,
            Option<&'a Literal>,
        ),
    >,
    scope: &NameScope,
) -> String {
    parameters
        .into_iter()
        .map(|(modifier, parameter_type, name, default)| {
            let mut out = String::new();
            if let Some(keyword) = modifier.keyword() {
                out.push_str(keyword);
                out.push(' ');
            }
            out.push_str(&parameter_type.render_in(scope));
            out.push(' ');
            out.push_str(&to_identifier(name, false));
            if let Some(default) = default {
                out.push_str(" = ");
                out.push_str(&default.to_csharp());
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The `#if` symbol and `#region` currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Directives {
    symbol: Option<SymbolId>,
    region: Option<RegionId>,
}

impl Directives {
    fn of(element: &Element) -> Self {
        Self {
            symbol: element.symbol(),
            region: element.region(),
        }
    }
}

struct Renderer<'a> {
    script: &'a ScriptBuilder,
    settings: &'a GenerationSettings,
    out: CodeBuilder,
}

impl<'a> Renderer<'a> {
    fn file(&mut self) {
        for line in &self.settings.header {
            self.out.push_comment(line);
        }
        if !self.settings.header.is_empty() {
            self.out.push_blank();
        }

        let script = self.script;
        let usings = script.usings();
        for using in usings {
            self.out.push_line(&format!("using {};", using));
        }
        if !usings.is_empty() {
            self.out.push_blank();
        }

        let scope = script.scope();
        self.members(script.roots(), &scope, None);
    }

    /// Write sibling elements, grouping them by region and symbol.
    fn members(
        &mut self,
        ids: &[ElementId],
        scope: &NameScope,
        obsolete: Option<(&str, &[ReflectedMember])>,
    ) {
        let script = self.script;
        let mut ordered: Vec<ElementId> = ids.to_vec();
        ordered.sort_by_key(|id| script.element(*id).kind().order());

        let mut open = Directives::default();
        for (index, id) in ordered.iter().enumerate() {
            let element = script.element(*id);
            let next = Directives::of(element);

            if next != open {
                self.close(open, next.symbol);
            }
            if index > 0 {
                self.out.push_blank();
            }
            if next != open {
                if next.symbol != open.symbol {
                    if let Some(symbol) = next.symbol {
                        self.out
                            .push_directive("if", Some(script.symbol_name(symbol)));
                    }
                }
                if let Some(region) = next.region {
                    self.out
                        .push_directive("region", Some(script.region_name(region)));
                }
                open = next;
            }

            self.element(*id, scope);
        }
        self.close(open, None);

        if let Some((type_name, members)) = obsolete {
            if !members.is_empty() {
                if !ordered.is_empty() {
                    self.out.push_blank();
                }
                emit_obsolete_members(&mut self.out, self.settings, scope, type_name, members);
            }
        }
    }

    /// Close the open region, and the `#if` block unless `symbol` continues it.
    fn close(&mut self, open: Directives, symbol: Option<SymbolId>) {
        if open.region.is_some() {
            self.out.push_directive("endregion", None);
        }
        if open.symbol.is_some() && open.symbol != symbol {
            self.out.push_directive("endif", None);
        }
    }

    fn element(&mut self, id: ElementId, scope: &NameScope) {
        let script = self.script;
        let element = script.element(id);
        match element.kind() {
            ElementKind::Namespace => self.namespace(element, scope),
            ElementKind::Type(def) => self.type_declaration(element, def, scope),
            ElementKind::Field(def) => self.field(element, def, scope),
            ElementKind::Property(def) => self.property(element, def, scope),
            ElementKind::Method(def) => self.method(element, def, scope),
            ElementKind::Constructor(def) => self.constructor(id, element, def, scope),
        }
    }

    /// Doc comment, attributes and `[Obsolete]` marker.
    fn preamble(&mut self, element: &Element, scope: &NameScope) {
        if let Some(comment) = element.comment() {
            emit_doc(&mut self.out, comment);
        }
        for attribute in element.attributes() {
            self.out.push_line(&format!("[{}]", attribute));
        }
        if let Some(message) = element.obsolete_message() {
            self.out.push_line(&format!(
                "[{}({})]",
                TypeName::system("Obsolete").render_in(scope),
                Literal::from(message).to_csharp()
            ));
        }
    }

    fn namespace(&mut self, element: &'a Element, scope: &NameScope) {
        let inner = scope.within(element.name());
        self.out
            .push_line(&format!("namespace {}", element.name()))
            .push_line("{")
            .push_indent();
        self.members(element.children(), &inner, None);
        self.out.push_dedent().push_line("}");
    }

    fn type_declaration(&mut self, element: &'a Element, def: &'a TypeDef, scope: &NameScope) {
        self.preamble(element, scope);

        let mut header = declaration(
            element.modifiers(),
            &format!("{} {}", def.kind.keyword(), element.name()),
        );
        if let Some(base) = &def.base_type {
            let base = match base {
                BaseType::Explicit(name) => name.render_in(scope),
                BaseType::Element(id) => self.script.type_name(*id).render_in(scope),
                BaseType::Custom(text) => text.clone(),
            };
            header.push_str(" : ");
            header.push_str(&base);
        }

        self.out.push_line(&header).push_line("{").push_indent();
        self.members(
            element.children(),
            scope,
            Some((element.name(), def.obsolete_members())),
        );
        self.out.push_dedent().push_line("}");
    }

    fn field(&mut self, element: &Element, def: &FieldDef, scope: &NameScope) {
        self.preamble(element, scope);
        let mut line = declaration(
            element.modifiers(),
            &format!("{} {}", def.field_type.render_in(scope), element.name()),
        );
        if let Some(value) = &def.value {
            line.push_str(" = ");
            line.push_str(&value.to_csharp());
        }
        line.push(';');
        self.out.push_line(&line);
    }

    fn property(&mut self, element: &Element, def: &PropertyDef, scope: &NameScope) {
        self.preamble(element, scope);
        let header = declaration(
            element.modifiers(),
            &format!("{} {}", def.property_type.render_in(scope), element.name()),
        );

        let accessors: Vec<(&str, &Accessor)> = [("get", &def.getter), ("set", &def.setter)]
            .into_iter()
            .filter_map(|(keyword, accessor)| accessor.as_ref().map(|a| (keyword, a)))
            .collect();
        let visibility = element.modifiers().visibility();
        let prefixed = |keyword: &str, accessor: &Accessor| match accessor.modifiers {
            Some(modifiers)
                if !modifiers.visibility().is_empty() && modifiers.visibility() != visibility =>
            {
                format!("{} {}", modifiers.visibility(), keyword)
            }
            _ => keyword.to_string(),
        };

        if accessors.iter().all(|(_, accessor)| accessor.is_auto()) {
            let parts: Vec<String> = accessors
                .iter()
                .map(|(keyword, accessor)| format!("{};", prefixed(keyword, accessor)))
                .collect();
            self.out
                .push_line(&format!("{} {{ {} }}", header, parts.join(" ")));
            return;
        }

        if let (Some(getter), None) = (&def.getter, &def.setter) {
            if let (None, Some(body)) = (getter.modifiers, &getter.body) {
                if body_style(body) == BodyStyle::Expression {
                    emit_expression(&mut self.out, &format!("{} =>", header), body);
                    return;
                }
            }
        }

        self.out.push_line(&header).push_line("{").push_indent();
        for (keyword, accessor) in accessors {
            let keyword = prefixed(keyword, accessor);
            match &accessor.body {
                Some(body) => emit_body(&mut self.out, &keyword, body),
                None => {
                    self.out.push_line(&format!("{};", keyword));
                }
            }
        }
        self.out.push_dedent().push_line("}");
    }

    fn method(&mut self, element: &Element, def: &MethodDef, scope: &NameScope) {
        self.preamble(element, scope);
        let parameters = render_parameters(
            def.parameters.iter().map(|p| {
                (
                    p.modifier,
                    &p.parameter_type,
                    p.name.as_str(),
                    p.default.as_ref(),
                )
            }),
            scope,
        );
        let header = declaration(
            element.modifiers(),
            &format!(
                "{} {}({})",
                def.return_type.render_in(scope),
                element.name(),
                parameters
            ),
        );
        emit_body(&mut self.out, &header, &def.body);
    }

    fn constructor(
        &mut self,
        id: ElementId,
        element: &Element,
        def: &ConstructorDef,
        scope: &NameScope,
    ) {
        self.preamble(element, scope);
        let type_name = match self.script.declaring_type(id) {
            Some(declaring) => self.script.element(declaring).name(),
            None => element.name(),
        };

        let header = if element.modifiers().contains(Modifiers::STATIC) {
            format!("static {}()", type_name)
        } else {
            let parameters = render_parameters(
                def.parameters.iter().map(|p| {
                    (
                        p.modifier,
                        &p.parameter_type,
                        p.name.as_str(),
                        p.default.as_ref(),
                    )
                }),
                scope,
            );
            let mut header = declaration(
                element.modifiers(),
                &format!("{}({})", type_name, parameters),
            );
            if let Some(initializer) = &def.initializer {
                header.push_str(" : ");
                header.push_str(&initializer.to_csharp());
            }
            header
        };
        emit_body(&mut self.out, &header, &def.body);
    }
}
