use weaver_core::{Modifiers, TypeName};
use weaver_reflect::ReflectedMember;

use super::{Declaration, Declare, ElementBuilder, ElementId, ElementKind};

/// The keyword a type is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
        }
    }
}

/// What a type derives from.
///
/// Exactly one source determines the emitted base clause.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseType {
    /// A type that already exists.
    Explicit(TypeName),
    /// Another type declared in the same script.
    Element(ElementId),
    /// Verbatim base clause text, never checked against compiled facts.
    Custom(String),
}

/// Payload of a class, struct or interface element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeDef {
    pub kind: TypeKind,
    pub base_type: Option<BaseType>,
    /// Compiled members retained as obsolete stubs, filled in by reconciliation.
    pub(crate) obsolete_members: Vec<ReflectedMember>,
}

impl TypeDef {
    /// Members that will be rendered in the `Obsolete Members` region.
    pub fn obsolete_members(&self) -> &[ReflectedMember] {
        &self.obsolete_members
    }
}

/// Describes a desired class, struct or interface.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    declaration: Declaration,
    def: TypeDef,
}

impl TypeBuilder {
    /// A public class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            declaration: Declaration::new(name, Modifiers::PUBLIC),
            def: TypeDef::default(),
        }
    }

    /// A `public static class`, the shape of every constants script.
    pub fn static_class(name: impl Into<String>) -> Self {
        Self::new(name).modifiers(Modifiers::PUBLIC_STATIC)
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.def.kind = kind;
        self
    }

    pub fn base_type(mut self, base_type: BaseType) -> Self {
        self.def.base_type = Some(base_type);
        self
    }
}

impl Declare for TypeBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for TypeBuilder {
    fn into_parts(self) -> (Declaration, ElementKind) {
        (self.declaration, ElementKind::Type(self.def))
    }
}

/// Describes a namespace declaration.
///
/// Dotted names such as `Weaver.Generated` are kept as one declaration.
#[derive(Debug, Clone)]
pub struct NamespaceBuilder {
    declaration: Declaration,
}

impl NamespaceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            declaration: Declaration::new(name, Modifiers::empty()),
        }
    }
}

impl Declare for NamespaceBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for NamespaceBuilder {
    fn into_parts(self) -> (Declaration, ElementKind) {
        (self.declaration, ElementKind::Namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_class() {
        let (declaration, kind) = TypeBuilder::static_class("Layers")
            .comment("Layer indices.")
            .into_parts();
        assert_eq!(declaration.name_source, "Layers");
        assert_eq!(declaration.modifiers, Modifiers::PUBLIC_STATIC);
        assert_eq!(declaration.comment.as_deref(), Some("Layer indices."));
        assert_eq!(kind, ElementKind::Type(TypeDef::default()));
    }

    #[test]
    fn test_struct_with_base() {
        let (_, kind) = TypeBuilder::new("Point")
            .kind(TypeKind::Struct)
            .base_type(BaseType::Custom("System.IEquatable<Point>".into()))
            .into_parts();
        match kind {
            ElementKind::Type(def) => {
                assert_eq!(def.kind.keyword(), "struct");
                assert!(matches!(def.base_type, Some(BaseType::Custom(_))));
            }
            other => panic!("expected type, got {:?}", other),
        }
    }
}
