//! Declarative descriptions of the elements of a generated script.
//!
//! A script definition describes each desired declaration with a builder
//! ([`TypeBuilder`], [`FieldBuilder`], ...) and hands it to
//! [`ScriptBuilder::add`](crate::ScriptBuilder::add), which stores it as an
//! [`Element`] in the script's arena.

mod field;
mod matching;
mod method;
mod property;
mod types;

pub use field::{FieldBuilder, FieldDef};
pub use matching::MatchResult;
pub(crate) use matching::Matcher;
pub use method::{
    ConstructorBuilder, ConstructorDef, ConstructorInitializer, MethodBuilder, MethodDef,
    Parameter,
};
pub use property::{Accessor, PropertyBuilder, PropertyDef};
pub use types::{BaseType, NamespaceBuilder, TypeBuilder, TypeDef, TypeKind};
use weaver_core::Modifiers;
use weaver_reflect::ReflectedMember;

/// Index of an element within its [`ScriptBuilder`](crate::ScriptBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Position of the element in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interned `#region` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub(crate) usize);

/// Interned `#if` compilation symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub(crate) usize);

/// Metadata every declarable element carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declaration {
    /// Seed text the identifier is derived from.
    pub name_source: String,
    /// XML documentation text.
    pub comment: Option<String>,
    pub modifiers: Modifiers,
    /// Attribute lists, without the surrounding brackets.
    pub attributes: Vec<String>,
    /// `#region` to place the element in.
    pub region: Option<String>,
    /// Compilation symbol to wrap the element in with `#if`.
    pub symbol: Option<String>,
    /// Message for an `[Obsolete]` marker the element should carry.
    pub obsolete: Option<String>,
}

impl Declaration {
    pub fn new(name_source: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name_source: name_source.into(),
            modifiers,
            ..Self::default()
        }
    }
}

/// Shared setters for every element builder.
pub trait Declare: Sized {
    fn declaration_mut(&mut self) -> &mut Declaration;

    /// Set the XML documentation text.
    fn comment(mut self, text: impl Into<String>) -> Self {
        self.declaration_mut().comment = Some(text.into());
        self
    }

    /// Replace the modifiers.
    fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.declaration_mut().modifiers = modifiers;
        self
    }

    /// Add an attribute, e.g. `System.Serializable`.
    fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.declaration_mut().attributes.push(attribute.into());
        self
    }

    /// Place the element inside a `#region`.
    fn region(mut self, name: impl Into<String>) -> Self {
        self.declaration_mut().region = Some(name.into());
        self
    }

    /// Only compile the element when `symbol` is defined.
    fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.declaration_mut().symbol = Some(symbol.into());
        self
    }

    /// Mark the element `[Obsolete]`.
    fn obsolete(mut self, message: impl Into<String>) -> Self {
        self.declaration_mut().obsolete = Some(message.into());
        self
    }
}

/// A builder that can be stored as an element.
pub trait ElementBuilder: Declare {
    fn into_parts(self) -> (Declaration, ElementKind);
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Namespace,
    Type(TypeDef),
    Field(FieldDef),
    Property(PropertyDef),
    Method(MethodDef),
    Constructor(ConstructorDef),
}

impl ElementKind {
    /// Position within a type body: constructors, fields, properties,
    /// methods, then nested types.
    pub(crate) fn order(&self) -> u8 {
        match self {
            Self::Constructor(_) => 0,
            Self::Field(_) => 1,
            Self::Property(_) => 2,
            Self::Method(_) => 3,
            Self::Type(_) => 4,
            Self::Namespace => 5,
        }
    }

    /// Lowercase name used in messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Type(def) => def.kind.keyword(),
            Self::Field(_) => "field",
            Self::Property(_) => "property",
            Self::Method(_) => "method",
            Self::Constructor(_) => "constructor",
        }
    }
}

/// A declaration stored in a script.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) name_source: String,
    pub(crate) name: String,
    pub(crate) is_fallback_name: bool,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) comment: Option<String>,
    pub(crate) modifiers: Modifiers,
    pub(crate) attributes: Vec<String>,
    pub(crate) region: Option<RegionId>,
    pub(crate) symbol: Option<SymbolId>,
    pub(crate) obsolete: Option<String>,
    pub(crate) kind: ElementKind,
    pub(crate) existing: Option<ReflectedMember>,
}

impl Element {
    /// Seed text the identifier is derived from.
    pub fn name_source(&self) -> &str {
        &self.name_source
    }

    /// The resolved identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether [`name`](Self::name) came from the fallback policy.
    pub fn is_fallback_name(&self) -> bool {
        self.is_fallback_name
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    /// Message of the desired `[Obsolete]` marker.
    pub fn obsolete_message(&self) -> Option<&str> {
        self.obsolete.as_deref()
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// The compiled member this element was matched with, if any.
    pub fn existing(&self) -> Option<&ReflectedMember> {
        self.existing.as_ref()
    }

    /// Whether the element is a type member, as opposed to a namespace.
    pub fn is_member(&self) -> bool {
        !matches!(self.kind, ElementKind::Namespace)
    }

    /// Whether the element is a class, struct or interface.
    pub fn is_type(&self) -> bool {
        matches!(self.kind, ElementKind::Type(_))
    }

    /// Constructors are named after their type and never take part in
    /// naming resolution.
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, ElementKind::Constructor(_))
    }
}
