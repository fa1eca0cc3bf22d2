//! Fact types describing compiled types and their members.
//!
//! These mirror what the host's reflection surface reports and are
//! deserialized from the JSON the host writes after each compile.

use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use weaver_core::{Literal, Modifiers, ParameterModifier, TypeName};

/// Every type the host compiled that the generator may need to inspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflectedAssembly {
    /// Top level types. Nested types live in their declaring type's members.
    #[serde(default)]
    pub types: Vec<ReflectedType>,
}

impl ReflectedAssembly {
    /// Create an assembly from a list of top level types.
    pub fn new(types: Vec<ReflectedType>) -> Self {
        Self { types }
    }

    /// Parse reflection facts from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse reflection facts")
    }

    /// Load reflection facts from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::from_json(&content).wrap_err_with(|| format!("in '{}'", path.display()))
    }

    /// Serialize the facts as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize reflection facts")
    }

    /// Find a type, including nested types, by its qualified name.
    pub fn find_type(&self, qualified_name: &str) -> Option<&ReflectedType> {
        fn search<'a>(ty: &'a ReflectedType, qualified_name: &str) -> Option<&'a ReflectedType> {
            let full_name = ty.name.full_name();
            if full_name == qualified_name {
                return Some(ty);
            }
            let rest = qualified_name.strip_prefix(full_name.as_str())?;
            if !rest.starts_with('+') {
                return None;
            }
            ty.nested_types().find_map(|nested| search(nested, qualified_name))
        }

        self.types.iter().find_map(|ty| search(ty, qualified_name))
    }
}

/// A compiled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedType {
    /// Identity of the type.
    pub name: TypeName,
    /// Declared modifiers.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Base type, `None` for `object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeName>,
    /// Whether the type carries `[Obsolete]`.
    #[serde(default)]
    pub is_obsolete: bool,
    /// Declared members in reflection order.
    #[serde(default)]
    pub members: Vec<ReflectedMember>,
}

impl ReflectedType {
    /// Create an empty type.
    pub fn new(name: TypeName, modifiers: Modifiers) -> Self {
        Self {
            name,
            modifiers,
            base_type: None,
            is_obsolete: false,
            members: Vec::new(),
        }
    }

    /// Add a member.
    pub fn member(mut self, member: impl Into<ReflectedMember>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Set the base type.
    pub fn base_type(mut self, base_type: TypeName) -> Self {
        self.base_type = Some(base_type);
        self
    }

    /// Iterate over the nested types.
    pub fn nested_types(&self) -> impl Iterator<Item = &ReflectedType> {
        self.members.iter().filter_map(|member| match member {
            ReflectedMember::NestedType(ty) => Some(ty),
            _ => None,
        })
    }
}

/// Kind of a reflected member.
///
/// Ordered by the host's member type ordinal, which puts methods before
/// properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Constructor = 1,
    Field = 4,
    Method = 8,
    Property = 16,
    NestedType = 128,
}

impl MemberKind {
    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Field => "field",
            Self::Method => "method",
            Self::Property => "property",
            Self::NestedType => "nested type",
        }
    }
}

/// A declared member of a compiled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum ReflectedMember {
    Field(ReflectedField),
    Property(ReflectedProperty),
    Method(ReflectedMethod),
    Constructor(ReflectedConstructor),
    NestedType(ReflectedType),
}

impl ReflectedMember {
    /// The member kind.
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Field(_) => MemberKind::Field,
            Self::Property(_) => MemberKind::Property,
            Self::Method(_) => MemberKind::Method,
            Self::Constructor(_) => MemberKind::Constructor,
            Self::NestedType(_) => MemberKind::NestedType,
        }
    }

    /// The member name. Constructors report `.ctor` or `.cctor`.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Property(property) => &property.name,
            Self::Method(method) => &method.name,
            Self::Constructor(ctor) if ctor.modifiers.contains(Modifiers::STATIC) => ".cctor",
            Self::Constructor(_) => ".ctor",
            Self::NestedType(ty) => &ty.name.name,
        }
    }

    /// Declared modifiers.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::Field(field) => field.modifiers,
            Self::Property(property) => property.modifiers,
            Self::Method(method) => method.modifiers,
            Self::Constructor(ctor) => ctor.modifiers,
            Self::NestedType(ty) => ty.modifiers,
        }
    }

    /// Whether the member carries `[Obsolete]`.
    pub fn is_obsolete(&self) -> bool {
        match self {
            Self::Field(field) => field.is_obsolete,
            Self::Property(property) => property.is_obsolete,
            Self::Method(method) => method.is_obsolete,
            Self::Constructor(ctor) => ctor.is_obsolete,
            Self::NestedType(ty) => ty.is_obsolete,
        }
    }

    /// A parameterless constructor that is public or static.
    ///
    /// The compiler emits these implicitly, so they never count as members
    /// that disappeared.
    pub fn is_implicit_constructor(&self) -> bool {
        match self {
            Self::Constructor(ctor) => {
                ctor.parameters.is_empty()
                    && ctor
                        .modifiers
                        .intersects(Modifiers::PUBLIC | Modifiers::STATIC)
            }
            _ => false,
        }
    }
}

impl From<ReflectedField> for ReflectedMember {
    fn from(field: ReflectedField) -> Self {
        Self::Field(field)
    }
}

impl From<ReflectedProperty> for ReflectedMember {
    fn from(property: ReflectedProperty) -> Self {
        Self::Property(property)
    }
}

impl From<ReflectedMethod> for ReflectedMember {
    fn from(method: ReflectedMethod) -> Self {
        Self::Method(method)
    }
}

impl From<ReflectedConstructor> for ReflectedMember {
    fn from(ctor: ReflectedConstructor) -> Self {
        Self::Constructor(ctor)
    }
}

impl From<ReflectedType> for ReflectedMember {
    fn from(ty: ReflectedType) -> Self {
        Self::NestedType(ty)
    }
}

/// A compiled field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedField {
    pub name: String,
    pub field_type: TypeName,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Current value, reported for static and const fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
    #[serde(default)]
    pub is_obsolete: bool,
}

impl ReflectedField {
    pub fn new(name: impl Into<String>, field_type: TypeName, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            field_type,
            modifiers,
            value: None,
            is_obsolete: false,
        }
    }

    pub fn value(mut self, value: impl Into<Literal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }
}

/// An accessor of a compiled property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectedAccessor {
    pub modifiers: Modifiers,
}

/// Outcome of the host invoking a static property getter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetterResult {
    /// The getter returned a value.
    Value(Literal),
    /// The getter threw; the payload is the exception message.
    Threw(String),
}

/// A compiled property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedProperty {
    pub name: String,
    pub property_type: TypeName,
    /// Modifiers of the property, taken from its most accessible accessor.
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<ReflectedAccessor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<ReflectedAccessor>,
    /// Result of invoking the getter, when the host tried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<GetterResult>,
    #[serde(default)]
    pub is_obsolete: bool,
}

impl ReflectedProperty {
    /// Create a property with a getter sharing the property's modifiers.
    pub fn new(name: impl Into<String>, property_type: TypeName, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            property_type,
            modifiers,
            getter: Some(ReflectedAccessor { modifiers }),
            setter: None,
            value: None,
            is_obsolete: false,
        }
    }

    pub fn setter(mut self, modifiers: Modifiers) -> Self {
        self.setter = Some(ReflectedAccessor { modifiers });
        self
    }

    pub fn without_getter(mut self) -> Self {
        self.getter = None;
        self
    }

    pub fn value(mut self, value: GetterResult) -> Self {
        self.value = Some(value);
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }
}

/// A parameter of a compiled method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedParameter {
    pub name: String,
    pub parameter_type: TypeName,
    #[serde(default)]
    pub modifier: ParameterModifier,
}

impl ReflectedParameter {
    pub fn new(name: impl Into<String>, parameter_type: TypeName) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            modifier: ParameterModifier::None,
        }
    }

    pub fn modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// A compiled method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedMethod {
    pub name: String,
    pub return_type: TypeName,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub parameters: Vec<ReflectedParameter>,
    #[serde(default)]
    pub is_extension: bool,
    /// Accessors and operators are flagged with a special name.
    #[serde(default)]
    pub special_name: bool,
    #[serde(default)]
    pub is_obsolete: bool,
}

impl ReflectedMethod {
    pub fn new(name: impl Into<String>, return_type: TypeName, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            return_type,
            modifiers,
            parameters: Vec::new(),
            is_extension: false,
            special_name: false,
            is_obsolete: false,
        }
    }

    pub fn parameter(mut self, parameter: ReflectedParameter) -> Self {
        if parameter.modifier == ParameterModifier::This {
            self.is_extension = true;
        }
        self.parameters.push(parameter);
        self
    }

    pub fn special_name(mut self) -> Self {
        self.special_name = true;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }
}

/// A compiled constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectedConstructor {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub parameters: Vec<ReflectedParameter>,
    #[serde(default)]
    pub is_obsolete: bool,
}

impl ReflectedConstructor {
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            parameters: Vec::new(),
            is_obsolete: false,
        }
    }

    pub fn parameter(mut self, parameter: ReflectedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}
