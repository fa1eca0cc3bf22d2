use weaver_core::{Literal, Modifiers, TypeName};

use super::{Declaration, Declare, ElementBuilder, ElementKind};

/// A `get` or `set` accessor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Accessor {
    /// Accessor-specific visibility, e.g. `private set`.
    pub modifiers: Option<Modifiers>,
    /// Body text; `None` declares an auto accessor.
    pub body: Option<String>,
}

impl Accessor {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            modifiers: None,
            body: Some(body.into()),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.body.is_none()
    }

    /// Effective modifiers given those of the owning property.
    pub fn effective_modifiers(&self, property: Modifiers) -> Modifiers {
        match self.modifiers {
            Some(modifiers) => property.with_visibility(modifiers),
            None => property,
        }
    }
}

/// Payload of a property element.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub property_type: TypeName,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    /// Value the compiled static getter is expected to return.
    pub expected_value: Option<Literal>,
}

/// Describes a desired property.
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    declaration: Declaration,
    def: PropertyDef,
}

impl PropertyBuilder {
    /// A public property. Without explicit accessors it gets an auto getter.
    pub fn new(name: impl Into<String>, property_type: TypeName) -> Self {
        Self {
            declaration: Declaration::new(name, Modifiers::PUBLIC),
            def: PropertyDef {
                property_type,
                getter: None,
                setter: None,
                expected_value: None,
            },
        }
    }

    /// Getter with the given body.
    pub fn getter(mut self, body: impl Into<String>) -> Self {
        self.def.getter = Some(Accessor::with_body(body));
        self
    }

    /// Auto-implemented getter.
    pub fn auto_getter(mut self) -> Self {
        self.def.getter = Some(Accessor::auto());
        self
    }

    /// Setter with the given body.
    pub fn setter(mut self, body: impl Into<String>) -> Self {
        self.def.setter = Some(Accessor::with_body(body));
        self
    }

    /// Auto-implemented setter.
    pub fn auto_setter(mut self) -> Self {
        self.def.setter = Some(Accessor::auto());
        self
    }

    /// Visibility of the getter, when it differs from the property.
    pub fn getter_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.def.getter.get_or_insert_with(Accessor::auto).modifiers = Some(modifiers);
        self
    }

    /// Visibility of the setter, when it differs from the property.
    pub fn setter_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.def.setter.get_or_insert_with(Accessor::auto).modifiers = Some(modifiers);
        self
    }

    /// Value the compiled getter should return for the member to be current.
    pub fn expected_value(mut self, value: impl Into<Literal>) -> Self {
        self.def.expected_value = Some(value.into());
        self
    }
}

impl Declare for PropertyBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for PropertyBuilder {
    fn into_parts(mut self) -> (Declaration, ElementKind) {
        if self.def.getter.is_none() && self.def.setter.is_none() {
            self.def.getter = Some(Accessor::auto());
        }
        (self.declaration, ElementKind::Property(self.def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(builder: PropertyBuilder) -> PropertyDef {
        match builder.into_parts().1 {
            ElementKind::Property(def) => def,
            other => panic!("expected property, got {:?}", other),
        }
    }

    #[test]
    fn test_default_auto_getter() {
        let def = def(PropertyBuilder::new("Count", TypeName::int()));
        assert_eq!(def.getter, Some(Accessor::auto()));
        assert_eq!(def.setter, None);
    }

    #[test]
    fn test_private_setter() {
        let def = def(
            PropertyBuilder::new("Count", TypeName::int())
                .auto_getter()
                .setter_modifiers(Modifiers::PRIVATE),
        );
        let setter = def.setter.unwrap();
        assert!(setter.is_auto());
        assert_eq!(
            setter.effective_modifiers(Modifiers::PUBLIC_STATIC),
            Modifiers::PRIVATE | Modifiers::STATIC
        );
    }

    #[test]
    fn test_getter_body() {
        let def = def(PropertyBuilder::new("Now", TypeName::float()).getter("Time.time"));
        assert_eq!(def.getter.unwrap().body.as_deref(), Some("Time.time"));
    }
}
