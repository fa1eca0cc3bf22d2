use weaver_core::{Literal, Modifiers, TypeName};

use super::{Declaration, Declare, ElementBuilder, ElementKind};

/// Payload of a field element.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub field_type: TypeName,
    /// Initializer, compared against the compiled value for static fields.
    pub value: Option<Literal>,
}

/// Describes a desired field.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    declaration: Declaration,
    def: FieldDef,
}

impl FieldBuilder {
    /// A public field of the given type.
    pub fn new(name: impl Into<String>, field_type: TypeName) -> Self {
        Self {
            declaration: Declaration::new(name, Modifiers::PUBLIC),
            def: FieldDef {
                field_type,
                value: None,
            },
        }
    }

    /// A `public const` field whose type follows from the literal.
    pub fn constant(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        let value = value.into();
        Self::new(name, value.type_name())
            .modifiers(Modifiers::PUBLIC_CONST)
            .value(value)
    }

    /// Set the initializer.
    pub fn value(mut self, value: impl Into<Literal>) -> Self {
        self.def.value = Some(value.into());
        self
    }
}

impl Declare for FieldBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for FieldBuilder {
    fn into_parts(self) -> (Declaration, ElementKind) {
        (self.declaration, ElementKind::Field(self.def))
    }
}
