use weaver_core::{Literal, Modifiers, ParameterModifier, TypeName};

use super::{Declaration, Declare, ElementBuilder, ElementKind};

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub parameter_type: TypeName,
    pub modifier: ParameterModifier,
    pub default: Option<Literal>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, parameter_type: TypeName) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            modifier: ParameterModifier::None,
            default: None,
        }
    }

    pub fn modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Optional parameter with a default value.
    pub fn default_value(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Payload of a method element.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub return_type: TypeName,
    pub parameters: Vec<Parameter>,
    /// Body text; see [`render`](crate::render) for how it is laid out.
    pub body: String,
}

impl MethodDef {
    /// Extension methods take their receiver as a `this` parameter.
    pub fn is_extension(&self) -> bool {
        self.parameters
            .first()
            .is_some_and(|p| p.modifier == ParameterModifier::This)
    }
}

/// Describes a desired method.
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    declaration: Declaration,
    def: MethodDef,
}

impl MethodBuilder {
    /// A public method with an empty body.
    pub fn new(name: impl Into<String>, return_type: TypeName) -> Self {
        Self {
            declaration: Declaration::new(name, Modifiers::PUBLIC),
            def: MethodDef {
                return_type,
                parameters: Vec::new(),
                body: String::new(),
            },
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.def.parameters.push(parameter);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.def.body = body.into();
        self
    }
}

impl Declare for MethodBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for MethodBuilder {
    fn into_parts(self) -> (Declaration, ElementKind) {
        (self.declaration, ElementKind::Method(self.def))
    }
}

/// Call to another constructor before the body runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorInitializer {
    /// `: base(args)`
    Base(String),
    /// `: this(args)`
    This(String),
}

impl ConstructorInitializer {
    pub fn to_csharp(&self) -> String {
        match self {
            Self::Base(args) => format!("base({})", args),
            Self::This(args) => format!("this({})", args),
        }
    }
}

/// Payload of a constructor element.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDef {
    pub parameters: Vec<Parameter>,
    pub body: String,
    pub initializer: Option<ConstructorInitializer>,
}

/// Describes a desired constructor.
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    declaration: Declaration,
    def: ConstructorDef,
}

impl ConstructorBuilder {
    /// A public instance constructor.
    pub fn new() -> Self {
        Self {
            declaration: Declaration::new("", Modifiers::PUBLIC),
            def: ConstructorDef {
                parameters: Vec::new(),
                body: String::new(),
                initializer: None,
            },
        }
    }

    /// A static constructor. Only the `static` keyword is ever rendered.
    pub fn new_static() -> Self {
        Self::new().modifiers(Modifiers::PRIVATE | Modifiers::STATIC)
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.def.parameters.push(parameter);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.def.body = body.into();
        self
    }

    pub fn initializer(mut self, initializer: ConstructorInitializer) -> Self {
        self.def.initializer = Some(initializer);
        self
    }
}

impl Default for ConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Declare for ConstructorBuilder {
    fn declaration_mut(&mut self) -> &mut Declaration {
        &mut self.declaration
    }
}

impl ElementBuilder for ConstructorBuilder {
    fn into_parts(self) -> (Declaration, ElementKind) {
        (self.declaration, ElementKind::Constructor(self.def))
    }
}
