//! References to C# types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// C# keyword aliases for `System` types.
const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("Boolean", "bool"),
    ("Byte", "byte"),
    ("Char", "char"),
    ("Decimal", "decimal"),
    ("Double", "double"),
    ("Int16", "short"),
    ("Int32", "int"),
    ("Int64", "long"),
    ("Object", "object"),
    ("SByte", "sbyte"),
    ("Single", "float"),
    ("String", "string"),
    ("UInt16", "ushort"),
    ("UInt32", "uint"),
    ("UInt64", "ulong"),
    ("Void", "void"),
];

/// A reference to a type, as it appears in a declaration.
///
/// Two references are equal when they name the same type; this is the
/// identity used when comparing desired members against compiled ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Namespace, `None` for the global namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Enclosing types from outermost to innermost, for nested types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declaring_types: Vec<String>,
    /// Simple name without generic arguments.
    pub name: String,
    /// Generic type arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<TypeName>,
    /// Array rank, 0 for non-array types.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub array_rank: u8,
}

fn is_zero(rank: &u8) -> bool {
    *rank == 0
}

impl TypeName {
    /// Create a reference to a non-nested type.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            declaring_types: Vec::new(),
            name: name.into(),
            generic_args: Vec::new(),
            array_rank: 0,
        }
    }

    /// Create a reference to a type in the `System` namespace.
    pub fn system(name: impl Into<String>) -> Self {
        Self::new(Some("System"), name)
    }

    /// Parse a reflection-style full name such as `UnityEngine.Rendering.Foo+Bar[]`.
    ///
    /// C# keywords (`int`, `string`, ...) resolve to their `System` types.
    pub fn from_full_name(full_name: &str) -> Self {
        let mut rest = full_name.trim();
        let mut array_rank = 0u8;
        while let Some(inner) = rest.strip_suffix(']') {
            let Some(open) = inner.rfind('[') else {
                break;
            };
            array_rank = (inner.len() - open) as u8;
            rest = &inner[..open];
        }

        if let Some(keyword) = Self::from_keyword(rest) {
            return Self {
                array_rank,
                ..keyword
            };
        }

        let mut segments: Vec<&str> = rest.split('+').collect();
        let first = segments.remove(0);
        let (namespace, outermost) = match first.rsplit_once('.') {
            Some((ns, name)) => (Some(ns.to_string()), name),
            None => (None, first),
        };

        let mut names: Vec<String> = std::iter::once(outermost)
            .chain(segments)
            .map(str::to_string)
            .collect();
        let name = names.pop().unwrap_or_default();

        Self {
            namespace,
            declaring_types: names,
            name,
            generic_args: Vec::new(),
            array_rank,
        }
    }

    /// Resolve a C# keyword such as `int` to its `System` type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        KEYWORD_ALIASES
            .iter()
            .find(|(_, alias)| *alias == keyword)
            .map(|(name, _)| Self::system(*name))
    }

    /// `void`
    pub fn void() -> Self {
        Self::system("Void")
    }

    /// `bool`
    pub fn bool() -> Self {
        Self::system("Boolean")
    }

    /// `int`
    pub fn int() -> Self {
        Self::system("Int32")
    }

    /// `long`
    pub fn long() -> Self {
        Self::system("Int64")
    }

    /// `float`
    pub fn float() -> Self {
        Self::system("Single")
    }

    /// `double`
    pub fn double() -> Self {
        Self::system("Double")
    }

    /// `char`
    pub fn char() -> Self {
        Self::system("Char")
    }

    /// `string`
    pub fn string() -> Self {
        Self::system("String")
    }

    /// `object`
    pub fn object() -> Self {
        Self::system("Object")
    }

    /// Make this a nested type of `declaring`.
    pub fn nested_in(mut self, declaring: &TypeName) -> Self {
        self.namespace = declaring.namespace.clone();
        self.declaring_types = declaring.declaring_types.clone();
        self.declaring_types.push(declaring.name.clone());
        self
    }

    /// Add generic type arguments.
    pub fn generic(mut self, args: impl IntoIterator<Item = TypeName>) -> Self {
        self.generic_args.extend(args);
        self
    }

    /// Make this a single-dimensional array of the current type.
    pub fn array(mut self) -> Self {
        self.array_rank = 1;
        self
    }

    /// Whether this is `void`.
    pub fn is_void(&self) -> bool {
        self.array_rank == 0 && *self == Self::void()
    }

    /// The C# keyword for this type, if it has one.
    pub fn keyword(&self) -> Option<&'static str> {
        if self.namespace.as_deref() != Some("System")
            || !self.declaring_types.is_empty()
            || !self.generic_args.is_empty()
        {
            return None;
        }
        KEYWORD_ALIASES
            .iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, alias)| *alias)
    }

    /// The reflection identity, e.g. `UnityEngine.Rendering.Foo+Bar`.
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        if let Some(namespace) = &self.namespace {
            out.push_str(namespace);
            out.push('.');
        }
        for declaring in &self.declaring_types {
            out.push_str(declaring);
            out.push('+');
        }
        out.push_str(&self.name);
        if !self.generic_args.is_empty() {
            let args: Vec<String> = self.generic_args.iter().map(Self::full_name).collect();
            out.push('<');
            out.push_str(&args.join(","));
            out.push('>');
        }
        push_array_suffix(&mut out, self.array_rank);
        out
    }

    /// Render as C# source within the given scope.
    pub fn render_in(&self, scope: &NameScope) -> String {
        let mut out = String::new();
        if let Some(keyword) = self.keyword() {
            out.push_str(keyword);
        } else {
            match &self.namespace {
                Some(namespace) if !scope.imports(namespace) => {
                    out.push_str(namespace);
                    out.push('.');
                }
                _ => {}
            }
            for declaring in &self.declaring_types {
                out.push_str(declaring);
                out.push('.');
            }
            out.push_str(&self.name);
            if !self.generic_args.is_empty() {
                let args: Vec<String> = self
                    .generic_args
                    .iter()
                    .map(|arg| arg.render_in(scope))
                    .collect();
                out.push('<');
                out.push_str(&args.join(", "));
                out.push('>');
            }
        }
        push_array_suffix(&mut out, self.array_rank);
        out
    }
}

fn push_array_suffix(out: &mut String, rank: u8) {
    if rank > 0 {
        out.push('[');
        for _ in 1..rank {
            out.push(',');
        }
        out.push(']');
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_in(&NameScope::default()))
    }
}

/// The namespaces visible from a point in a generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameScope {
    usings: Vec<String>,
    namespace: Option<String>,
}

impl NameScope {
    /// Create a scope with the given `using` directives.
    pub fn new(usings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            usings: usings.into_iter().map(Into::into).collect(),
            namespace: None,
        }
    }

    /// Enter a namespace declaration.
    pub fn within(&self, namespace: &str) -> Self {
        let namespace = match &self.namespace {
            Some(outer) => format!("{}.{}", outer, namespace),
            None => namespace.to_string(),
        };
        Self {
            usings: self.usings.clone(),
            namespace: Some(namespace),
        }
    }

    /// The enclosing namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Whether types from `namespace` can be referenced without qualification.
    pub fn imports(&self, namespace: &str) -> bool {
        if self.usings.iter().any(|using| using == namespace) {
            return true;
        }
        match &self.namespace {
            Some(current) => {
                current == namespace
                    || current
                        .strip_prefix(namespace)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
            None => false,
        }
    }
}
