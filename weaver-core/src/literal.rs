//! Literal values assigned to generated fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TypeName;

/// A compile-time literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// 32 or 64 bit integer.
    Int(i64),
    /// `float` value, rendered with an `f` suffix.
    Float(f32),
    /// `double` value.
    Double(f64),
    /// String literal.
    String(String),
    /// Character literal.
    Char(char),
}

impl Literal {
    /// The type a field holding this literal would naturally have.
    ///
    /// `null` has no type of its own and maps to `object`.
    pub fn type_name(&self) -> TypeName {
        match self {
            Self::Null => TypeName::object(),
            Self::Bool(_) => TypeName::bool(),
            Self::Int(value) if i32::try_from(*value).is_ok() => TypeName::int(),
            Self::Int(_) => TypeName::long(),
            Self::Float(_) => TypeName::float(),
            Self::Double(_) => TypeName::double(),
            Self::String(_) => TypeName::string(),
            Self::Char(_) => TypeName::char(),
        }
    }

    /// Render as C# source.
    pub fn to_csharp(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) if i32::try_from(*value).is_ok() => value.to_string(),
            Self::Int(value) => format!("{}L", value),
            Self::Float(value) => {
                if value.is_nan() {
                    "float.NaN".to_string()
                } else if value.is_infinite() {
                    let sign = if *value > 0.0 { "Positive" } else { "Negative" };
                    format!("float.{}Infinity", sign)
                } else {
                    format!("{}f", value)
                }
            }
            Self::Double(value) => {
                if value.is_nan() {
                    "double.NaN".to_string()
                } else if value.is_infinite() {
                    let sign = if *value > 0.0 { "Positive" } else { "Negative" };
                    format!("double.{}Infinity", sign)
                } else {
                    let text = value.to_string();
                    if text.contains('.') || text.contains('e') {
                        text
                    } else {
                        format!("{}.0", text)
                    }
                }
            }
            Self::String(value) => {
                let mut out = String::with_capacity(value.len() + 2);
                out.push('"');
                for c in value.chars() {
                    escape_char(c, '"', &mut out);
                }
                out.push('"');
                out
            }
            Self::Char(value) => {
                let mut out = String::with_capacity(4);
                out.push('\'');
                escape_char(*value, '\'', &mut out);
                out.push('\'');
                out
            }
        }
    }
}

fn escape_char(c: char, quote: char, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
        c => out.push(c),
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csharp())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
