//! C# identifier utilities.

use std::borrow::Cow;

/// Reserved C# keywords that need an `@` prefix to be used as identifiers.
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Check if a name is a reserved C# keyword.
pub fn is_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Prefix `name` with `@` when it is a keyword.
///
/// ```
/// use weaver_core::escape_keyword;
///
/// assert_eq!(escape_keyword("class"), "@class");
/// assert_eq!(escape_keyword("Water"), "Water");
/// ```
pub fn escape_keyword(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("@{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// The name a compiler records for an identifier, without the verbatim `@`.
pub fn unescape_identifier(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Check if `name` can be used as an identifier as-is.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    chars.all(is_identifier_part) && !is_keyword(name)
}

/// Convert arbitrary text into a valid identifier.
///
/// A leading digit gets a `_` prefix and any other invalid leading character
/// becomes `_`. Invalid characters after that are dropped, or replaced with
/// `_` when `replace_with_underscores` is set. Keywords are escaped with `@`.
///
/// ```
/// use weaver_core::to_identifier;
///
/// assert_eq!(to_identifier("Ignore Raycast", false), "IgnoreRaycast");
/// assert_eq!(to_identifier("Ignore Raycast", true), "Ignore_Raycast");
/// assert_eq!(to_identifier("2D Lights", false), "_2DLights");
/// assert_eq!(to_identifier("class", false), "@class");
/// ```
pub fn to_identifier(source: &str, replace_with_underscores: bool) -> String {
    let mut out = String::with_capacity(source.len() + 1);
    let mut chars = source.chars();

    match chars.next() {
        None => return "_".to_string(),
        Some(c) if is_identifier_start(c) => out.push(c),
        Some(c) if is_identifier_part(c) => {
            out.push('_');
            out.push(c);
        }
        Some(_) => out.push('_'),
    }

    for c in chars {
        if is_identifier_part(c) {
            out.push(c);
        } else if replace_with_underscores {
            out.push('_');
        }
    }

    escape_keyword(&out).into_owned()
}
