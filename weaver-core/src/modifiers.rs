//! Access and member modifier flags.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Access level and modifier keywords of a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u32 {
        /// Accessible from anywhere
        const PUBLIC = 1 << 0;
        /// Accessible from the declaring type and derived types
        const PROTECTED = 1 << 1;
        /// Accessible from the declaring assembly
        const INTERNAL = 1 << 2;
        /// Accessible only from the declaring type
        const PRIVATE = 1 << 3;
        /// Compile-time constant field
        const CONST = 1 << 4;
        /// Member belongs to the type rather than an instance
        const STATIC = 1 << 5;
        /// Field can only be assigned during construction
        const READONLY = 1 << 6;
        /// Type cannot be inherited / member cannot be overridden further
        const SEALED = 1 << 7;
        /// Declaration has no implementation
        const ABSTRACT = 1 << 8;
        /// Member can be overridden
        const VIRTUAL = 1 << 9;
        /// Member overrides an inherited member
        const OVERRIDE = 1 << 10;
        /// Member hides an inherited member
        const NEW = 1 << 11;
        /// Type declaration may be split across files
        const PARTIAL = 1 << 12;
    }
}

impl Modifiers {
    /// Every visibility flag.
    pub const VISIBILITY: Self = Self::PUBLIC
        .union(Self::PROTECTED)
        .union(Self::INTERNAL)
        .union(Self::PRIVATE);

    /// `public static`, the usual modifiers for generated members.
    pub const PUBLIC_STATIC: Self = Self::PUBLIC.union(Self::STATIC);

    /// `public const`, the modifiers of generated constants.
    pub const PUBLIC_CONST: Self = Self::PUBLIC.union(Self::CONST);

    /// Only the visibility flags of this set.
    pub fn visibility(self) -> Self {
        self & Self::VISIBILITY
    }

    /// Replace the visibility flags with `visibility`.
    pub fn with_visibility(self, visibility: Self) -> Self {
        (self - Self::VISIBILITY) | visibility.visibility()
    }

    /// Whether the member belongs to the type itself (`static` or `const`).
    pub fn is_static(self) -> bool {
        self.intersects(Self::STATIC | Self::CONST)
    }

    /// The form used when comparing against compiled members.
    ///
    /// `partial` has no compiled trace and a missing visibility means `private`.
    pub fn normalized(self) -> Self {
        let modifiers = self - Self::PARTIAL;
        if modifiers.visibility().is_empty() {
            modifiers | Self::PRIVATE
        } else {
            modifiers
        }
    }

    /// The visibility keyword(s), if any visibility flag is set.
    pub fn visibility_keyword(self) -> Option<&'static str> {
        let visibility = self.visibility();
        if visibility.contains(Self::PUBLIC) {
            Some("public")
        } else if visibility.contains(Self::PROTECTED | Self::INTERNAL) {
            Some("protected internal")
        } else if visibility.contains(Self::PRIVATE | Self::PROTECTED) {
            Some("private protected")
        } else if visibility.contains(Self::INTERNAL) {
            Some("internal")
        } else if visibility.contains(Self::PROTECTED) {
            Some("protected")
        } else if visibility.contains(Self::PRIVATE) {
            Some("private")
        } else {
            None
        }
    }

    /// Render the keywords in declaration order.
    ///
    /// Visibility first, then `const`/`static`/`readonly`, then
    /// `sealed`/`abstract`/`virtual`/`override`/`new`, then `partial`.
    /// Regenerated files depend on this order staying fixed.
    pub fn keywords(self) -> String {
        const ORDERED: [(Modifiers, &str); 9] = [
            (Modifiers::CONST, "const"),
            (Modifiers::STATIC, "static"),
            (Modifiers::READONLY, "readonly"),
            (Modifiers::SEALED, "sealed"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::VIRTUAL, "virtual"),
            (Modifiers::OVERRIDE, "override"),
            (Modifiers::NEW, "new"),
            (Modifiers::PARTIAL, "partial"),
        ];

        let mut words: Vec<&str> = Vec::new();
        if let Some(visibility) = self.visibility_keyword() {
            words.push(visibility);
        }
        for (flag, word) in ORDERED {
            if self.contains(flag) {
                words.push(word);
            }
        }
        words.join(" ")
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keywords())
    }
}

/// Modifier applied to a method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    /// Passed by value.
    #[default]
    None,
    /// `ref` parameter.
    Ref,
    /// `out` parameter.
    Out,
    /// `in` parameter.
    In,
    /// `params` array.
    Params,
    /// `this` parameter of an extension method.
    This,
}

impl ParameterModifier {
    /// The keyword to place before the parameter type.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            Self::In => Some("in"),
            Self::Params => Some("params"),
            Self::This => Some("this"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_order() {
        let modifiers = Modifiers::STATIC | Modifiers::PUBLIC | Modifiers::READONLY;
        assert_eq!(modifiers.keywords(), "public static readonly");

        let modifiers = Modifiers::PARTIAL | Modifiers::SEALED | Modifiers::INTERNAL;
        assert_eq!(modifiers.keywords(), "internal sealed partial");

        let modifiers = Modifiers::NEW | Modifiers::PUBLIC | Modifiers::STATIC;
        assert_eq!(modifiers.keywords(), "public static new");
    }

    #[test]
    fn test_combined_visibility() {
        assert_eq!(
            (Modifiers::PROTECTED | Modifiers::INTERNAL).keywords(),
            "protected internal"
        );
        assert_eq!(
            (Modifiers::PRIVATE | Modifiers::PROTECTED).keywords(),
            "private protected"
        );
    }

    #[test]
    fn test_empty_modifiers() {
        assert_eq!(Modifiers::empty().keywords(), "");
        assert_eq!(Modifiers::empty().visibility_keyword(), None);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(
            Modifiers::STATIC.normalized(),
            Modifiers::PRIVATE | Modifiers::STATIC
        );
        assert_eq!(
            (Modifiers::PUBLIC | Modifiers::PARTIAL).normalized(),
            Modifiers::PUBLIC
        );
    }

    #[test]
    fn test_with_visibility() {
        let modifiers = Modifiers::PRIVATE | Modifiers::STATIC;
        assert_eq!(
            modifiers.with_visibility(Modifiers::PUBLIC),
            Modifiers::PUBLIC_STATIC
        );
    }

    #[test]
    fn test_is_static() {
        assert!(Modifiers::PUBLIC_CONST.is_static());
        assert!(Modifiers::PUBLIC_STATIC.is_static());
        assert!(!Modifiers::PUBLIC.is_static());
    }

    #[test]
    fn test_parameter_modifier_keyword() {
        assert_eq!(ParameterModifier::None.keyword(), None);
        assert_eq!(ParameterModifier::Out.keyword(), Some("out"));
        assert_eq!(ParameterModifier::This.keyword(), Some("this"));
    }
}
