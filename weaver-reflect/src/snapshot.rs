use weaver_core::{Modifiers, TypeName};

use crate::member::{ReflectedMember, ReflectedType};

/// What the generator may observe about one previously compiled type.
///
/// Compiler-generated methods (property accessors, operators) are dropped so
/// every remaining member corresponds to something a script declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionSnapshot {
    name: TypeName,
    modifiers: Modifiers,
    base_type: Option<TypeName>,
    is_obsolete: bool,
    members: Vec<ReflectedMember>,
}

impl ReflectionSnapshot {
    /// Project a compiled type into a snapshot.
    pub fn new(ty: &ReflectedType) -> Self {
        Self {
            name: ty.name.clone(),
            modifiers: ty.modifiers,
            base_type: ty.base_type.clone(),
            is_obsolete: ty.is_obsolete,
            members: project_members(&ty.members),
        }
    }

    /// The type's identity.
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Reflection-style qualified name, e.g. `Weaver.Layers+Masks`.
    pub fn qualified_name(&self) -> String {
        self.name.full_name()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Base type, `None` when the type derives from `object`.
    pub fn base_type(&self) -> Option<&TypeName> {
        self.base_type.as_ref()
    }

    pub fn is_obsolete(&self) -> bool {
        self.is_obsolete
    }

    /// Declared members in reflection order.
    pub fn members(&self) -> &[ReflectedMember] {
        &self.members
    }

    /// Find a nested type by simple name.
    pub fn nested_type(&self, name: &str) -> Option<ReflectionSnapshot> {
        self.members.iter().find_map(|member| match member {
            ReflectedMember::NestedType(ty) if ty.name.name == name => {
                Some(ReflectionSnapshot::new(ty))
            }
            _ => None,
        })
    }
}

fn project_members(members: &[ReflectedMember]) -> Vec<ReflectedMember> {
    members
        .iter()
        .filter_map(|member| match member {
            ReflectedMember::Method(method) if method.special_name => None,
            ReflectedMember::NestedType(ty) => {
                let mut ty = ty.clone();
                ty.members = project_members(&ty.members);
                Some(ReflectedMember::NestedType(ty))
            }
            other => Some(other.clone()),
        })
        .collect()
}
