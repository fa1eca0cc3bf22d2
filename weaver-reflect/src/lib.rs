//! Reflection facts about previously compiled types.
//!
//! The host compiler reports what it compiled as a [`ReflectedAssembly`];
//! the generator only ever reads these facts through a [`ReflectionSnapshot`]
//! obtained from a [`SnapshotCache`].
//!
//! # Architecture
//!
//! ```text
//! host reflection (JSON) → ReflectedAssembly → SnapshotCache → ReflectionSnapshot → reconcile
//! ```

mod cache;
mod member;
mod snapshot;

pub use cache::{SnapshotCache, TypeSource};
pub use member::{
    GetterResult, MemberKind, ReflectedAccessor, ReflectedAssembly, ReflectedConstructor,
    ReflectedField, ReflectedMember, ReflectedMethod, ReflectedParameter, ReflectedProperty,
    ReflectedType,
};
pub use snapshot::ReflectionSnapshot;
