use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::member::{ReflectedAssembly, ReflectedType};
use crate::snapshot::ReflectionSnapshot;

/// Something that can look up compiled types by qualified name.
///
/// Nested types use `+` separators, e.g. `Weaver.Layers+Masks`.
pub trait TypeSource {
    fn find_type(&self, qualified_name: &str) -> Option<&ReflectedType>;
}

impl TypeSource for ReflectedAssembly {
    fn find_type(&self, qualified_name: &str) -> Option<&ReflectedType> {
        ReflectedAssembly::find_type(self, qualified_name)
    }
}

/// Memoized snapshots keyed by qualified type name.
///
/// Misses are remembered too, so a type that does not exist yet is only
/// searched for once per compile. Call [`SnapshotCache::invalidate`] after
/// the host recompiles.
pub struct SnapshotCache {
    source: Box<dyn TypeSource>,
    entries: HashMap<String, Option<Arc<ReflectionSnapshot>>>,
}

impl SnapshotCache {
    pub fn new(source: impl TypeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            entries: HashMap::new(),
        }
    }

    /// A cache over an empty source, as on a first ever run.
    pub fn empty() -> Self {
        Self::new(ReflectedAssembly::default())
    }

    /// Look up the snapshot for a qualified type name.
    pub fn get(&mut self, qualified_name: &str) -> Option<Arc<ReflectionSnapshot>> {
        if let Some(entry) = self.entries.get(qualified_name) {
            return entry.clone();
        }

        let snapshot = self
            .source
            .find_type(qualified_name)
            .map(|ty| Arc::new(ReflectionSnapshot::new(ty)));
        debug!(
            type_name = qualified_name,
            found = snapshot.is_some();
            "Resolved reflection snapshot"
        );
        self.entries.insert(qualified_name.to_string(), snapshot.clone());
        snapshot
    }

    /// Swap in freshly compiled facts and forget every memoized entry.
    pub fn invalidate(&mut self, source: impl TypeSource + 'static) {
        self.source = Box::new(source);
        self.clear();
    }

    /// Forget every memoized entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized entries, including misses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}
