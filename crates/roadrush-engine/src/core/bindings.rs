use std::collections::HashMap;
use crate::api::types::EntityId;

/// Handle table mapping logical node names to entities.
/// Filled once at scene setup; lookups afterwards never touch the Scene.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    handles: HashMap<String, EntityId>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to an entity. The first binding for a name wins,
    /// matching a depth-first "first node with this name" search.
    pub fn bind(&mut self, name: impl Into<String>, id: EntityId) {
        self.handles.entry(name.into()).or_insert(id);
    }

    pub fn get(&self, name: &str) -> Option<EntityId> {
        self.handles.get(name).copied()
    }

    /// Resolve several names in order, skipping the ones that are unbound.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<EntityId> {
        names.iter().filter_map(|n| self.get(n.as_ref())).collect()
    }

    /// Names from the list that have no binding.
    pub fn missing<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| self.get(n).is_none())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
