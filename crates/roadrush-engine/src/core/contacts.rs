use crate::api::types::EntityId;

/// Two collidable entities began touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
}

impl ContactEvent {
    pub fn new(entity_a: EntityId, entity_b: EntityId) -> Self {
        Self { entity_a, entity_b }
    }

    pub fn involves(&self, id: EntityId) -> bool {
        self.entity_a == id || self.entity_b == id
    }
}

/// Contact-begin events waiting for the game to react.
/// Filled by contact detection (or the host), drained once per step by the game.
#[derive(Debug, Default)]
pub struct ContactQueue {
    events: Vec<ContactEvent>,
}

impl ContactQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: ContactEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
