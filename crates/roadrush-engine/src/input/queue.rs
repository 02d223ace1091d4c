/// Key code the host sends for the space bar.
pub const KEY_SPACE: u32 = 32;

/// Input event types the engine understands.
/// Generic: the game decides what a tap means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
}

impl InputEvent {
    /// Whether the event counts as a tap (touch, click, or space bar).
    pub fn is_tap(&self) -> bool {
        match self {
            InputEvent::PointerDown { .. } => true,
            InputEvent::KeyDown { key_code } => *key_code == KEY_SPACE,
        }
    }
}

/// A queue of input events.
/// The host writes events into the queue; the game drains them once per step.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Number of taps waiting in the queue.
    pub fn taps(&self) -> usize {
        self.events.iter().filter(|e| e.is_tap()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
