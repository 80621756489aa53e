//! Keyboard input queue
//!
//! The host pushes key edges as they arrive; the state machine drains the
//! queue once per tick. At most one down and one up edge per key survive
//! per frame.

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move (held) / restart (pressed on the win screen)
    Space,
    /// Anything else, ignored by the game
    Other(char),
}

/// A key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Edges collected for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pressed: Vec<Key>,
    released: Vec<Key>,
}

impl FrameInput {
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct InputQueue {
    pending: FrameInput,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an edge; repeats of the same edge within a frame are dropped
    pub fn push(&mut self, event: KeyEvent) {
        let (list, key) = match event {
            KeyEvent::Down(key) => (&mut self.pending.pressed, key),
            KeyEvent::Up(key) => (&mut self.pending.released, key),
        };
        if !list.contains(&key) {
            list.push(key);
        }
    }

    /// Take this frame's edges, leaving the queue empty
    pub fn drain(&mut self) -> FrameInput {
        std::mem::take(&mut self.pending)
    }
}
