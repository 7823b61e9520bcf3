use glam::Vec2;

/// Input events the game understands. Pointer only; there is no keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// Button released at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// Pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Window closed.
    Quit,
}

impl InputEvent {
    fn pointer(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(Vec2::new(x, y)),
            InputEvent::Quit => None,
        }
    }
}

/// A queue of input events plus the latest known pointer position.
/// The platform layer pushes events as they arrive; the game drains them
/// once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
    pointer: Vec2,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            pointer: Vec2::ZERO,
        }
    }

    /// Push a new input event. Pointer events also move the tracked pointer.
    pub fn push(&mut self, event: InputEvent) {
        if let Some(pos) = event.pointer() {
            self.pointer = pos;
        }
        self.events.push(event);
    }

    /// Current pointer position.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Quit);
        assert_eq!(q.len(), 2);
        assert_eq!(q.iter().count(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn pointer_follows_latest_pointer_event() {
        let mut q = InputQueue::new();
        assert_eq!(q.pointer(), Vec2::ZERO);
        q.push(InputEvent::PointerMove { x: 5.0, y: 6.0 });
        q.push(InputEvent::PointerUp { x: 7.0, y: 8.0 });
        q.push(InputEvent::Quit);
        assert_eq!(q.pointer(), Vec2::new(7.0, 8.0));

        // Draining events keeps the last position.
        q.drain();
        assert_eq!(q.pointer(), Vec2::new(7.0, 8.0));
    }
}
