//=========================================================================
// Input Buffer
//
// Collects the window's input between two redraws, split into discrete
// and continuous events. Acts as the transient aggregator between the
// winit callbacks and the frame-boundary flush.
//
// Responsibilities:
// - Keep discrete inputs in arrival order (key and button edges)
// - Drop a discrete input identical to the one just before it
// - Coalesce continuous inputs (cursor, touch, resize) to their latest value
// - Hand both lists to the flush via `drain()`
//
// Notes:
// The buffer is emptied on every redraw; an empty buffer drains to `None`
// so nothing is sent for quiet frames.
//
//=========================================================================

//=== External Dependencies ===============================================

use indexmap::IndexSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// One frame's worth of window input.
///
/// Continuous events live in an insertion-ordered set whose equality
/// ignores coordinates, so a newer `CursorMoved` replaces the older one
/// while keeping its slot relative to a `Resized` seen earlier.
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: IndexSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: IndexSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Pushing ----------------------------------------------------------

    /// Routes `event` by its continuity.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    /// Inserts or replaces the latest event of this kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends a key or button edge unless it repeats the previous one.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes both lists and empties the buffer. `None` when nothing was
    /// buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain(..).collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn cursor(x: f64, y: f64) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    #[test]
    fn repeated_discrete_event_is_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_discrete(InputEvent::KeyUp { key: KeyCode::Space });
        buffer.push_discrete(key_down(KeyCode::Space));

        assert_eq!(buffer.discrete.len(), 3, "only back-to-back duplicates are dropped");
    }

    #[test]
    fn continuous_keeps_latest_value() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(cursor(10.0, 10.0));
        buffer.push_continuous(cursor(20.0, 30.0));

        assert_eq!(buffer.continuous.len(), 1, "cursor moves must coalesce");
        match buffer.continuous.first() {
            Some(InputEvent::CursorMoved { x, y }) => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("Expected CursorMoved, found {:?}", other),
        }
    }

    #[test]
    fn push_routes_by_continuity() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::MouseButtonDown { button: MouseButton::Left });
        buffer.push(InputEvent::Resized { width: 800, height: 600 });
        buffer.push(cursor(1.0, 2.0));

        assert_eq!(buffer.discrete.len(), 1);
        assert_eq!(buffer.continuous.len(), 2);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn drain_empties_the_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_continuous(cursor(5.0, 5.0));

        let (discrete, continuous) = buffer.drain().expect("buffer had events");
        assert_eq!(discrete.len(), 1);
        assert_eq!(continuous.len(), 1);
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none(), "second drain has nothing to send");
    }

    #[test]
    fn drain_keeps_capacity() {
        let mut buffer = InputBuffer::new();
        for i in 0..200 {
            let key = if i % 2 == 0 { KeyCode::Space } else { KeyCode::Enter };
            buffer.push_discrete(key_down(key));
        }
        let capacity = buffer.discrete.capacity();

        buffer.drain();

        assert_eq!(buffer.discrete.capacity(), capacity, "storage is reused across frames");
    }
}
