//=========================================================================
// Listener Registry
//=========================================================================
//
// Which live nodes want which inputs.
//
// Nodes are wired when the lifecycle manager adds them and unwired when
// it removes them, so a destroyed node can never receive input. Dispatch
// order is wiring order (`IndexMap`), which keeps input handling
// deterministic across runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use indexmap::IndexMap;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};
use crate::core::graph::NodeKey;

//=== Listener ============================================================

/// One input subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Down and up of one key.
    Key(KeyCode),

    /// Pointer button down and up (any button).
    PointerButton,
}

impl Listener {
    pub fn matches(&self, event: &InputEvent) -> bool {
        match (self, event) {
            (Listener::Key(wanted), InputEvent::KeyDown { key } | InputEvent::KeyUp { key }) => {
                wanted == key
            }
            (
                Listener::PointerButton,
                InputEvent::MouseButtonDown { .. } | InputEvent::MouseButtonUp { .. },
            ) => true,
            _ => false,
        }
    }
}

//=== ListenerRegistry ====================================================

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    wired: IndexMap<NodeKey, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `key` to `listeners`. Nothing is recorded for an empty
    /// list. Re-wiring replaces the previous subscriptions in place.
    pub fn wire(&mut self, key: NodeKey, listeners: Vec<Listener>) -> bool {
        if listeners.is_empty() {
            return false;
        }
        self.wired.insert(key, listeners);
        true
    }

    /// Drops every subscription of `key`. No-op when it had none.
    pub fn unwire(&mut self, key: NodeKey) -> bool {
        self.wired.shift_remove(&key).is_some()
    }

    pub fn is_wired(&self, key: NodeKey) -> bool {
        self.wired.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.wired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wired.is_empty()
    }

    pub fn clear(&mut self) {
        self.wired.clear();
    }

    /// Nodes interested in `event`, in wiring order.
    pub fn subscribers(&self, event: &InputEvent) -> Vec<NodeKey> {
        self.wired
            .iter()
            .filter(|(_, listeners)| listeners.iter().any(|l| l.matches(event)))
            .map(|(&key, _)| key)
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<NodeKey> {
        let mut map: SlotMap<NodeKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn subscribers_follow_wiring_order() {
        let k = keys(3);
        let mut registry = ListenerRegistry::new();
        registry.wire(k[2], vec![Listener::PointerButton]);
        registry.wire(k[0], vec![Listener::Key(KeyCode::Space), Listener::PointerButton]);
        registry.wire(k[1], vec![Listener::Key(KeyCode::Escape)]);

        let down = InputEvent::MouseButtonDown { button: MouseButton::Left };
        assert_eq!(registry.subscribers(&down), vec![k[2], k[0]]);

        let space = InputEvent::KeyUp { key: KeyCode::Space };
        assert_eq!(registry.subscribers(&space), vec![k[0]]);

        let escape = InputEvent::KeyDown { key: KeyCode::Escape };
        assert_eq!(registry.subscribers(&escape), vec![k[1]]);
        assert!(registry.subscribers(&InputEvent::CursorLeft).is_empty());
    }

    #[test]
    fn unwired_node_receives_nothing() {
        let k = keys(1);
        let mut registry = ListenerRegistry::new();
        registry.wire(k[0], vec![Listener::Key(KeyCode::Space)]);

        assert!(registry.unwire(k[0]));
        assert!(!registry.unwire(k[0]), "unwiring twice is a no-op");
        assert!(registry.subscribers(&InputEvent::KeyDown { key: KeyCode::Space }).is_empty());
    }

    #[test]
    fn empty_listener_list_is_not_recorded() {
        let k = keys(1);
        let mut registry = ListenerRegistry::new();
        assert!(!registry.wire(k[0], Vec::new()));
        assert!(!registry.is_wired(k[0]));
    }

    #[test]
    fn key_listener_ignores_other_keys() {
        assert!(!Listener::Key(KeyCode::Space).matches(&InputEvent::KeyDown { key: KeyCode::Enter }));
        assert!(!Listener::PointerButton.matches(&InputEvent::Resized { width: 1, height: 1 }));
    }
}
