//=========================================================================
// Object Lifecycle
//=========================================================================
//
// Registration of nodes with the frame engine.
//
// `add_object` and `remove_object` walk a node and its whole subtree:
//
// ```text
//   add_object(node, layer)            remove_object(node)
//     id ← next_id() if absent           layers.remove(node)
//     rendered ← true                    listeners.unwire(node)
//     layers.add(node, layer)            rendered ← false
//     geometry init (first add only)     recurse into children
//     listeners.wire(node)
//     layer ← layer
//     recurse into children
// ```
//
// Removal only unregisters; `destroy_object` also drops the subtree from
// the arena. Either way a node that is no longer registered can neither
// be visited nor receive input.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Game, Hud};
use crate::content::behavior;
use crate::core::graph::NodeKey;

//=== Lifecycle ===========================================================

impl Game {
    /// Registers `key` and its descendants at `layer`.
    pub fn add_object(&mut self, key: NodeKey, layer: u32) {
        let ids = &mut self.ids;
        let Some(node) = self.graph.get_mut(key) else {
            warn!("Cannot add a node that is not in the scene graph");
            return;
        };

        if node.id.is_none() {
            node.id = Some(ids.next_id());
        }
        node.rendered = true;

        if node.kind.is_some() && node.claim_geometry_init() {
            if let Some(points) = node.kind().and_then(behavior::init_geometry) {
                node.set_points(points);
            }
        }
        let listeners = node.kind().map(behavior::listeners).unwrap_or_default();
        node.layer = layer;
        let children = node.children.clone();

        self.layers.add(key, layer);
        self.listeners.wire(key, listeners);
        for child in children {
            self.add_object(child, layer);
        }
    }

    /// Unregisters `key` and its descendants. The nodes stay in the arena
    /// and can be added again. Removing an unregistered node is a no-op.
    pub fn remove_object(&mut self, key: NodeKey) {
        let Some(node) = self.graph.get_mut(key) else {
            return;
        };
        node.rendered = false;
        let children = node.children.clone();

        self.layers.remove(key);
        self.listeners.unwire(key);
        for child in children {
            self.remove_object(child);
        }
    }

    /// Unregisters `key`'s subtree and drops it from the arena.
    pub fn destroy_object(&mut self, key: NodeKey) {
        self.remove_object(key);
        self.graph.remove_subtree(key);

        let graph = &self.graph;
        let alive = |slot: Option<NodeKey>| slot.filter(|&k| graph.contains(k));
        self.level = alive(self.level);
        self.player = alive(self.player);
        self.hud = Hud {
            score: alive(self.hud.score),
            lives: alive(self.hud.lives),
        };
    }

    /// Tears down the whole scene: every live node, its listeners, and the
    /// per-scene references held by the game.
    pub(crate) fn clear_layers(&mut self) {
        let cleared = self.layers.clear();
        for &key in &cleared {
            self.listeners.unwire(key);
        }
        let total = self.graph.len();
        self.graph.clear();
        self.listeners.clear();

        self.level = None;
        self.player = None;
        self.hud = Hud::default();
        self.death = None;
        self.click_action = None;
        self.pointer_down = false;
        self.transitions.clear();
        debug!("Cleared {} live nodes ({} in the arena)", cleared.len(), total);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::player::Player;
    use crate::content::NodeKind;
    use crate::core::game::testing;
    use crate::core::graph::NodeProps;
    use crate::core::input::{InputEvent, KeyCode};

    fn family(game: &mut Game) -> (NodeKey, NodeKey, NodeKey) {
        let parent = game.spawn(NodeProps::new(), NodeKind::Shape);
        let a = game.spawn(NodeProps::new(), NodeKind::Player(Player::new()));
        let b = game.spawn(NodeProps::new().with_id(77), NodeKind::Player(Player::new()));
        game.graph.attach_children(parent, &[a, b]);
        (parent, a, b)
    }

    //=====================================================================
    // Recursion
    //=====================================================================

    #[test]
    fn add_registers_whole_subtree() {
        let (mut game, _tx, _log) = testing::game();
        let (parent, a, b) = family(&mut game);

        game.add_object(parent, 2);

        assert_eq!(game.layers.layer(2), vec![parent, a, b], "parent first, then children in order");
        for key in [parent, a, b] {
            let node = game.graph.get(key).expect("node");
            assert!(node.is_rendered());
            assert_eq!(node.layer(), 2);
            assert!(node.id().is_some());
        }
        assert_eq!(game.graph.get(b).and_then(|n| n.id()), Some(77), "existing id is kept");
        assert_eq!(game.listeners.len(), 2, "both players are wired");
        assert!(!game.graph.get(a).expect("a").points().is_empty(), "geometry initialized");
    }

    #[test]
    fn remove_unregisters_and_unwires_all_three() {
        let (mut game, _tx, _log) = testing::game();
        let (parent, a, b) = family(&mut game);
        game.add_object(parent, 0);

        game.remove_object(parent);

        assert!(game.layers.is_empty());
        assert!(game.listeners.is_empty());
        for key in [parent, a, b] {
            assert!(!game.graph.get(key).expect("node stays in arena").is_rendered());
        }
        let space = InputEvent::KeyDown { key: KeyCode::Space };
        assert!(game.listeners.subscribers(&space).is_empty());

        game.remove_object(parent);
        assert!(game.layers.is_empty(), "double removal is a no-op");
    }

    #[test]
    fn readding_assigns_ids_only_to_idless_nodes() {
        let (mut game, _tx, _log) = testing::game();
        let parent = game.spawn(NodeProps::new(), NodeKind::Shape);
        let child = game.spawn(NodeProps::new().with_id(5), NodeKind::Shape);
        game.graph.attach_children(parent, &[child]);

        game.add_object(parent, 0);
        let parent_id = game.graph.get(parent).and_then(|n| n.id());
        game.remove_object(parent);
        game.add_object(parent, 1);

        assert_eq!(game.graph.get(parent).and_then(|n| n.id()), parent_id, "no new id on re-add");
        assert_eq!(game.graph.get(child).and_then(|n| n.id()), Some(5));
        assert_eq!(game.layers.layer(1), vec![parent, child]);
        assert_eq!(game.ids.next_id(), parent_id.map_or(0, |id| id + 1), "exactly one id was issued");
    }

    #[test]
    fn geometry_is_initialized_once() {
        let (mut game, _tx, _log) = testing::game();
        let key = game.spawn(NodeProps::new(), NodeKind::Player(Player::new()));
        game.add_object(key, 0);
        game.graph.get_mut(key).expect("node").set_points(Vec::new());

        game.remove_object(key);
        game.add_object(key, 0);

        assert!(game.graph.get(key).expect("node").points().is_empty(), "re-add must not reset geometry");
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn destroy_drops_subtree_from_arena() {
        let (mut game, _tx, _log) = testing::game();
        let (parent, a, b) = family(&mut game);
        game.add_object(parent, 0);

        game.destroy_object(parent);

        assert!(game.graph.is_empty());
        assert!(game.layers.is_empty());
        assert!(game.listeners.is_empty());
        assert!(!game.graph.contains(a) && !game.graph.contains(b));
    }

    #[test]
    fn clear_layers_empties_everything() {
        let (mut game, _tx, _log) = testing::game();
        let (parent, _, _) = family(&mut game);
        game.add_object(parent, 0);
        game.spawn(NodeProps::new(), NodeKind::Shape);

        game.clear_layers();

        assert!(game.graph.is_empty(), "unregistered nodes go too");
        assert!(game.layers.is_empty());
        assert!(game.listeners.is_empty());
    }
}
