//=========================================================================
// Scene Graph Arena
//=========================================================================
//
// Owns every scene node and the edges between them.
//
// Responsibilities:
// - Insert and look up nodes by `NodeKey`
// - Attach/detach children, keeping both edge ends consistent
// - Propagate global transforms down a subtree after any change
// - Tear down whole subtrees
//
// Global transform rule:
// ```text
//   global = identity ⊕ local props
//   global.matrix = global.matrix × parent.global.matrix
//   global.translation = (P.m00·local.x + P.x, P.m11·local.y + P.y)
// ```
// The child's offset is scaled by the parent but not rotated by it: a
// rotating parent spins its children in place instead of orbiting them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;
use slotmap::{new_key_type, SlotMap};

//=== Internal Dependencies ===============================================

use super::node::SceneNode;
use crate::core::math::{Transform, TransformProps};

//=== NodeKey =============================================================

new_key_type! {
    /// Arena handle for a [`SceneNode`]. Stale keys resolve to `None`.
    pub struct NodeKey;
}

//=== Global Derivation ===================================================

/// Global transform of a node with `local` props under `parent`'s global
/// transform (`None` for roots).
pub(crate) fn derive_global(local: &Transform, parent: Option<&Transform>) -> Transform {
    let mut global = Transform::new(local.props());
    if let Some(parent) = parent {
        global.compose_from_matrix(parent.matrix());
        global.override_translation(
            parent.scale_x_cell() * local.x() + parent.x(),
            parent.scale_y_cell() * local.y() + parent.y(),
        );
    }
    global
}

//=== SceneGraph ==========================================================

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Lookup -----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.keys()
    }

    /// `key` followed by all its descendants, depth-first in child order.
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// True when `ancestor` appears on `key`'s parent chain (or is `key`).
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    //--- Insertion & Removal ---------------------------------------------

    pub fn insert(&mut self, node: SceneNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Removes `key` and every descendant, detaching it from its parent
    /// first. Returns the removed nodes in depth-first order.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Vec<SceneNode> {
        self.unlink_from_parent(key);
        self.descendants(key)
            .into_iter()
            .filter_map(|k| self.nodes.remove(k))
            .collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    //--- Edges ------------------------------------------------------------

    /// Appends `children` to `parent`, re-parenting any that already have
    /// a parent. Each attached child's subtree gets its global transform
    /// re-derived. Returns how many were attached.
    ///
    /// Missing keys and attachments that would form a cycle are skipped.
    pub fn attach_children(&mut self, parent: NodeKey, children: &[NodeKey]) -> usize {
        if !self.nodes.contains_key(parent) {
            warn!("Cannot attach children to a missing parent");
            return 0;
        }

        let mut attached = 0;
        for &child in children {
            if !self.nodes.contains_key(child) || self.is_ancestor(child, parent) {
                warn!("Skipping child that is missing or would create a cycle");
                continue;
            }

            self.unlink_from_parent(child);
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(parent);
            }
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.push(child);
            }
            self.recompute_global_transform(child);
            attached += 1;
        }
        attached
    }

    /// Makes `key` a root again. Returns `false` if it had no parent.
    pub fn detach(&mut self, key: NodeKey) -> bool {
        let had_parent = self.unlink_from_parent(key);
        if had_parent {
            self.recompute_global_transform(key);
        }
        had_parent
    }

    fn unlink_from_parent(&mut self, key: NodeKey) -> bool {
        let Some(parent) = self.nodes.get_mut(key).and_then(|n| n.parent.take()) else {
            return false;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != key);
        }
        true
    }

    //--- Transforms -------------------------------------------------------

    /// Relative update of the local transform, then propagation.
    pub fn update_local_transform(&mut self, key: NodeKey, props: TransformProps) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        node.local.update_with_props(props);
        self.recompute_global_transform(key);
        true
    }

    /// Absolute update of the local transform, then propagation.
    pub fn set_local_transform(&mut self, key: NodeKey, props: TransformProps) -> bool {
        let Some(node) = self.nodes.get_mut(key) else {
            return false;
        };
        node.local.set_with_props(props);
        self.recompute_global_transform(key);
        true
    }

    /// Re-derives the global transform of `key` and all descendants. A
    /// parent key that no longer resolves is treated as no parent.
    pub fn recompute_global_transform(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let parent_global = node.parent.and_then(|p| self.nodes.get(p)).map(|p| p.global);
        let global = derive_global(&node.local, parent_global.as_ref());

        let children = match self.nodes.get_mut(key) {
            Some(node) => {
                node.global = global;
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.recompute_global_transform(child);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NodeKind;
    use crate::core::graph::NodeProps;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn node(props: NodeProps) -> SceneNode {
        SceneNode::new(props, NodeKind::Shape)
    }

    //=====================================================================
    // Composition
    //=====================================================================

    #[test]
    fn child_offset_is_scaled_not_rotated() {
        for parent_angle in [0.0, FRAC_PI_2, PI, 1.2] {
            let mut graph = SceneGraph::new();
            let parent = graph.insert(node(NodeProps::new().at(0.1, -0.2).size(0.65, 0.65).angle(parent_angle)));
            let child = graph.insert(node(NodeProps::new().at(0.3, 0.4)));
            graph.attach_children(parent, &[child]);

            let p = graph.get(parent).expect("parent").global;
            let c = graph.get(child).expect("child").global;

            assert_relative_eq!(c.x(), p.scale_x_cell() * 0.3 + p.x(), epsilon = 1e-12);
            assert_relative_eq!(c.y(), p.scale_y_cell() * 0.4 + p.y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn child_inherits_rotation_and_scale() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(node(NodeProps::new().size(0.5, 0.5).angle(0.4)));
        let child = graph.insert(node(NodeProps::new().size(0.2, 0.2).angle(0.1)));
        graph.attach_children(parent, &[child]);

        let c = graph.get(child).expect("child").global;
        assert_relative_eq!(c.angle(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.w(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn parent_update_propagates_to_grandchildren() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(node(NodeProps::new()));
        let mid = graph.insert(node(NodeProps::new().at(0.1, 0.0)));
        let leaf = graph.insert(node(NodeProps::new().at(0.1, 0.0)));
        graph.attach_children(root, &[mid]);
        graph.attach_children(mid, &[leaf]);

        graph.update_local_transform(root, TransformProps::new().x(0.2));

        assert_relative_eq!(graph.get(leaf).expect("leaf").global.x(), 0.4, epsilon = 1e-12);
    }

    //=====================================================================
    // Edges
    //=====================================================================

    #[test]
    fn attach_reparents_and_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(node(NodeProps::new()));
        let b = graph.insert(node(NodeProps::new()));
        let c = graph.insert(node(NodeProps::new()));

        assert_eq!(graph.attach_children(a, &[c]), 1);
        assert_eq!(graph.attach_children(b, &[c]), 1);
        assert!(graph.get(a).expect("a").children().is_empty(), "old parent must drop the child");
        assert_eq!(graph.get(c).expect("c").parent(), Some(b));

        assert_eq!(graph.attach_children(c, &[b]), 0, "b is c's ancestor");
        assert_eq!(graph.attach_children(c, &[c]), 0, "self-attachment");
    }

    #[test]
    fn detach_restores_root_transform() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(node(NodeProps::new().at(0.3, 0.3).size(2.0, 2.0)));
        let child = graph.insert(node(NodeProps::new().at(0.1, 0.1)));
        graph.attach_children(parent, &[child]);

        assert!(graph.detach(child));
        assert!(!graph.detach(child), "second detach is a no-op");
        let c = graph.get(child).expect("child");
        assert_eq!(c.global(), c.local());
    }

    #[test]
    fn missing_parent_is_treated_as_root() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(node(NodeProps::new().at(0.3, 0.3)));
        let child = graph.insert(node(NodeProps::new().at(0.1, 0.1)));
        graph.attach_children(parent, &[child]);

        // Drop the parent without going through remove_subtree.
        graph.nodes.remove(parent);
        graph.recompute_global_transform(child);

        let c = graph.get(child).expect("child");
        assert_eq!(c.global(), c.local());
    }

    //=====================================================================
    // Removal
    //=====================================================================

    #[test]
    fn remove_subtree_takes_all_descendants() {
        let mut graph = SceneGraph::new();
        let keep = graph.insert(node(NodeProps::new()));
        let root = graph.insert(node(NodeProps::new()));
        let a = graph.insert(node(NodeProps::new()));
        let b = graph.insert(node(NodeProps::new()));
        graph.attach_children(keep, &[root]);
        graph.attach_children(root, &[a, b]);

        assert_eq!(graph.descendants(root), vec![root, a, b]);
        assert_eq!(graph.remove_subtree(root).len(), 3);
        assert_eq!(graph.len(), 1);
        assert!(graph.get(keep).expect("keep").children().is_empty());
        assert!(graph.remove_subtree(root).is_empty(), "stale key removes nothing");
    }
}
