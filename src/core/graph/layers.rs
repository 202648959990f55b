//=========================================================================
// Layer Collection
//=========================================================================
//
// Ordered buckets of live nodes. Iteration order is ascending layer
// index, then insertion order within a layer. It is both the update order
// and the paint order.
//
// Storage:
// ```text
//   buckets: BTreeMap<layer, Bucket { slots: [Some(k0), None, Some(k2)] }>
//   index:   HashMap<NodeKey, (layer, slot)>
// ```
//
// Removal leaves a tombstone (`None`) so positions stay stable while a
// visit is in progress. Tombstones are compacted away when the next visit
// begins.
//
// Visiting contract (see `LayerVisit`):
// - nodes added during a visit, to the current or a later layer, are
//   visited in the same pass
// - nodes removed before their turn are skipped
// - no node is visited twice in one pass, even if it is removed and
//   re-added
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;

//=== Internal Dependencies ===============================================

use super::arena::NodeKey;

//=== Bucket ==============================================================

#[derive(Debug, Default)]
struct Bucket {
    slots: Vec<Option<NodeKey>>,
    live: usize,
}

//=== LayerVisit ==========================================================

/// Cursor over a [`LayerCollection`] that survives mutation of the
/// collection between steps.
#[derive(Debug, Default)]
pub struct LayerVisit {
    layer: Option<u32>,
    pos: usize,
    visited: HashSet<NodeKey>,
}

impl LayerVisit {
    /// Nodes handed out so far.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}

//=== LayerCollection =====================================================

#[derive(Debug, Default)]
pub struct LayerCollection {
    buckets: BTreeMap<u32, Bucket>,
    index: HashMap<NodeKey, (u32, usize)>,
}

impl LayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Membership -------------------------------------------------------

    /// Registers `key` at the end of `layer`. A node already in another
    /// layer is moved; one already in `layer` is left where it is.
    pub fn add(&mut self, key: NodeKey, layer: u32) -> bool {
        if let Some(&(current, _)) = self.index.get(&key) {
            if current == layer {
                return false;
            }
            self.remove(key);
        }

        let bucket = self.buckets.entry(layer).or_default();
        bucket.slots.push(Some(key));
        bucket.live += 1;
        self.index.insert(key, (layer, bucket.slots.len() - 1));
        true
    }

    /// Unregisters `key`. Removing an absent node is a no-op.
    pub fn remove(&mut self, key: NodeKey) -> bool {
        let Some((layer, pos)) = self.index.remove(&key) else {
            return false;
        };
        if let Some(bucket) = self.buckets.get_mut(&layer) {
            if let Some(slot) = bucket.slots.get_mut(pos) {
                *slot = None;
                bucket.live -= 1;
            }
        }
        true
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.index.contains_key(&key)
    }

    pub fn layer_of(&self, key: NodeKey) -> Option<u32> {
        self.index.get(&key).map(|&(layer, _)| layer)
    }

    /// Total live nodes across layers.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live nodes in `layer`; an unknown layer is simply empty.
    pub fn layer_len(&self, layer: u32) -> usize {
        self.buckets.get(&layer).map_or(0, |b| b.live)
    }

    /// Live nodes of `layer` in insertion order.
    pub fn layer(&self, layer: u32) -> Vec<NodeKey> {
        self.buckets
            .get(&layer)
            .map(|b| b.slots.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Every live node in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.buckets.values().flat_map(|b| b.slots.iter().flatten().copied())
    }

    /// Drops everything, returning the live nodes in visiting order.
    pub fn clear(&mut self) -> Vec<NodeKey> {
        let drained = self.iter().collect();
        self.buckets.clear();
        self.index.clear();
        drained
    }

    /// Squeezes out tombstones and empty layers.
    pub fn compact(&mut self) {
        self.buckets.retain(|_, bucket| bucket.live > 0);
        for (&layer, bucket) in self.buckets.iter_mut() {
            bucket.slots.retain(Option::is_some);
            for (pos, key) in bucket.slots.iter().flatten().enumerate() {
                self.index.insert(*key, (layer, pos));
            }
        }
    }

    //--- Visiting ---------------------------------------------------------

    /// Starts a pass over every live node.
    pub fn begin_visit(&mut self) -> LayerVisit {
        self.compact();
        LayerVisit::default()
    }

    /// Next node of the pass, or `None` once every layer is exhausted.
    pub fn next_visit(&self, visit: &mut LayerVisit) -> Option<NodeKey> {
        let mut layer = match visit.layer {
            Some(layer) => layer,
            None => {
                let first = *self.buckets.keys().next()?;
                visit.layer = Some(first);
                visit.pos = 0;
                first
            }
        };

        loop {
            if let Some(bucket) = self.buckets.get(&layer) {
                while let Some(slot) = bucket.slots.get(visit.pos) {
                    visit.pos += 1;
                    if let Some(key) = *slot {
                        if self.index.contains_key(&key) && visit.visited.insert(key) {
                            return Some(key);
                        }
                    }
                }
            }

            let (&next, _) = self
                .buckets
                .range((Bound::Excluded(layer), Bound::Unbounded))
                .next()?;
            layer = next;
            visit.layer = Some(next);
            visit.pos = 0;
        }
    }

    /// Runs `f` on every live node in order. `f` may add or remove nodes
    /// in any layer.
    pub fn visit_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self, NodeKey),
    {
        let mut visit = self.begin_visit();
        while let Some(key) = self.next_visit(&mut visit) {
            f(self, key);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<NodeKey> {
        let mut map: SlotMap<NodeKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn collect(layers: &mut LayerCollection) -> Vec<NodeKey> {
        let mut seen = Vec::new();
        layers.visit_all(|_, key| seen.push(key));
        seen
    }

    //=====================================================================
    // Ordering
    //=====================================================================

    #[test]
    fn visits_by_layer_then_insertion() {
        let k = keys(4);
        let mut layers = LayerCollection::new();
        for (key, layer) in k.iter().zip([2, 0, 1, 0]) {
            layers.add(*key, layer);
        }

        assert_eq!(collect(&mut layers), vec![k[1], k[3], k[2], k[0]]);
    }

    #[test]
    fn invalid_layer_is_empty() {
        let layers = LayerCollection::new();
        assert_eq!(layers.layer_len(7), 0);
        assert!(layers.layer(7).is_empty());
    }

    //=====================================================================
    // Membership
    //=====================================================================

    #[test]
    fn remove_is_idempotent() {
        let k = keys(2);
        let mut layers = LayerCollection::new();
        layers.add(k[0], 0);
        layers.add(k[1], 0);

        assert!(layers.remove(k[0]));
        assert!(!layers.remove(k[0]), "second removal is a no-op");
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.layer_len(0), 1);
    }

    #[test]
    fn add_moves_between_layers() {
        let k = keys(1);
        let mut layers = LayerCollection::new();
        layers.add(k[0], 0);
        assert!(!layers.add(k[0], 0), "re-adding to the same layer is a no-op");
        assert!(layers.add(k[0], 3));

        assert_eq!(layers.layer_of(k[0]), Some(3));
        assert_eq!(layers.layer_len(0), 0);
        assert_eq!(layers.len(), 1, "a node lives in exactly one layer");
    }

    #[test]
    fn compact_preserves_order() {
        let k = keys(4);
        let mut layers = LayerCollection::new();
        for key in &k {
            layers.add(*key, 1);
        }
        layers.remove(k[1]);
        layers.compact();
        layers.add(k[1], 1);

        assert_eq!(layers.layer(1), vec![k[0], k[2], k[3], k[1]]);
        assert!(layers.remove(k[3]), "index must point at the compacted slot");
        assert_eq!(layers.layer(1), vec![k[0], k[2], k[1]]);
    }

    //=====================================================================
    // Mutation During Visit
    //=====================================================================

    #[test]
    fn removal_ahead_is_skipped() {
        let k = keys(3);
        let mut layers = LayerCollection::new();
        for key in &k {
            layers.add(*key, 0);
        }

        let mut seen = Vec::new();
        layers.visit_all(|layers, key| {
            seen.push(key);
            if key == k[0] {
                layers.remove(k[1]);
            }
        });

        assert_eq!(seen, vec![k[0], k[2]]);
    }

    #[test]
    fn removing_current_does_not_skip_next() {
        let k = keys(3);
        let mut layers = LayerCollection::new();
        for key in &k {
            layers.add(*key, 0);
        }

        let mut seen = Vec::new();
        layers.visit_all(|layers, key| {
            seen.push(key);
            layers.remove(key);
        });

        assert_eq!(seen, k);
        assert!(layers.is_empty());
    }

    #[test]
    fn additions_to_current_and_later_layers_are_visited() {
        let k = keys(4);
        let mut layers = LayerCollection::new();
        layers.add(k[0], 1);

        let mut seen = Vec::new();
        layers.visit_all(|layers, key| {
            seen.push(key);
            if key == k[0] {
                layers.add(k[1], 1);
                layers.add(k[2], 5);
                layers.add(k[3], 0);
            }
        });

        assert_eq!(seen, vec![k[0], k[1], k[2]], "earlier-layer additions wait for the next pass");
        assert_eq!(collect(&mut layers), vec![k[3], k[0], k[1], k[2]]);
    }

    #[test]
    fn readded_node_is_not_visited_twice() {
        let k = keys(2);
        let mut layers = LayerCollection::new();
        layers.add(k[0], 0);
        layers.add(k[1], 0);

        let mut count = 0;
        layers.visit_all(|layers, key| {
            count += 1;
            if key == k[0] {
                layers.remove(k[0]);
                layers.add(k[0], 2);
            }
        });

        assert_eq!(count, 2);
    }
}
