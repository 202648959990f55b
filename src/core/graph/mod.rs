//=========================================================================
// Scene Graph
//=========================================================================
//
// Hierarchical node storage and the layered visiting order.
//
// Architecture:
// ```text
//   SceneGraph (SlotMap<NodeKey, SceneNode>)
//     ├─ parent: Option<NodeKey>   lookup-only back edge
//     └─ children: Vec<NodeKey>    owned, ordered
//
//   LayerCollection
//     └─ layer ──> [NodeKey; insertion order]   paint & update order
// ```
//
// Nodes never hold references to each other, only arena keys. A key
// whose node was removed simply resolves to `None`.
//
//=========================================================================

//=== Module Declarations =================================================

mod arena;
mod ids;
mod layers;
mod node;

//=== Public API ==========================================================

pub use arena::{NodeKey, SceneGraph};
pub use ids::IdAllocator;
pub use layers::{LayerCollection, LayerVisit};
pub use node::{NodeProps, PaintMode, SceneNode};
