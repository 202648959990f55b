//=========================================================================
// Game
//=========================================================================
//
// The single owned engine context every node behavior is threaded
// through.
//
// Responsibilities:
// - Own the scene graph, the layer collection and the listener registry
// - Run the object lifecycle (`add_object` / `remove_object`)
// - Drive frames: input, update, render, timed sequences, transitions
// - Run the scene state machine and build each scene
//
// Architecture:
// ```text
//   platform ──PlatformEvent──> EventCollector ──> dispatch ──> behaviors
//                                                      │
//   on_frame(time) ─> FrameClock ─> draw: LayerVisit ──┴─> update + render
//                                      │
//                                      └─> TransitionQueue ─> start_scene
// ```
//
// Node behaviors receive `&mut Game`. While a node runs, its `NodeKind`
// is taken out of the arena and restored afterwards, so a behavior can
// freely add, remove or reach other nodes.
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatch;
mod frame;
mod lifecycle;
mod scenes;

//=== Public API ==========================================================

pub use dispatch::{canvas_size_tier, CanvasRect};
pub use frame::FrameClock;

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::content::{Level, NodeKind, SceneContent};
use crate::core::graph::{IdAllocator, LayerCollection, NodeKey, NodeProps, SceneGraph, SceneNode};
use crate::core::input::{Debouncer, ListenerRegistry};
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::render::Canvas;
use crate::core::scene::{DeathSequence, GameState, SceneTransition, TransitionQueue};

//=== Hud =================================================================

/// Nodes mirroring state fields, refreshed by `update_state`.
#[derive(Debug, Clone, Copy, Default)]
struct Hud {
    score: Option<NodeKey>,
    lives: Option<NodeKey>,
}

//=== Game ================================================================

pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) canvas: Box<dyn Canvas>,
    pub(crate) graph: SceneGraph,
    pub(crate) layers: LayerCollection,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) transitions: TransitionQueue,
    ids: IdAllocator,
    state: GameState,
    content: SceneContent,
    clock: FrameClock,
    events: EventCollector,

    /// One-shot action for the next completed left click.
    click_action: Option<SceneTransition>,
    pointer_down: bool,

    window_size: (u32, u32),
    canvas_rect: CanvasRect,
    resize: Debouncer<(u32, u32)>,

    hud: Hud,
    level: Option<NodeKey>,
    player: Option<NodeKey>,
    death: Option<DeathSequence>,
}

impl Game {
    //--- Construction -----------------------------------------------------

    pub fn new(
        config: GameConfig,
        canvas: Box<dyn Canvas>,
        content: SceneContent,
        receiver: Receiver<PlatformEvent>,
    ) -> Self {
        let window_size = (config.window.width, config.window.height);
        Self {
            ids: IdAllocator::new(config.gameplay.max_node_id),
            state: GameState::new(config.gameplay.starting_lives),
            resize: Debouncer::new(config.timing.resize_debounce_ms),
            canvas_rect: CanvasRect::centered(window_size, canvas.size()),
            config,
            canvas,
            graph: SceneGraph::new(),
            layers: LayerCollection::new(),
            listeners: ListenerRegistry::new(),
            transitions: TransitionQueue::new(),
            content,
            clock: FrameClock::new(),
            events: EventCollector::new(receiver),
            click_action: None,
            pointer_down: false,
            window_size,
            hud: Hud::default(),
            level: None,
            player: None,
            death: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn canvas(&self) -> &dyn Canvas {
        self.canvas.as_ref()
    }

    /// On-screen bounds of the canvas inside the window.
    pub fn canvas_rect(&self) -> CanvasRect {
        self.canvas_rect
    }

    pub fn level_key(&self) -> Option<NodeKey> {
        self.level
    }

    pub fn player_key(&self) -> Option<NodeKey> {
        self.player
    }

    //--- Node Helpers -----------------------------------------------------

    /// Fresh props carrying the next recycled id.
    pub fn default_props(&mut self) -> NodeProps {
        NodeProps::new().with_id(self.ids.next_id())
    }

    /// Inserts a detached node. It takes part in frames only once added.
    pub fn spawn(&mut self, props: NodeProps, kind: NodeKind) -> NodeKey {
        self.graph.insert(SceneNode::new(props, kind))
    }

    /// Runs `f` with `key`'s kind lent out of the arena. `None` when the
    /// node is gone or its kind is already lent.
    pub(crate) fn with_kind<R>(&mut self, key: NodeKey, f: impl FnOnce(&mut Game, &mut NodeKind) -> R) -> Option<R> {
        let mut kind = self.graph.get_mut(key)?.kind.take()?;
        let result = f(self, &mut kind);
        if let Some(node) = self.graph.get_mut(key) {
            node.kind = Some(kind);
        }
        Some(result)
    }

    /// Runs `f` on the current level, if one is live and not already
    /// running.
    pub(crate) fn with_level<R>(&mut self, f: impl FnOnce(&mut Game, &mut Level, NodeKey) -> R) -> Option<R> {
        let key = self.level?;
        self.with_kind(key, |game, kind| match kind {
            NodeKind::Level(level) => Some(f(game, level, key)),
            _ => None,
        })
        .flatten()
    }
}

//=========================================================================
// Test Support
//=========================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::render::{DrawLog, RecordingCanvas};
    use crossbeam_channel::{unbounded, Sender};

    /// Game on a 400×400 recording canvas with default config and content.
    pub(crate) fn game() -> (Game, Sender<PlatformEvent>, DrawLog) {
        let canvas = RecordingCanvas::new(400, 400);
        let log = canvas.log();
        let (sender, receiver) = unbounded();
        let game = Game::new(GameConfig::default(), Box::new(canvas), SceneContent::default(), receiver);
        (game, sender, log)
    }

    /// Content whose title screen is empty, for tests that build their own
    /// nodes.
    pub(crate) fn blank_content() -> SceneContent {
        SceneContent {
            title: |_| {},
            ..SceneContent::default()
        }
    }
}
