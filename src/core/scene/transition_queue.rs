//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene transitions requested during a frame.
//
// Nodes and input handlers push here while the layer collection is being
// visited; the game applies the queue once the visit has finished, so a
// scene is never torn down under an in-progress pass.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneTransition;

//=== Transition Queue ====================================================

#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneTransition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition for the next frame boundary.
    pub fn push(&mut self, transition: SceneTransition) {
        self.queue.push(transition);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all transitions in FIFO order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneTransition> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
