//=========================================================================
// Event Collector
//=========================================================================
//
// Game-side end of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches → TickControl
//
// Called once at the top of every frame. Draining is bounded so a flood
// of input can never starve the frame itself; the remainder waits for
// the next frame. The collector never blocks.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events into this frame's batches.
    ///
    /// A disconnected channel only means nobody is sending input anymore
    /// (the platform dropped its sender); the game keeps running.
    pub fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Input backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    pub fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes the collected batches, leaving an empty vec behind.
    pub fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                // Discrete events go first, so a cursor move that preceded a
                // click in the same frame is dispatched after it. The level
                // reads the cursor in its own update, which runs later.
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_keeps_discrete_and_continuous_batches_apart() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key: KeyCode::Space }],
            continuous: vec![InputEvent::CursorMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();
        tx.send(PlatformEvent::single(InputEvent::MouseButtonDown { button: MouseButton::Left }))
            .unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 3);
    }

    #[test]
    fn discrete_batch_precedes_continuous_batch() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let click = InputEvent::MouseButtonDown { button: MouseButton::Left };
        let moved = InputEvent::CursorMoved { x: 1.0, y: 2.0 };

        tx.send(PlatformEvent::Inputs {
            discrete: vec![click],
            continuous: vec![moved],
        })
        .unwrap();
        collector.collect_frame();

        assert_eq!(collector.take_batches(), vec![vec![click], vec![moved]]);
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::single(InputEvent::KeyUp { key: KeyCode::Space })).unwrap();
        collector.collect_frame();
        assert_eq!(collector.take_batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn disconnect_is_not_an_exit() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
    }

    #[test]
    fn backlog_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        for _ in 0..150 {
            tx.send(PlatformEvent::single(InputEvent::KeyDown { key: KeyCode::Space })).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 100);
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 50, "remainder arrives next frame");
    }
}
