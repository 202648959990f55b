//=========================================================================
// Death Sequence
//=========================================================================
//
// Timed steps between the player being hit and the next scene.
//
// ```text
//   Exploding ──(explosion done, lives left)──> [LifeLost]
//       │
//       └──(explosion done, no lives)──> Pausing ──> [StartOutro]
//                                          Outro ──> Settling ──> [GameOver]
// ```
//
// Each step is a deadline on frame time; `tick` is polled once per frame
// and never blocks. Events in brackets are what `tick` reports.
//
//=========================================================================

//=== Timing ==============================================================

/// Durations for the no-lives-left branch, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathTiming {
    /// Quiet pause after the explosion before the level outro starts.
    pub pause_ms: f64,

    /// Length of the level's game-over animation.
    pub outro_ms: f64,

    /// Pause after the outro before switching scenes.
    pub settle_ms: f64,
}

//=== SequenceEvent =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// Explosion finished and a life remains: retry the level.
    LifeLost,

    /// Pause finished: the level should play its game-over animation.
    StartOutro,

    /// Everything finished: switch to the game-over scene.
    GameOver,
}

//=== DeathSequence =======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Exploding { until: f64 },
    Pausing { until: f64 },
    Outro { until: f64 },
    Settling { until: f64 },
    Done,
}

#[derive(Debug, Clone)]
pub struct DeathSequence {
    step: Step,
    lives: u32,
    timing: DeathTiming,
}

impl DeathSequence {
    /// Starts at `now` with an explosion lasting `explosion_ms`.
    pub fn new(now: f64, explosion_ms: f64, lives: u32, timing: DeathTiming) -> Self {
        Self {
            step: Step::Exploding {
                until: now + explosion_ms,
            },
            lives,
            timing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step == Step::Done
    }

    /// Advances past every elapsed deadline and reports what happened.
    ///
    /// At most one event per call: a frame that lands past several
    /// deadlines still sees `StartOutro` before `GameOver`.
    pub fn tick(&mut self, now: f64) -> Option<SequenceEvent> {
        match self.step {
            Step::Exploding { until } if now >= until => {
                if self.lives > 0 {
                    self.step = Step::Done;
                    Some(SequenceEvent::LifeLost)
                } else {
                    self.step = Step::Pausing {
                        until: until + self.timing.pause_ms,
                    };
                    self.tick(now)
                }
            }
            Step::Pausing { until } if now >= until => {
                self.step = Step::Outro {
                    until: until + self.timing.outro_ms,
                };
                Some(SequenceEvent::StartOutro)
            }
            Step::Outro { until } if now >= until => {
                self.step = Step::Settling {
                    until: until + self.timing.settle_ms,
                };
                self.tick(now)
            }
            Step::Settling { until } if now >= until => {
                self.step = Step::Done;
                Some(SequenceEvent::GameOver)
            }
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: DeathTiming = DeathTiming {
        pause_ms: 1000.0,
        outro_ms: 800.0,
        settle_ms: 500.0,
    };

    #[test]
    fn life_lost_waits_for_explosion() {
        let mut sequence = DeathSequence::new(100.0, 600.0, 1, TIMING);

        assert_eq!(sequence.tick(699.0), None, "explosion still playing");
        assert_eq!(sequence.tick(700.0), Some(SequenceEvent::LifeLost));
        assert!(sequence.is_finished());
        assert_eq!(sequence.tick(5000.0), None);
    }

    #[test]
    fn last_life_runs_the_full_outro() {
        let mut sequence = DeathSequence::new(0.0, 600.0, 0, TIMING);

        assert_eq!(sequence.tick(600.0), None, "explosion done, pause begins");
        assert_eq!(sequence.tick(1599.0), None);
        assert_eq!(sequence.tick(1600.0), Some(SequenceEvent::StartOutro));
        assert_eq!(sequence.tick(2400.0), None, "outro done, settling");
        assert_eq!(sequence.tick(2899.0), None);
        assert_eq!(sequence.tick(2900.0), Some(SequenceEvent::GameOver));
        assert!(sequence.is_finished());
    }

    #[test]
    fn late_frame_still_reports_outro_first() {
        let mut sequence = DeathSequence::new(0.0, 600.0, 0, TIMING);

        assert_eq!(sequence.tick(10_000.0), Some(SequenceEvent::StartOutro));
        assert_eq!(sequence.tick(10_000.0), Some(SequenceEvent::GameOver));
    }
}
