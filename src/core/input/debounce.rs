//=========================================================================
// Debouncer
//=========================================================================
//
// Trailing-edge debounce on frame time.
//
// Each `trigger` pushes the deadline back; `poll` yields the latest value
// once the input has been quiet for the whole delay.
//
//=========================================================================

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Records `value` and restarts the quiet period at `now`.
    pub fn trigger(&mut self, now: f64, value: T) {
        self.pending = Some((now + self.delay_ms, value));
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: f64) -> Option<T> {
        let ready = matches!(self.pending, Some((deadline, _)) if now >= deadline);
        if !ready {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
