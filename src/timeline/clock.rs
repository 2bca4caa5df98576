//! Deterministic wall-clock to sequence-index scheduler.
//!
//! The clock never counts polls. It keeps the wall time of the next state boundary and, when a
//! poll lands past it, jumps as many states as were crossed. A tick that arrives after a long gap
//! (backgrounded tab, stalled host) therefore lands on the same index as a dense sequence of
//! ticks would have.

use crate::foundation::error::{HengeError, HengeResult};
use crate::sequence::table::SEQUENCE_LEN;

/// Last sequence index; reaching it completes the run.
pub const FINAL_INDEX: usize = SEQUENCE_LEN - 1;

/// Result of one [`ShowClock::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// No boundary crossed since the last call.
    Hold {
        /// Unchanged index.
        index: usize,
    },
    /// One or more boundaries crossed.
    Stepped {
        /// Index after the crossing.
        index: usize,
        /// Boundaries crossed since the last call.
        steps: usize,
    },
    /// The final state was reached (now or earlier). Terminal until re-armed.
    Finished {
        /// Always the final index.
        index: usize,
    },
}

impl Advance {
    /// Index carried by every outcome.
    pub fn index(self) -> usize {
        match self {
            Self::Hold { index } | Self::Stepped { index, .. } | Self::Finished { index } => index,
        }
    }
}

/// Wall-clock scheduler for one run.
///
/// Armed with a start time and a fixed state duration; unarmed while idle, when it only holds
/// the displayed index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShowClock {
    start_ms: Option<f64>,
    state_duration_ms: Option<f64>,
    next_boundary_ms: Option<f64>,
    index: usize,
    finished: bool,
}

impl ShowClock {
    /// Arm the clock for a fresh run starting at `start_ms`.
    pub fn arm(&mut self, start_ms: f64, state_duration_ms: f64) -> HengeResult<()> {
        if !start_ms.is_finite() {
            return Err(HengeError::timing("start time must be finite"));
        }
        if !(state_duration_ms.is_finite() && state_duration_ms > 0.0) {
            return Err(HengeError::timing(format!(
                "state duration must be finite and > 0, got {state_duration_ms}"
            )));
        }
        *self = Self {
            start_ms: Some(start_ms),
            state_duration_ms: Some(state_duration_ms),
            next_boundary_ms: None,
            index: 0,
            finished: false,
        };
        Ok(())
    }

    /// Drop timing fields. The index is kept for display.
    pub fn clear(&mut self) {
        self.start_ms = None;
        self.state_duration_ms = None;
        self.next_boundary_ms = None;
        self.finished = false;
    }

    /// Pin the displayed index while idle.
    pub fn hold_at(&mut self, index: usize) {
        self.index = index.min(FINAL_INDEX);
    }

    /// Moves the index to wherever `now_ms` falls, crossing any number of boundaries.
    ///
    /// Fails when the clock is not armed. Once the final state is reached every later call
    /// returns [`Advance::Finished`] with the same index.
    pub fn advance(&mut self, now_ms: f64) -> HengeResult<Advance> {
        if self.finished {
            return Ok(Advance::Finished { index: self.index });
        }
        let (Some(start), Some(dur)) = (self.start_ms, self.state_duration_ms) else {
            return Err(HengeError::timing(format!(
                "advance without timing fields (start={:?}, state_duration={:?})",
                self.start_ms, self.state_duration_ms
            )));
        };

        let mut next = self.next_boundary_ms.unwrap_or(start + dur);
        let mut steps = 0usize;
        if now_ms >= next {
            steps = ((now_ms - next) / dur).floor() as usize + 1;
            self.index = self.index.saturating_add(steps);
            next += steps as f64 * dur;
        }
        self.next_boundary_ms = Some(next);

        if self.index >= FINAL_INDEX {
            self.index = FINAL_INDEX;
            self.finished = true;
            tracing::debug!(index = self.index, steps, "clock reached final state");
            return Ok(Advance::Finished { index: self.index });
        }
        if steps > 0 {
            if steps > 1 {
                tracing::debug!(steps, index = self.index, "clock caught up after a gap");
            }
            return Ok(Advance::Stepped {
                index: self.index,
                steps,
            });
        }
        Ok(Advance::Hold { index: self.index })
    }

    /// Current 0-based index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Wall time the run started, when armed.
    pub fn start_ms(&self) -> Option<f64> {
        self.start_ms
    }

    /// Length of one state, when armed.
    pub fn state_duration_ms(&self) -> Option<f64> {
        self.state_duration_ms
    }

    /// Wall time of the next state change, once the first advance has run.
    pub fn next_boundary_ms(&self) -> Option<f64> {
        self.next_boundary_ms
    }

    /// `true` when both timing fields are set.
    pub fn is_armed(&self) -> bool {
        self.start_ms.is_some() && self.state_duration_ms.is_some()
    }

    /// `true` once the final state was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Milliseconds since the run started (0 before the start or when unarmed).
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.start_ms.map(|s| (now_ms - s).max(0.0)).unwrap_or(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
