use crate::foundation::core::Point;
use crate::sequence::family::Family;
use crate::timeline::clock::{FINAL_INDEX, ShowClock};
use crate::timeline::readout::{ClockReadout, display_ms};
use crate::timeline::tempo::{ShowMode, TempoConfig};

/// Participant role, fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Picks the tempo mode and can stop a run.
    Leader,
    /// Follows the leader's tempo; starts with the mode already confirmed.
    Consort,
}

impl Role {
    /// Resolves the role from the path the session was launched with (`/leader`, `leader.html`, ...).
    pub fn from_launch_path(path: &str) -> Self {
        if path.to_ascii_lowercase().contains("leader") {
            Self::Leader
        } else {
            Self::Consort
        }
    }
}

/// Mutable session record. Mutated only by the view state machine and the session's input
/// handling; everything else reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowStatus {
    pub(crate) role: Role,
    pub(crate) running: bool,
    pub(crate) clock: ShowClock,
    pub(crate) is_end_screen: bool,
    pub(crate) mode_chosen: ShowMode,
    pub(crate) mode_confirmed: bool,
    pub(crate) ms_per_beat: f64,
    pub(crate) background_family: Option<Family>,
    pub(crate) last_tap: Option<Point>,
}

impl ShowStatus {
    /// Idle record holding the pre-show index at the default (concert) tempo.
    pub fn new(role: Role, tempo: &TempoConfig) -> Self {
        let mode_chosen = ShowMode::default();
        let mut clock = ShowClock::default();
        clock.hold_at(tempo.preshow_index);
        Self {
            role,
            running: false,
            clock,
            is_end_screen: false,
            mode_chosen,
            mode_confirmed: role == Role::Consort,
            ms_per_beat: tempo.ms_per_beat(mode_chosen),
            background_family: None,
            last_tap: None,
        }
    }

    /// Participant role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// A run is in progress.
    pub fn running(&self) -> bool {
        self.running
    }

    /// The end screen is up.
    pub fn is_end_screen(&self) -> bool {
        self.is_end_screen
    }

    /// Current sequence index, always within `0..=30`.
    pub fn index(&self) -> usize {
        self.clock.index().min(FINAL_INDEX)
    }

    /// Scheduler state of the current run.
    pub fn clock(&self) -> &ShowClock {
        &self.clock
    }

    /// Tempo mode picked in mode select.
    pub fn mode_chosen(&self) -> ShowMode {
        self.mode_chosen
    }

    /// The mode has been confirmed (always `true` for consorts).
    pub fn mode_confirmed(&self) -> bool {
        self.mode_confirmed
    }

    /// Tempo locked at mode select; local starts run at this tempo.
    pub fn ms_per_beat(&self) -> f64 {
        self.ms_per_beat
    }

    /// Current background theme; `None` is neutral.
    pub fn background_family(&self) -> Option<Family> {
        self.background_family
    }

    /// Last pointer-up position, for the debug overlay.
    pub fn last_tap(&self) -> Option<Point> {
        self.last_tap
    }

    /// Checks the record's cross-field invariants.
    pub fn is_consistent(&self) -> bool {
        let timing_ok = !self.running
            || self
                .clock
                .state_duration_ms()
                .is_some_and(|d| d > 0.0 && self.clock.start_ms().is_some());
        let end_ok = !(self.is_end_screen && self.running);
        let consort_ok = self.role == Role::Leader || self.mode_confirmed;
        timing_ok && end_ok && consort_ok && self.clock.index() <= FINAL_INDEX
    }

    /// Read-only copy at `now_ms`, with the clock readout formatted.
    pub fn snapshot(&self, now_ms: f64, tempo: &TempoConfig) -> StatusSnapshot {
        let elapsed = if self.running || self.is_end_screen {
            self.clock.elapsed_ms(now_ms)
        } else {
            0.0
        };
        let display = if self.is_end_screen {
            tempo.concert_run_ms()
        } else {
            let ms_per_beat = self
                .clock
                .state_duration_ms()
                .map(|d| d / f64::from(tempo.beats_per_state))
                .unwrap_or(self.ms_per_beat);
            display_ms(self.mode_chosen, elapsed, ms_per_beat, tempo)
        };
        StatusSnapshot {
            role: self.role,
            running: self.running,
            index: self.index(),
            state_number: self.index() + 1,
            is_end_screen: self.is_end_screen,
            mode: self.mode_chosen,
            mode_confirmed: self.mode_confirmed,
            ms_per_beat: self.ms_per_beat,
            background_family: self.background_family,
            clock: ClockReadout::from_ms(display).to_string(),
        }
    }
}

/// Read-only copy of [`ShowStatus`] handed to text providers and printed by the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StatusSnapshot {
    /// Participant role.
    pub role: Role,
    /// A run is in progress.
    pub running: bool,
    /// 0-based sequence index.
    pub index: usize,
    /// 1-based state number as shown on screen.
    pub state_number: usize,
    /// The end screen is up.
    pub is_end_screen: bool,
    /// Chosen tempo mode.
    pub mode: ShowMode,
    /// The mode has been confirmed.
    pub mode_confirmed: bool,
    /// Locked tempo.
    pub ms_per_beat: f64,
    /// Current theme.
    pub background_family: Option<Family>,
    /// Clock readout, `m:ss`.
    pub clock: String,
}

#[cfg(test)]
#[path = "../../tests/unit/view/status.rs"]
mod tests;
