//! View derivation and the transitions that move a session between views.
//!
//! The active view is never stored. It is derived from the role and the three status flags each
//! time it is needed; [`ViewStateMachine`] only remembers the last observed view so that entry
//! actions run once per visit.

use crate::foundation::error::HengeResult;
use crate::timeline::clock::Advance;
use crate::timeline::tempo::{ShowMode, TempoConfig};
use crate::view::status::{Role, ShowStatus};

/// What the participant currently sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Leader only, before the tempo mode is confirmed.
    ModeSelect,
    /// Waiting for a clock tap.
    Start,
    /// A run is in progress.
    Running,
    /// The run finished; shows the duration.
    End,
}

impl View {
    /// Derives the view from the status flags; the end screen wins, then a run in progress.
    pub fn derive(status: &ShowStatus) -> Self {
        if status.is_end_screen {
            Self::End
        } else if status.running {
            Self::Running
        } else if status.role == Role::Leader && !status.mode_confirmed {
            Self::ModeSelect
        } else {
            Self::Start
        }
    }

    /// Upper-case name used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::ModeSelect => "MODE_SELECT",
            Self::Start => "START",
            Self::Running => "RUNNING",
            Self::End => "END",
        }
    }
}

/// A change of view seen by [`ViewStateMachine::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransition {
    /// Previous view; `None` on the first observation.
    pub from: Option<View>,
    /// View being entered.
    pub to: View,
}

/// What a tick did to the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; the index is pinned to the pre-show value.
    Idle {
        /// Displayed index.
        index: usize,
    },
    /// Running, no state boundary crossed.
    Held {
        /// Current index.
        index: usize,
    },
    /// Running, one or more boundaries crossed.
    Advanced {
        /// Index after the crossing.
        index: usize,
        /// Boundaries crossed by this tick.
        steps: usize,
    },
    /// The run reached its final state and the end screen is up.
    Ended {
        /// Final index.
        index: usize,
    },
    /// Running without timing fields; the run was forced to the end screen.
    ContractViolation {
        /// Index when the run was forced to end.
        index: usize,
    },
}

/// Drives view transitions on a [`ShowStatus`] for one session.
#[derive(Clone, Debug)]
pub struct ViewStateMachine {
    tempo: TempoConfig,
    last_view: Option<View>,
}

impl ViewStateMachine {
    /// Machine for `tempo`; no view observed yet.
    pub fn new(tempo: TempoConfig) -> Self {
        Self {
            tempo,
            last_view: None,
        }
    }

    /// Tempo table used to lock modes and size states.
    pub fn tempo(&self) -> &TempoConfig {
        &self.tempo
    }

    /// View seen by the last [`ViewStateMachine::observe`].
    pub fn last_view(&self) -> Option<View> {
        self.last_view
    }

    /// Derives the current view and reports it if it differs from the last observed one.
    pub fn observe(&mut self, status: &ShowStatus) -> Option<ViewTransition> {
        let view = View::derive(status);
        if self.last_view == Some(view) {
            return None;
        }
        let transition = ViewTransition {
            from: self.last_view,
            to: view,
        };
        self.last_view = Some(view);
        tracing::info!(
            from = transition.from.map(View::label),
            to = view.label(),
            "view changed"
        );
        Some(transition)
    }

    /// Leader picks a tempo mode. Only meaningful in mode select.
    pub fn select_mode(&self, status: &mut ShowStatus, mode: ShowMode) -> bool {
        if View::derive(status) != View::ModeSelect {
            return false;
        }
        status.mode_chosen = mode;
        status.ms_per_beat = self.tempo.ms_per_beat(mode);
        tracing::info!(mode = mode.label(), ms_per_beat = status.ms_per_beat, "mode selected");
        true
    }

    /// Locks the chosen tempo and moves the leader to the start view.
    pub fn confirm_mode(&self, status: &mut ShowStatus) -> bool {
        if View::derive(status) != View::ModeSelect {
            return false;
        }
        status.mode_confirmed = true;
        status.ms_per_beat = self.tempo.ms_per_beat(status.mode_chosen);
        self.reset_to_preshow(status);
        tracing::info!(
            mode = status.mode_chosen.label(),
            ms_per_beat = status.ms_per_beat,
            "mode confirmed"
        );
        true
    }

    /// Starts a run at `now_ms` from the start view, at the tempo locked in `status`.
    pub fn start_run(&self, status: &mut ShowStatus, now_ms: f64) -> HengeResult<bool> {
        let ms_per_beat = status.ms_per_beat;
        self.start_run_at_tempo(status, now_ms, ms_per_beat)
    }

    /// Starts a run at `ms_per_beat` without touching the locked tempo.
    ///
    /// The override lives only in the armed clock, so the next local start falls back to the
    /// tempo chosen at confirm.
    pub fn start_run_at_tempo(
        &self,
        status: &mut ShowStatus,
        now_ms: f64,
        ms_per_beat: f64,
    ) -> HengeResult<bool> {
        if View::derive(status) != View::Start {
            return Ok(false);
        }
        let state_duration_ms = self.tempo.state_duration_ms(ms_per_beat);
        status.clock.arm(now_ms, state_duration_ms)?;
        status.running = true;
        status.is_end_screen = false;
        tracing::info!(now_ms, state_duration_ms, "run started");
        Ok(true)
    }

    /// Leader stop: abandons the run and returns to the start view.
    pub fn stop_run(&self, status: &mut ShowStatus) -> bool {
        if !status.running {
            return false;
        }
        status.running = false;
        self.reset_to_preshow(status);
        tracing::info!("run stopped");
        true
    }

    fn finish_run(&self, status: &mut ShowStatus) {
        status.running = false;
        status.is_end_screen = true;
        tracing::info!(index = status.index(), "run ended");
    }

    /// Leaves the end screen: leaders go back to mode select, consorts to the start view.
    pub fn leave_end(&self, status: &mut ShowStatus) -> bool {
        if View::derive(status) != View::End {
            return false;
        }
        status.is_end_screen = false;
        if status.role == Role::Leader {
            status.mode_confirmed = false;
        }
        self.reset_to_preshow(status);
        true
    }

    /// Advances the clock once for this tick. Called at most once per tick.
    pub fn tick(&self, status: &mut ShowStatus, now_ms: f64) -> TickOutcome {
        if !status.running {
            if !status.is_end_screen {
                status.clock.hold_at(self.tempo.preshow_index);
            }
            return TickOutcome::Idle {
                index: status.index(),
            };
        }

        match status.clock.advance(now_ms) {
            Ok(Advance::Hold { index }) => TickOutcome::Held { index },
            Ok(Advance::Stepped { index, steps }) => {
                tracing::debug!(index, steps, "state advanced");
                TickOutcome::Advanced { index, steps }
            }
            Ok(Advance::Finished { index }) => {
                self.finish_run(status);
                TickOutcome::Ended { index }
            }
            Err(err) => {
                tracing::error!(error = %err, "forcing end screen");
                self.finish_run(status);
                TickOutcome::ContractViolation {
                    index: status.index(),
                }
            }
        }
    }

    fn reset_to_preshow(&self, status: &mut ShowStatus) {
        status.clock.clear();
        status.clock.hold_at(self.tempo.preshow_index);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/machine.rs"]
mod tests;
