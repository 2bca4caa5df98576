use crate::foundation::error::{HengeError, HengeResult};
use crate::sequence::table::SEQUENCE_LEN;
use crate::timeline::clock::FINAL_INDEX;

/// Tempo mode chosen by the leader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowMode {
    /// Fast-forward rehearsal run.
    Preview,
    /// Real-time performance run.
    #[default]
    Concert,
}

impl ShowMode {
    /// Upper-case name shown on screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preview => "PREVIEW",
            Self::Concert => "CONCERT",
        }
    }
}

/// Per-mode tempo and state length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TempoConfig {
    /// Beats spent in each sequence state.
    pub beats_per_state: u32,
    /// Beat length in concert mode.
    pub concert_ms_per_beat: f64,
    /// Beat length in preview mode.
    pub preview_ms_per_beat: f64,
    /// Sequence index displayed while the show is armed but not running.
    pub preshow_index: usize,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            beats_per_state: 24,
            concert_ms_per_beat: 1000.0,
            preview_ms_per_beat: 42.0,
            preshow_index: 18,
        }
    }
}

impl TempoConfig {
    /// Rejects zero or non-finite tempos and an out-of-table pre-show index.
    pub fn validate(&self) -> HengeResult<()> {
        if self.beats_per_state == 0 {
            return Err(HengeError::validation("tempo.beats_per_state must be > 0"));
        }
        for (name, v) in [
            ("concert_ms_per_beat", self.concert_ms_per_beat),
            ("preview_ms_per_beat", self.preview_ms_per_beat),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(HengeError::validation(format!(
                    "tempo.{name} must be finite and > 0"
                )));
            }
        }
        if self.preshow_index >= SEQUENCE_LEN {
            return Err(HengeError::validation(format!(
                "tempo.preshow_index must be < {SEQUENCE_LEN}"
            )));
        }
        Ok(())
    }

    /// Beat length for `mode`.
    pub fn ms_per_beat(&self, mode: ShowMode) -> f64 {
        match mode {
            ShowMode::Preview => self.preview_ms_per_beat,
            ShowMode::Concert => self.concert_ms_per_beat,
        }
    }

    /// Length of one sequence state at `ms_per_beat`.
    pub fn state_duration_ms(&self, ms_per_beat: f64) -> f64 {
        f64::from(self.beats_per_state) * ms_per_beat
    }

    /// Length of a whole run at `ms_per_beat`.
    ///
    /// A run ends the moment it enters the final state, so it spans `FINAL_INDEX` state
    /// durations rather than one per table entry.
    pub fn run_ms(&self, ms_per_beat: f64) -> f64 {
        FINAL_INDEX as f64 * self.state_duration_ms(ms_per_beat)
    }

    /// Length of a whole run at concert tempo; the visible clock always counts up to this.
    pub fn concert_run_ms(&self) -> f64 {
        self.run_ms(self.concert_ms_per_beat)
    }
}
