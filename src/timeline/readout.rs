use std::fmt;

use crate::timeline::tempo::{ShowMode, TempoConfig};

/// Minutes and seconds shown by the on-screen clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClockReadout {
    /// Whole minutes.
    pub mins: u64,
    /// Seconds past the minute.
    pub secs: u8,
}

impl ClockReadout {
    /// Truncates to whole seconds; negative input reads `0:00`.
    pub fn from_ms(total_ms: f64) -> Self {
        let total_secs = (total_ms.max(0.0) / 1000.0).floor() as u64;
        Self {
            mins: total_secs / 60,
            secs: (total_secs % 60) as u8,
        }
    }
}

impl fmt::Display for ClockReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.mins, self.secs)
    }
}

/// Milliseconds the clock should show after `elapsed_ms` of running.
///
/// Concert runs show real elapsed time. Preview runs are scaled so the clock still sweeps the
/// full concert length, whatever the preview tempo.
pub fn display_ms(mode: ShowMode, elapsed_ms: f64, ms_per_beat: f64, tempo: &TempoConfig) -> f64 {
    match mode {
        ShowMode::Concert => elapsed_ms.max(0.0),
        ShowMode::Preview => {
            let run_ms = tempo.run_ms(ms_per_beat);
            if run_ms <= 0.0 {
                return 0.0;
            }
            let frac = (elapsed_ms / run_ms).clamp(0.0, 1.0);
            frac * tempo.concert_run_ms()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/readout.rs"]
mod tests;
