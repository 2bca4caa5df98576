use crate::foundation::error::{HengeError, HengeResult};
use crate::show::session::ShowSession;
use crate::view::status::Role;

/// Messages exchanged with an external clock source. Transport is the host's concern.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClockMessage {
    /// Sent by a client when it connects.
    Register {
        /// Role the client plays.
        role: Role,
    },
    /// Start a run.
    Start {
        /// Remote start time on the session's clock; the receive time when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at_ms: Option<f64>,
        /// Tempo for this run only; the locked local tempo when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bpm: Option<f64>,
    },
    /// Keep-alive; the session ticks itself.
    Tick,
    /// Stop the current run.
    Stop,
}

impl ClockMessage {
    /// Decodes one wire message.
    pub fn from_json(s: &str) -> HengeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| HengeError::serde(format!("parse clock message: {e}")))
    }

    /// Encodes for the wire; absent fields are omitted.
    pub fn to_json(&self) -> HengeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HengeError::serde(format!("encode clock message: {e}")))
    }

    /// Applies the message to `session`, received at `now_ms`. Returns whether it changed state.
    pub fn apply(&self, session: &mut ShowSession, now_ms: f64) -> HengeResult<bool> {
        match self {
            Self::Start { at_ms, bpm } => {
                let started = session.remote_start(at_ms.unwrap_or(now_ms), *bpm)?;
                if !started {
                    tracing::warn!(view = session.view().label(), "remote start ignored");
                }
                Ok(started)
            }
            Self::Stop => Ok(session.remote_stop()),
            Self::Tick => {
                tracing::debug!(now_ms, "remote tick");
                Ok(false)
            }
            Self::Register { role } => {
                tracing::warn!(?role, "register message is client-to-server only; ignored");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/sync.rs"]
mod tests;
