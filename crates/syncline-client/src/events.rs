//! Session events surfaced to the collaborator layer.
//!
//! Nothing is thrown across the loop boundary: terminal conditions arrive
//! here as values on an unbounded channel.

use syncline_core::error::NoticeCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server moved to a newer protocol version; the session must
    /// reload. The loop is frozen and will not request again.
    ReloadRequired { server_version: u32 },
    /// A topic handler failed under the `halt` policy; polling stopped until
    /// something external restarts it.
    PollHalted { topic: u32, reason: String },
}

impl SessionEvent {
    /// Stable code for the embedding layer.
    pub fn code(&self) -> &'static str {
        match self {
            SessionEvent::ReloadRequired { .. } => NoticeCode::ReloadRequired.as_str(),
            SessionEvent::PollHalted { .. } => NoticeCode::HandlerFailed.as_str(),
        }
    }
}
