//! Shared error type across syncline crates.

use thiserror::Error;

/// Collaborator-facing notice codes (stable API).
///
/// The embedding layer keys dialogs and recovery actions off these strings,
/// so they must not change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCode {
    /// Transport-level request failure (network or server error).
    TransportFailed,
    /// Server advertises a newer protocol version; session must reload.
    ReloadRequired,
    /// A topic handler failed while applying an update.
    HandlerFailed,
    /// A permission rule could not be interpreted.
    BadRule,
    /// Invalid input / malformed envelope.
    BadEnvelope,
    /// Invalid configuration.
    BadConfig,
    /// Internal client error.
    Internal,
}

impl NoticeCode {
    /// String representation used by the collaborator layer.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeCode::TransportFailed => "TRANSPORT_FAILED",
            NoticeCode::ReloadRequired => "RELOAD_REQUIRED",
            NoticeCode::HandlerFailed => "HANDLER_FAILED",
            NoticeCode::BadRule => "BAD_RULE",
            NoticeCode::BadEnvelope => "BAD_ENVELOPE",
            NoticeCode::BadConfig => "BAD_CONFIG",
            NoticeCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The transport rejected a request. Recovered by backoff retry.
    #[error("transport failed: status={status}")]
    Transport {
        status: u16,
        server_exception: Option<String>,
    },
    /// The server runs a newer protocol than this client understands.
    /// Fatal to the session.
    #[error("server protocol version {server} exceeds client version {client}")]
    VersionExceeded { server: u32, client: u32 },
    /// A registered topic handler failed while applying its payload.
    #[error("handler for topic {topic:#x} failed: {detail}")]
    HandlerFailed { topic: u32, detail: String },
    /// A permission rule violated the rule grammar (bad tag, missing
    /// separator, unknown role, or role nesting past the depth guard).
    #[error("malformed rule: {0}")]
    MalformedRule(String),
    #[error("bad envelope: {0}")]
    BadEnvelope(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SyncError {
    /// Map internal error to a stable collaborator-facing code.
    pub fn notice_code(&self) -> NoticeCode {
        match self {
            SyncError::Transport { .. } => NoticeCode::TransportFailed,
            SyncError::VersionExceeded { .. } => NoticeCode::ReloadRequired,
            SyncError::HandlerFailed { .. } => NoticeCode::HandlerFailed,
            SyncError::MalformedRule(_) => NoticeCode::BadRule,
            SyncError::BadEnvelope(_) => NoticeCode::BadEnvelope,
            SyncError::BadConfig(_) => NoticeCode::BadConfig,
            SyncError::Internal(_) => NoticeCode::Internal,
        }
    }
}
