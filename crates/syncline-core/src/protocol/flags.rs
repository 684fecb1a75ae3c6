//! Topic subscription flags.
//!
//! Each server-side topic is addressed by one bit in a `u32`. Request
//! envelopes carry the OR of every wanted topic; response payloads are keyed
//! by the decimal value of the matching bit. Bit 5 is unassigned.

/// Ask the server to rebuild its view instead of sending a delta. The client
/// never branches on this bit; it is interpreted server-side only.
pub const FORCE_SYNC: u32 = 1 << 0;
/// Workspace member roster.
pub const WANT_MEMBERS: u32 = 1 << 1;
/// File share listing.
pub const WANT_FILES: u32 = 1 << 2;
/// Chat channel messages.
pub const WANT_CHAT: u32 = 1 << 3;
/// Screen sharing sessions.
pub const WANT_SCREEN: u32 = 1 << 4;
/// Permission rule set for the requesting user.
pub const WANT_PERMS: u32 = 1 << 6;
/// Workspace metadata (name, freeze state).
pub const WANT_WORKSPACE: u32 = 1 << 7;
/// File upload progress reports.
pub const WANT_UPLOADS: u32 = 1 << 8;
/// Public-workspace info block.
pub const WANT_PUBLIC: u32 = 1 << 9;

/// Response key for a topic flag (`state` object keys are the decimal flag
/// value).
pub fn topic_key(flag: u32) -> String {
    flag.to_string()
}
