//! Protocol modules (topic flags + long-poll envelopes).
//!
//! The update protocol is a single JSON lane: the client posts a
//! `RequestEnvelope` naming the topics it wants, the server answers with a
//! `ResponseEnvelope` carrying one payload per topic that has news.
//!
//! All parsers are panic-free: malformed input is reported as `SyncError`
//! instead of panicking, keeping embedding sessions resilient to hostile or
//! truncated traffic.

pub mod envelope;
pub mod flags;
