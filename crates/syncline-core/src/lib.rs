//! syncline core: transport-agnostic protocol primitives, error types, and
//! the permission evaluator.
//!
//! This crate defines the long-poll wire contracts and the error surface
//! shared by the client runtime and by embedding applications. It
//! intentionally carries no transport or runtime dependencies so it can be
//! reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SyncError`/`Result` so embedding
//! sessions do not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod perms;
pub mod protocol;

/// Shared result type.
pub use error::{Result, SyncError};
