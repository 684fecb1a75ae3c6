//! syncline client library entry.
//!
//! This crate wires the subscription state, transport seam, handler
//! dispatch, and the update loop into a cohesive long-poll client runtime.
//! It is intended to be consumed by embedding applications and by
//! integration tests.

pub mod config;
pub mod dispatch;
pub mod events;
pub mod permissions;
pub mod poll;
pub mod services;
pub mod subscription;
pub mod transport;
