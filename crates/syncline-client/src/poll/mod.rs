//! Update loop runtime.
//!
//! One self-rescheduling request/response cycle per session: merge the
//! subscription tiers, issue an identified request, classify the response,
//! dispatch topic payloads in registration order, re-arm the timer.

mod update_loop;

pub use update_loop::{LoopState, StopHandle, UpdateLoop};
