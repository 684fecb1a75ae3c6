//! Topic handler registry and dispatch context.
//!
//! Handlers are registered once, before the loop starts, and invoked in
//! registration order for every response that carries their topic. The order
//! is part of the contract: the permissions handler is conventionally first
//! so later handlers in the same cycle see the fresh snapshot. There is no
//! unregistration.

use serde_json::value::RawValue;

use syncline_core::Result;

use crate::permissions::SharedPermissions;
use crate::subscription::SubscriptionState;

/// Mutable view handed to a handler for one topic payload.
///
/// Handlers may add flags/params for the next cycle through `subs`; the loop
/// guarantees dispatch never overlaps the next request build.
pub struct UpdateCtx<'a> {
    pub subs: &'a mut SubscriptionState,
    pub perms: &'a SharedPermissions,
}

/// One registered topic callback.
pub trait TopicHandler: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply one decoded payload. The payload is the raw JSON for this
    /// topic; parse lazily, own the result.
    fn on_update(&mut self, payload: &RawValue, ctx: &mut UpdateCtx<'_>) -> Result<()>;
}

pub(crate) struct Registration {
    pub flag: u32,
    pub handler: Box<dyn TopicHandler>,
}

/// Ordered handler registry keyed by topic flag.
///
/// A `Vec`, not a map: registration order is load-bearing and two handlers
/// for the same flag are permitted (both run, in order).
#[derive(Default)]
pub struct HandlerRegistry {
    entries: Vec<Registration>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, flag: u32, handler: Box<dyn TopicHandler>) {
        self.entries.push(Registration { flag, handler });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Registration] {
        &mut self.entries
    }
}
