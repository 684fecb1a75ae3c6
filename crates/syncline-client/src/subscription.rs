//! Three-tier subscription state.
//!
//! The default tier is fixed at session start. The current tier persists
//! across cycles until explicitly cleared. The one-time tier is valid for
//! exactly one request/response cycle and is consumed after every
//! successfully processed response, never on failure or staleness.

use std::collections::BTreeMap;

use serde_json::Value;

/// Request parameters for one tier, insertion by key, last writer wins.
pub type Params = BTreeMap<String, Value>;

#[derive(Debug, Default)]
pub struct SubscriptionState {
    default_flags: u32,
    default_params: Params,
    current_flags: u32,
    current_params: Params,
    one_time_flags: u32,
    one_time_params: Params,
}

impl SubscriptionState {
    /// Start a session. The default tier never changes afterwards.
    pub fn new(default_flags: u32, default_params: Params) -> Self {
        Self {
            default_flags,
            default_params,
            ..Self::default()
        }
    }

    pub fn set_current_flags(&mut self, flags: u32) {
        self.current_flags = flags;
    }

    pub fn add_current_flags(&mut self, flags: u32) {
        self.current_flags |= flags;
    }

    pub fn clear_current_flags(&mut self, flags: u32) {
        self.current_flags &= !flags;
    }

    pub fn set_one_time_flags(&mut self, flags: u32) {
        self.one_time_flags = flags;
    }

    pub fn add_one_time_flags(&mut self, flags: u32) {
        self.one_time_flags |= flags;
    }

    pub fn add_current_params(&mut self, params: Params) {
        self.current_params.extend(params);
    }

    pub fn add_current_param(&mut self, key: impl Into<String>, value: Value) {
        self.current_params.insert(key.into(), value);
    }

    pub fn add_one_time_params(&mut self, params: Params) {
        self.one_time_params.extend(params);
    }

    pub fn add_one_time_param(&mut self, key: impl Into<String>, value: Value) {
        self.one_time_params.insert(key.into(), value);
    }

    pub fn remove_current_params<S: AsRef<str>>(&mut self, keys: &[S]) {
        for key in keys {
            self.current_params.remove(key.as_ref());
        }
    }

    /// Union of the three flag tiers.
    pub fn effective_flags(&self) -> u32 {
        self.default_flags | self.current_flags | self.one_time_flags
    }

    /// Default overlaid by current overlaid by one-time; later tiers win on
    /// key collision.
    pub fn effective_params(&self) -> Params {
        let mut params = self.default_params.clone();
        params.extend(self.current_params.clone());
        params.extend(self.one_time_params.clone());
        params
    }

    /// Consume the one-time tier. Called exactly once per successfully
    /// processed response.
    pub fn reset_one_time(&mut self) {
        self.one_time_flags = 0;
        self.one_time_params.clear();
    }

    /// Clear the current tier (session re-initialization).
    pub fn reset_current(&mut self) {
        self.current_flags = 0;
        self.current_params.clear();
    }

    pub fn current_flags(&self) -> u32 {
        self.current_flags
    }

    pub fn one_time_flags(&self) -> u32 {
        self.one_time_flags
    }

    pub fn current_params(&self) -> &Params {
        &self.current_params
    }

    pub fn one_time_params(&self) -> &Params {
        &self.one_time_params
    }
}
