//! Long-poll envelopes (JSON).
//!
//! Topic payloads are stored as `RawValue` to enable lazy parsing by the
//! handler that owns the topic; the loop itself never inspects them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::protocol::flags::topic_key;

/// Client request. `req_id` is strictly increasing, unique per session, and
/// assigned at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Protocol version the client currently tracks.
    pub version: u32,
    /// Request identifier.
    pub req_id: u64,
    /// OR of the requested topic flags.
    pub req_flags: u32,
    /// Merged request parameters (effective view of the subscription tiers).
    pub req_params: BTreeMap<String, Value>,
}

/// Server response. `req_id` echoes the request that produced it; a value of
/// zero marks an out-of-band bootstrap envelope. `version` is the server's
/// current protocol version and may exceed the client's.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub version: u32,
    pub req_id: u64,
    /// Per-topic payloads keyed by the decimal topic-flag value. A missing
    /// key means the topic has nothing new to report.
    #[serde(default)]
    pub state: BTreeMap<String, Box<RawValue>>,
}

impl ResponseEnvelope {
    /// Payload for one topic flag, if the server included it.
    pub fn topic(&self, flag: u32) -> Option<&RawValue> {
        self.state.get(&topic_key(flag)).map(|b| b.as_ref())
    }

    /// True when no topic carries news.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}
