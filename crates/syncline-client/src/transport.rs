//! Transport seam.
//!
//! The surrounding application supplies the request primitive; the loop only
//! assumes one asynchronous request that resolves with a decoded envelope or
//! fails with a `SyncError::Transport` descriptor. HTTP mechanics, framing,
//! and authentication live on the other side of this trait.

use async_trait::async_trait;

use syncline_core::protocol::envelope::{RequestEnvelope, ResponseEnvelope};
use syncline_core::Result;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request. The loop guarantees at most one call in flight.
    async fn send(&self, req: &RequestEnvelope) -> Result<ResponseEnvelope>;
}
