//! Workspace metadata topic handler.

use std::sync::{Arc, RwLock};

use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;

use syncline_core::error::{Result, SyncError};

use crate::dispatch::{TopicHandler, UpdateCtx};

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceInfo {
    pub name: String,
    #[serde(default)]
    pub frozen: bool,
    #[serde(default)]
    pub deep_frozen: bool,
}

#[derive(Debug, Deserialize)]
struct WorkspaceUpdate {
    last_evt: u64,
    data: WorkspaceInfo,
}

/// Clone-able read handle on the latest workspace metadata.
#[derive(Clone, Default)]
pub struct WorkspaceView {
    inner: Arc<RwLock<Option<WorkspaceInfo>>>,
}

impl WorkspaceView {
    pub fn get(&self) -> Option<WorkspaceInfo> {
        self.inner.read().ok().and_then(|g| (*g).clone())
    }

    /// Frozen or deep-frozen workspaces accept no mutating actions.
    pub fn is_frozen(&self) -> bool {
        self.get().map(|w| w.frozen || w.deep_frozen).unwrap_or(false)
    }

    fn set(&self, info: WorkspaceInfo) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(info);
        }
    }
}

#[derive(Default)]
pub struct WorkspaceService {
    view: WorkspaceView,
}

impl WorkspaceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WorkspaceView {
        self.view.clone()
    }
}

impl TopicHandler for WorkspaceService {
    fn name(&self) -> &'static str {
        "workspace"
    }

    fn on_update(&mut self, payload: &RawValue, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        let update: WorkspaceUpdate = serde_json::from_str(payload.get())
            .map_err(|e| SyncError::BadEnvelope(format!("workspace payload: {e}")))?;

        tracing::debug!(name = %update.data.name, last_evt = update.last_evt, "workspace updated");
        self.view.set(update.data);
        ctx.subs.add_current_param("last_evt_ws_id", json!(update.last_evt));
        Ok(())
    }
}
