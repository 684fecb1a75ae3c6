//! Permissions topic handler.

use serde_json::json;
use serde_json::value::RawValue;

use syncline_core::error::{Result, SyncError};
use syncline_core::perms::{PermissionSet, PermissionsUpdate};

use crate::dispatch::{TopicHandler, UpdateCtx};

/// Replaces the shared permission snapshot wholesale on every update and
/// records the acknowledged update version for the next request.
#[derive(Default)]
pub struct PermsService;

impl PermsService {
    pub fn new() -> Self {
        Self
    }
}

impl TopicHandler for PermsService {
    fn name(&self) -> &'static str {
        "perms"
    }

    fn on_update(&mut self, payload: &RawValue, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        let update: PermissionsUpdate = serde_json::from_str(payload.get())
            .map_err(|e| SyncError::BadEnvelope(format!("permissions payload: {e}")))?;

        match PermissionSet::from_update(&update, ctx.perms.roles()) {
            Ok(set) => {
                tracing::debug!(
                    object_version = set.object_version,
                    update_version = set.update_version,
                    "permissions snapshot replaced"
                );
                ctx.perms.replace(set);
                ctx.subs
                    .add_current_param("last_perms_update_version", json!(update.update_version));
            }
            Err(e) => {
                // All-or-nothing: a rule set is never partially applied. The
                // previous snapshot stays in force and polling continues.
                tracing::warn!(error = %e, "rejecting permissions update");
            }
        }
        Ok(())
    }
}
