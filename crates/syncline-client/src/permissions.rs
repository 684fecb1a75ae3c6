//! Shared permission snapshot slot.
//!
//! The permissions topic handler replaces the snapshot wholesale; everything
//! else (other handlers, UI feature gates) reads it through clone-able
//! handles. Reads see either the previous snapshot or the new one, never a
//! partial update.

use std::sync::{Arc, RwLock};

use syncline_core::perms::{PermissionSet, RoleTable};

#[derive(Clone)]
pub struct SharedPermissions {
    roles: Arc<RoleTable>,
    slot: Arc<RwLock<Option<PermissionSet>>>,
}

impl SharedPermissions {
    pub fn new(roles: RoleTable) -> Self {
        Self {
            roles: Arc::new(roles),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub fn roles(&self) -> Arc<RoleTable> {
        Arc::clone(&self.roles)
    }

    /// Replace the snapshot. Reserved for the permissions topic handler.
    pub fn replace(&self, set: PermissionSet) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = Some(set);
        }
    }

    /// Clone of the current snapshot, if any update has arrived yet.
    pub fn snapshot(&self) -> Option<PermissionSet> {
        self.slot.read().ok().and_then(|g| (*g).clone())
    }

    /// Convenience permission gate for UI consumers. Unset snapshot or an
    /// evaluation error both read as "not allowed".
    pub fn allows(&self, perm_name: &str) -> bool {
        match self.snapshot() {
            Some(set) => match set.has_perm(perm_name) {
                Ok(allowed) => allowed,
                Err(e) => {
                    tracing::warn!(perm_name, error = %e, "permission check failed");
                    false
                }
            },
            None => false,
        }
    }

    /// First-level role membership against the current snapshot.
    pub fn is_in_role(&self, role_name: &str) -> bool {
        self.snapshot()
            .map(|set| set.has_role(role_name))
            .unwrap_or(false)
    }
}
