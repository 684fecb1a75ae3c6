//! Permission snapshot: the user's current rule list plus its role table.
//!
//! A snapshot is replaced wholesale each time the permissions topic delivers
//! an update; consumers only ever read it.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::perms::eval::{evaluate, has_permission, has_role, Decision};
use crate::perms::roles::RoleTable;
use crate::perms::rule::{compile_rules, Rule};

/// Wire form of a permissions topic payload.
#[derive(Debug, Deserialize)]
pub struct PermissionsUpdate {
    pub object_version: u64,
    pub update_version: u64,
    pub rules: Vec<String>,
}

/// Immutable permission snapshot.
#[derive(Debug, Clone)]
pub struct PermissionSet {
    pub object_version: u64,
    pub update_version: u64,
    rules: Vec<Rule>,
    roles: Arc<RoleTable>,
}

impl PermissionSet {
    /// Empty snapshot (no rules): every check is neutral/false.
    pub fn empty(roles: Arc<RoleTable>) -> Self {
        Self {
            object_version: 0,
            update_version: 0,
            rules: Vec::new(),
            roles,
        }
    }

    /// Build a snapshot from a wire update. All-or-nothing: a single
    /// malformed rule rejects the whole update.
    pub fn from_update(update: &PermissionsUpdate, roles: Arc<RoleTable>) -> Result<Self> {
        let rules = compile_rules(&update.rules)?;
        Ok(Self {
            object_version: update.object_version,
            update_version: update.update_version,
            rules,
            roles,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn evaluate(&self, perm_name: &str) -> Result<Decision> {
        evaluate(&self.rules, &self.roles, perm_name)
    }

    pub fn has_perm(&self, perm_name: &str) -> Result<bool> {
        has_permission(&self.rules, &self.roles, perm_name)
    }

    /// First-level role membership (see `perms::has_role`).
    pub fn has_role(&self, role_name: &str) -> bool {
        has_role(&self.rules, role_name)
    }
}
