//! Permission rule engine.
//!
//! Every UI feature of the embedding application consults this module before
//! enabling itself. Rules are ordered; a deny is final the moment it takes
//! effect, while an allow stays open to being overridden by a later rule.
//!
//! Role membership checks (`has_role`) are deliberately shallow: they scan
//! the first level of the rule list for a literal role reference and never
//! expand nested roles. Permission checks (`evaluate`) expand roles fully.
//! The two are separate functions on purpose; do not unify them.

mod eval;
mod roles;
mod rule;
mod set;

pub use eval::{evaluate, has_permission, has_role, Decision, MAX_ROLE_DEPTH};
pub use roles::RoleTable;
pub use rule::{compile_rules, Rule};
pub use set::{PermissionSet, PermissionsUpdate};
