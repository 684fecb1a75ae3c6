//! Rule list evaluation.

use crate::error::{Result, SyncError};
use crate::perms::roles::RoleTable;
use crate::perms::rule::Rule;

/// Outcome of evaluating a rule list against one permission name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    /// No rule matched; the caller treats this as not allowed.
    Neutral,
}

/// Role nesting bound. A table that needs more than this is cyclic or
/// degenerate; exceeding it reports `MalformedRule` instead of looping.
pub const MAX_ROLE_DEPTH: usize = 16;

/// Evaluate `rules` against a dotted permission name.
///
/// Rules are scanned in list order. An `Allow`/`Deny` whose prefix matches
/// overwrites the running result; a deny is returned the instant it becomes
/// the result, so no later allow can reverse it. A `RoleRef` evaluates the
/// referenced list with this same algorithm (nested roles permitted, bounded
/// by `MAX_ROLE_DEPTH`).
pub fn evaluate(rules: &[Rule], roles: &RoleTable, perm_name: &str) -> Result<Decision> {
    eval_list(rules, roles, perm_name, 0)
}

/// `evaluate` reduced to a boolean: neutral counts as not allowed.
pub fn has_permission(rules: &[Rule], roles: &RoleTable, perm_name: &str) -> Result<bool> {
    Ok(evaluate(rules, roles, perm_name)? == Decision::Allow)
}

/// First-level role membership check.
///
/// True iff `rules` contains a literal `RoleRef` entry for `role_name`.
/// Nested roles are NOT expanded; a rule list that merely grants the same
/// permissions as the role still reports false. This shallow check is a
/// distinct operation from `evaluate` and must stay one.
pub fn has_role(rules: &[Rule], role_name: &str) -> bool {
    rules
        .iter()
        .any(|r| matches!(r, Rule::RoleRef(name) if name == role_name))
}

fn eval_list(rules: &[Rule], roles: &RoleTable, perm_name: &str, depth: usize) -> Result<Decision> {
    if depth > MAX_ROLE_DEPTH {
        tracing::warn!(depth, "role nesting exceeds bound; table is likely cyclic");
        return Err(SyncError::MalformedRule(format!(
            "role nesting deeper than {MAX_ROLE_DEPTH}"
        )));
    }

    let mut result = Decision::Neutral;
    for rule in rules {
        let outcome = match rule {
            Rule::RoleRef(name) => {
                let list = roles.get(name).ok_or_else(|| {
                    SyncError::MalformedRule(format!("unknown role: {name:?}"))
                })?;
                eval_list(list, roles, perm_name, depth + 1)?
            }
            Rule::Allow(prefix) => {
                if perm_name.starts_with(prefix.as_str()) {
                    Decision::Allow
                } else {
                    Decision::Neutral
                }
            }
            Rule::Deny(prefix) => {
                if perm_name.starts_with(prefix.as_str()) {
                    Decision::Deny
                } else {
                    Decision::Neutral
                }
            }
        };

        if outcome != Decision::Neutral {
            result = outcome;
        }

        // A deny is authoritative no matter what follows.
        if result == Decision::Deny {
            return Ok(Decision::Deny);
        }
    }
    Ok(result)
}
