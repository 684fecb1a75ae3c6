//! Rule grammar and compilation.
//!
//! The wire and config form of a rule is a tagged string:
//! - `"a:<prefix>"` allows every permission name starting with `<prefix>`
//! - `"d:<prefix>"` denies the same way
//! - `"r:<role>"` pulls in a named rule list from the role table
//!
//! Prefix matching is plain character-prefix, not path-segment aware:
//! `a:chat.li` matches `chat.list`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SyncError};

/// One entry in a permission rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Allow(String),
    Deny(String),
    RoleRef(String),
}

impl FromStr for Rule {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, value) = s.split_once(':').ok_or_else(|| {
            SyncError::MalformedRule(format!("missing tag separator in rule: {s:?}"))
        })?;
        if value.is_empty() {
            return Err(SyncError::MalformedRule(format!("empty rule value: {s:?}")));
        }
        match tag {
            "a" => Ok(Rule::Allow(value.to_string())),
            "d" => Ok(Rule::Deny(value.to_string())),
            "r" => Ok(Rule::RoleRef(value.to_string())),
            _ => Err(SyncError::MalformedRule(format!("bad rule tag: {s:?}"))),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Allow(p) => write!(f, "a:{p}"),
            Rule::Deny(p) => write!(f, "d:{p}"),
            Rule::RoleRef(r) => write!(f, "r:{r}"),
        }
    }
}

/// Compile a raw rule list. All-or-nothing: one malformed entry rejects the
/// whole list so a rule set is never partially applied.
pub fn compile_rules<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Rule>> {
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        out.push(s.as_ref().parse()?);
    }
    Ok(out)
}
