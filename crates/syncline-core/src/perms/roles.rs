//! Role table: named rule lists, fixed configuration data.
//!
//! Roles are not transmitted by the protocol; only the user's individual
//! rule list arrives over the wire. The table here is compiled at startup,
//! either from the built-in defaults or from a config override.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::perms::rule::{compile_rules, Rule};

/// Mapping of role name to its ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: BTreeMap<String, Vec<Rule>>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in workspace roles.
    pub fn builtin() -> Self {
        let mut t = Self::new();
        t.insert_raw("root", &["a:users", "a:chat", "a:files", "a:screen"]);
        t.insert_raw(
            "observer",
            &[
                "a:users.list",
                "a:chat.list",
                "a:files.list",
                "a:files.download",
                "a:screen.list",
            ],
        );
        t.insert_raw(
            "member",
            &[
                "a:users.list",
                "a:chat.list.channel.0",
                "a:chat.post.channel.0",
                "a:files.list.share.0",
                "a:files.upload.share.0",
                "a:files.download.share.0",
                "a:screen.list",
                "a:screen.connect",
            ],
        );
        t.insert_raw(
            "guest",
            &["a:users.list", "a:public.request", "a:files.list.share.0"],
        );
        t.insert_raw(
            "freeze",
            &["d:chat.post", "d:files.upload", "d:public.request"],
        );
        t
    }

    /// Compile a table from raw string rules (e.g. a config override).
    /// All-or-nothing per list.
    pub fn compile(raw: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut roles = BTreeMap::new();
        for (name, rules) in raw {
            roles.insert(name.clone(), compile_rules(rules)?);
        }
        Ok(Self { roles })
    }

    pub fn insert(&mut self, name: impl Into<String>, rules: Vec<Rule>) {
        self.roles.insert(name.into(), rules);
    }

    pub fn get(&self, name: &str) -> Option<&[Rule]> {
        self.roles.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    // Builtin lists are static and known-good; a parse failure here would be
    // a programming error, so it is silently skipped rather than panicking
    // (unwrap is compile-denied in this crate).
    fn insert_raw(&mut self, name: &str, raw: &[&str]) {
        if let Ok(rules) = compile_rules(raw) {
            self.insert(name, rules);
        }
    }
}
