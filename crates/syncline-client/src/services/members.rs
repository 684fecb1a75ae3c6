//! Member roster topic handler.
//!
//! The server sends the roster as a list; the directory keeps it keyed by
//! user id so display lookups from other views (chat, uploads) are O(1).

use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;

use syncline_core::error::{Result, SyncError};

use crate::dispatch::{TopicHandler, UpdateCtx};

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub banned: bool,
}

impl Member {
    /// Best available label: administrative name, then self-given name, then
    /// the local part of the email address.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.admin_name {
            return name.clone();
        }
        if let Some(name) = &self.real_name {
            return name.clone();
        }
        if let Some(email) = &self.email {
            return email.split('@').next().unwrap_or(email.as_str()).to_string();
        }
        "[unknown]".to_string()
    }
}

#[derive(Debug, Deserialize)]
struct MembersUpdate {
    last_evt: u64,
    data: Vec<Member>,
}

/// Clone-able id-keyed roster handle.
#[derive(Clone, Default)]
pub struct MemberDirectory {
    inner: Arc<DashMap<u64, Member>>,
}

impl MemberDirectory {
    pub fn get(&self, id: u64) -> Option<Member> {
        self.inner.get(&id).map(|m| m.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Name or full email for a known member; guests (unknown ids) get a
    /// fixed placeholder.
    pub fn name_or_email(&self, id: u64) -> String {
        match self.get(id) {
            Some(m) => m
                .admin_name
                .or(m.real_name)
                .or(m.email)
                .unwrap_or_else(|| "[unknown]".to_string()),
            None => "Guest".to_string(),
        }
    }

    fn upsert(&self, member: Member) {
        self.inner.insert(member.id, member);
    }
}

#[derive(Default)]
pub struct MembersService {
    directory: MemberDirectory,
}

impl MembersService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(&self) -> MemberDirectory {
        self.directory.clone()
    }
}

impl TopicHandler for MembersService {
    fn name(&self) -> &'static str {
        "members"
    }

    fn on_update(&mut self, payload: &RawValue, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        let update: MembersUpdate = serde_json::from_str(payload.get())
            .map_err(|e| SyncError::BadEnvelope(format!("members payload: {e}")))?;

        tracing::debug!(count = update.data.len(), last_evt = update.last_evt, "members updated");
        for member in update.data {
            self.directory.upsert(member);
        }
        ctx.subs.add_current_param("last_evt_user_id", json!(update.last_evt));
        Ok(())
    }
}
