//! Chat topic handler.

use std::sync::{Arc, RwLock};

use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;

use syncline_core::error::{Result, SyncError};
use syncline_core::protocol::flags::WANT_CHAT;

use crate::dispatch::{TopicHandler, UpdateCtx};
use crate::subscription::SubscriptionState;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub user_id: u64,
    pub date: u64,
    pub msg: String,
}

#[derive(Debug, Deserialize)]
struct ChatData {
    mode: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatUpdate {
    last_evt: u64,
    data: ChatData,
}

#[derive(Default)]
struct ChatLogInner {
    messages: Vec<ChatMessage>,
    last_evt: u64,
    post_enabled: bool,
}

/// Clone-able read handle on the accumulated channel log.
#[derive(Clone, Default)]
pub struct ChatView {
    inner: Arc<RwLock<ChatLogInner>>,
}

impl ChatView {
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read().map(|g| g.messages.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.messages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_event_id(&self) -> u64 {
        self.inner.read().map(|g| g.last_evt).unwrap_or(0)
    }

    /// Whether posting is currently permitted on this channel.
    pub fn can_post(&self) -> bool {
        self.inner.read().map(|g| g.post_enabled).unwrap_or(false)
    }
}

pub struct ChatService {
    channel_id: u32,
    view: ChatView,
}

impl ChatService {
    pub fn new(channel_id: u32) -> Self {
        Self {
            channel_id,
            view: ChatView::default(),
        }
    }

    pub fn view(&self) -> ChatView {
        self.view.clone()
    }

    /// Subscribe this channel: persistent chat flag plus the channel
    /// parameter. Safe to call repeatedly.
    pub fn enable(&self, subs: &mut SubscriptionState) {
        subs.add_current_flags(WANT_CHAT);
        subs.add_current_param("chat_channel_id", json!(self.channel_id));
    }
}

impl TopicHandler for ChatService {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn on_update(&mut self, payload: &RawValue, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        let update: ChatUpdate = serde_json::from_str(payload.get())
            .map_err(|e| SyncError::BadEnvelope(format!("chat payload: {e}")))?;

        tracing::debug!(
            mode = %update.data.mode,
            count = update.data.messages.len(),
            last_evt = update.last_evt,
            "chat updated"
        );

        // Posting is gated by channel permission, and a frozen (moderated)
        // workspace denies it regardless.
        let post_enabled = !ctx.perms.is_in_role("freeze")
            && ctx
                .perms
                .allows(&format!("chat.post.channel.{}", self.channel_id));

        if let Ok(mut guard) = self.view.inner.write() {
            if update.data.mode == "all" {
                guard.messages.clear();
            }
            guard.messages.extend(update.data.messages);
            guard.last_evt = update.last_evt;
            guard.post_enabled = post_enabled;
        }

        ctx.subs.add_current_param("last_evt_chat_id", json!(update.last_evt));
        Ok(())
    }
}
