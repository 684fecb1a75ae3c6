//! Built-in topic handler tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use syncline_client::dispatch::{TopicHandler, UpdateCtx};
use syncline_client::permissions::SharedPermissions;
use syncline_client::services::{ChatService, MembersService, PermsService, WorkspaceService};
use syncline_client::subscription::SubscriptionState;
use syncline_core::perms::{PermissionSet, PermissionsUpdate, RoleTable};
use syncline_core::protocol::flags;

fn raw(v: Value) -> Box<serde_json::value::RawValue> {
    serde_json::value::to_raw_value(&v).unwrap()
}

fn perms_with_rules(rules: &[&str]) -> SharedPermissions {
    let shared = SharedPermissions::new(RoleTable::builtin());
    let update = PermissionsUpdate {
        object_version: 1,
        update_version: 1,
        rules: rules.iter().map(|s| s.to_string()).collect(),
    };
    shared.replace(PermissionSet::from_update(&update, shared.roles()).unwrap());
    shared
}

#[test]
fn perms_service_replaces_snapshot_and_acks_version() {
    let mut svc = PermsService::new();
    let mut subs = SubscriptionState::default();
    let perms = SharedPermissions::new(RoleTable::builtin());

    let payload = raw(json!({
        "object_version": 1,
        "update_version": 5,
        "rules": ["r:member"],
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert!(perms.allows("files.upload.share.0"));
    assert_eq!(subs.current_params()["last_perms_update_version"], json!(5));
}

#[test]
fn perms_service_rejects_malformed_update_and_keeps_old_snapshot() {
    let mut svc = PermsService::new();
    let mut subs = SubscriptionState::default();
    let perms = perms_with_rules(&["r:guest"]);

    let payload = raw(json!({
        "object_version": 1,
        "update_version": 6,
        "rules": ["a:chat", "not-a-rule"],
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    // Rejection is a recovery, not a handler failure.
    svc.on_update(&payload, &mut ctx).unwrap();

    // The guest snapshot is still in force; the bad one never applied.
    assert!(perms.allows("public.request"));
    assert!(!perms.allows("chat.list.channel.0"));
    assert!(!subs.current_params().contains_key("last_perms_update_version"));
}

#[test]
fn perms_service_fails_on_unparseable_payload() {
    let mut svc = PermsService::new();
    let mut subs = SubscriptionState::default();
    let perms = SharedPermissions::new(RoleTable::builtin());

    let payload = raw(json!({ "rules": "not a list" }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    assert!(svc.on_update(&payload, &mut ctx).is_err());
}

#[test]
fn workspace_service_tracks_metadata_and_freeze_state() {
    let mut svc = WorkspaceService::new();
    let view = svc.view();
    let mut subs = SubscriptionState::default();
    let perms = SharedPermissions::new(RoleTable::builtin());

    let payload = raw(json!({
        "last_evt": 12,
        "data": { "name": "design-review", "frozen": false },
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert_eq!(view.get().unwrap().name, "design-review");
    assert!(!view.is_frozen());
    assert_eq!(subs.current_params()["last_evt_ws_id"], json!(12));

    let payload = raw(json!({
        "last_evt": 13,
        "data": { "name": "design-review", "deep_frozen": true },
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();
    assert!(view.is_frozen());
    assert_eq!(subs.current_params()["last_evt_ws_id"], json!(13));
}

#[test]
fn members_service_merges_roster_and_resolves_names() {
    let mut svc = MembersService::new();
    let directory = svc.directory();
    let mut subs = SubscriptionState::default();
    let perms = SharedPermissions::new(RoleTable::builtin());

    let payload = raw(json!({
        "last_evt": 40,
        "data": [
            { "id": 1, "email": "owner@example.com", "admin_name": "Owner" },
            { "id": 2, "email": "pat@example.com", "real_name": "Pat" },
            { "id": 3, "email": "quinn@example.com" },
        ],
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert_eq!(directory.len(), 3);
    assert_eq!(directory.get(2).unwrap().display_name(), "Pat");
    assert_eq!(directory.get(3).unwrap().display_name(), "quinn");
    assert_eq!(directory.name_or_email(3), "quinn@example.com");
    assert_eq!(directory.name_or_email(99), "Guest");
    assert_eq!(subs.current_params()["last_evt_user_id"], json!(40));

    // A later delta overwrites by id instead of appending.
    let payload = raw(json!({
        "last_evt": 41,
        "data": [ { "id": 2, "email": "pat@example.com", "real_name": "Pat Q", "locked": true } ],
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert_eq!(directory.len(), 3);
    let pat = directory.get(2).unwrap();
    assert!(pat.locked);
    assert_eq!(pat.display_name(), "Pat Q");
    assert_eq!(subs.current_params()["last_evt_user_id"], json!(41));
}

#[test]
fn chat_service_accumulates_and_resets_on_full_mode() {
    let mut svc = ChatService::new(0);
    let view = svc.view();
    let mut subs = SubscriptionState::default();
    let perms = perms_with_rules(&["r:member"]);

    let payload = raw(json!({
        "last_evt": 70,
        "data": { "mode": "all", "messages": [
            { "user_id": 1, "date": 1600000000, "msg": "hello" },
        ]},
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    let payload = raw(json!({
        "last_evt": 71,
        "data": { "mode": "incr", "messages": [
            { "user_id": 2, "date": 1600000100, "msg": "hi" },
        ]},
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(view.last_event_id(), 71);
    assert!(view.can_post());
    assert_eq!(subs.current_params()["last_evt_chat_id"], json!(71));

    // A fresh full snapshot replaces the log.
    let payload = raw(json!({
        "last_evt": 72,
        "data": { "mode": "all", "messages": [
            { "user_id": 1, "date": 1600000200, "msg": "rejoined" },
        ]},
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view.messages()[0].msg, "rejoined");
}

#[test]
fn chat_posting_is_denied_for_frozen_sessions() {
    let mut svc = ChatService::new(0);
    let view = svc.view();
    let mut subs = SubscriptionState::default();
    // Member rights, but the freeze role moderates the workspace.
    let perms = perms_with_rules(&["r:member", "r:freeze"]);

    let payload = raw(json!({
        "last_evt": 80,
        "data": { "mode": "all", "messages": [] },
    }));
    let mut ctx = UpdateCtx { subs: &mut subs, perms: &perms };
    svc.on_update(&payload, &mut ctx).unwrap();

    assert!(!view.can_post());
    // Reading stays allowed; only posting is moderated.
    assert!(perms.allows("chat.list.channel.0"));
}

#[test]
fn chat_enable_registers_flag_and_channel_param() {
    let svc = ChatService::new(4);
    let mut subs = SubscriptionState::default();
    svc.enable(&mut subs);
    svc.enable(&mut subs); // repeat is harmless

    assert_eq!(subs.effective_flags(), flags::WANT_CHAT);
    assert_eq!(subs.effective_params()["chat_channel_id"], json!(4));
}

#[test]
fn permission_set_is_shared_not_copied_per_handler() {
    let shared = perms_with_rules(&["r:observer"]);
    let clone = shared.clone();
    assert!(clone.allows("files.download.share.0"));

    // Replacing through one handle is visible through the other.
    let update = PermissionsUpdate {
        object_version: 1,
        update_version: 2,
        rules: vec!["d:files".to_string()],
    };
    shared.replace(PermissionSet::from_update(&update, shared.roles()).unwrap());
    assert!(!clone.allows("files.download.share.0"));
}

#[test]
fn shared_permissions_default_deny_before_first_update() {
    let shared = SharedPermissions::new(RoleTable::builtin());
    assert!(shared.snapshot().is_none());
    assert!(!shared.allows("chat.list.channel.0"));
    assert!(!shared.is_in_role("member"));
}
