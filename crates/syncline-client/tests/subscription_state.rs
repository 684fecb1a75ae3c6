//! Subscription tier tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use syncline_client::subscription::{Params, SubscriptionState};
use syncline_core::protocol::flags;

fn params(entries: &[(&str, serde_json::Value)]) -> Params {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn effective_flags_is_the_union_of_all_tiers() {
    let mut subs = SubscriptionState::new(flags::WANT_PERMS, Params::new());
    subs.add_current_flags(flags::WANT_CHAT | flags::WANT_MEMBERS);
    subs.add_one_time_flags(flags::FORCE_SYNC);

    assert_eq!(
        subs.effective_flags(),
        flags::WANT_PERMS | flags::WANT_CHAT | flags::WANT_MEMBERS | flags::FORCE_SYNC
    );
}

#[test]
fn later_tiers_win_on_param_collision() {
    let mut subs = SubscriptionState::new(
        0,
        params(&[("a", json!("default")), ("b", json!("default"))]),
    );
    subs.add_current_params(params(&[("b", json!("current")), ("c", json!("current"))]));
    subs.add_one_time_params(params(&[("c", json!("one_time"))]));

    let eff = subs.effective_params();
    assert_eq!(eff["a"], json!("default"));
    assert_eq!(eff["b"], json!("current"));
    assert_eq!(eff["c"], json!("one_time"));
}

#[test]
fn last_writer_wins_within_a_tier() {
    let mut subs = SubscriptionState::new(0, Params::new());
    subs.add_current_param("k", json!(1));
    subs.add_current_param("k", json!(2));
    assert_eq!(subs.effective_params()["k"], json!(2));
}

#[test]
fn clear_current_flags_is_and_not() {
    let mut subs = SubscriptionState::new(0, Params::new());
    subs.set_current_flags(flags::WANT_CHAT | flags::WANT_MEMBERS | flags::WANT_FILES);
    subs.clear_current_flags(flags::WANT_MEMBERS);
    assert_eq!(subs.current_flags(), flags::WANT_CHAT | flags::WANT_FILES);
}

#[test]
fn reset_one_time_leaves_other_tiers_alone() {
    let mut subs = SubscriptionState::new(flags::WANT_PERMS, params(&[("d", json!(1))]));
    subs.add_current_flags(flags::WANT_CHAT);
    subs.add_current_param("c", json!(2));
    subs.add_one_time_flags(flags::FORCE_SYNC);
    subs.add_one_time_param("o", json!(3));

    subs.reset_one_time();

    assert_eq!(subs.one_time_flags(), 0);
    assert!(subs.one_time_params().is_empty());
    assert_eq!(subs.effective_flags(), flags::WANT_PERMS | flags::WANT_CHAT);
    let eff = subs.effective_params();
    assert_eq!(eff["d"], json!(1));
    assert_eq!(eff["c"], json!(2));
    assert!(!eff.contains_key("o"));
}

#[test]
fn remove_current_params_by_key() {
    let mut subs = SubscriptionState::new(0, Params::new());
    subs.add_current_params(params(&[("x", json!(1)), ("y", json!(2))]));
    subs.remove_current_params(&["x", "missing"]);
    let eff = subs.effective_params();
    assert!(!eff.contains_key("x"));
    assert_eq!(eff["y"], json!(2));
}

#[test]
fn reset_current_clears_only_the_current_tier() {
    let mut subs = SubscriptionState::new(flags::WANT_PERMS, Params::new());
    subs.set_current_flags(flags::WANT_CHAT);
    subs.add_current_param("c", json!(1));
    subs.add_one_time_flags(flags::FORCE_SYNC);

    subs.reset_current();

    assert_eq!(subs.current_flags(), 0);
    assert!(subs.current_params().is_empty());
    assert_eq!(subs.effective_flags(), flags::WANT_PERMS | flags::FORCE_SYNC);
}
