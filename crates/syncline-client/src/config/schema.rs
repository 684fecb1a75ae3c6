use std::collections::BTreeMap;

use serde::Deserialize;

use syncline_core::error::{Result, SyncError};
use syncline_core::perms::RoleTable;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub protocol: ProtocolSection,

    #[serde(default)]
    pub poll: PollSection,

    /// Optional role-table override. Empty means the built-in roles.
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<String>>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SyncError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.poll.validate()?;

        // Surface malformed role rules at load time, not at first check.
        if !self.roles.is_empty() {
            RoleTable::compile(&self.roles)
                .map_err(|e| SyncError::BadConfig(format!("roles: {e}")))?;
        }

        Ok(())
    }

    /// The compiled role table this session will evaluate against.
    pub fn role_table(&self) -> Result<RoleTable> {
        if self.roles.is_empty() {
            Ok(RoleTable::builtin())
        } else {
            RoleTable::compile(&self.roles)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolSection {
    /// Protocol version this client speaks at session start.
    #[serde(default = "default_protocol_version")]
    pub version: u32,
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self {
            version: default_protocol_version(),
        }
    }
}

/// What the loop does when a topic handler fails. `Halt` reproduces the
/// observed fail-stop behavior; `Continue` isolates the failing handler and
/// keeps polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerFailurePolicy {
    Halt,
    Continue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Delay between successful cycles (and for cycles with nothing to
    /// watch).
    #[serde(default = "default_normal_delay_ms")]
    pub normal_delay_ms: u64,

    /// Fixed backoff after a transport failure. No exponential growth.
    #[serde(default = "default_backoff_delay_ms")]
    pub backoff_delay_ms: u64,

    #[serde(default = "default_on_handler_failure")]
    pub on_handler_failure: HandlerFailurePolicy,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            normal_delay_ms: default_normal_delay_ms(),
            backoff_delay_ms: default_backoff_delay_ms(),
            on_handler_failure: default_on_handler_failure(),
        }
    }
}

impl PollSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60_000).contains(&self.normal_delay_ms) {
            return Err(SyncError::BadConfig(
                "poll.normal_delay_ms must be between 100 and 60000".into(),
            ));
        }
        if !(100..=600_000).contains(&self.backoff_delay_ms) {
            return Err(SyncError::BadConfig(
                "poll.backoff_delay_ms must be between 100 and 600000".into(),
            ));
        }
        if self.backoff_delay_ms < self.normal_delay_ms {
            return Err(SyncError::BadConfig(
                "poll.backoff_delay_ms must not be smaller than normal_delay_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_protocol_version() -> u32 {
    1
}
fn default_normal_delay_ms() -> u64 {
    2000
}
fn default_backoff_delay_ms() -> u64 {
    5000
}
fn default_on_handler_failure() -> HandlerFailurePolicy {
    HandlerFailurePolicy::Halt
}
