//! The long-poll state machine.
//!
//! Responsibilities:
//! - Own the request-id counter and the tracked server protocol version
//!   (instance fields: independent sessions are independent loops).
//! - Single request in flight, ever. The next cycle starts only after
//!   dispatch finishes (success) or the loop decides to stop.
//! - Classify responses: version-exceeded (freeze), stale (silent discard),
//!   fresh (reset one-time tier, dispatch in registration order).
//! - Reschedule at the normal delay after success and after empty-
//!   subscription cycles, at the fixed backoff delay after transport
//!   failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use syncline_core::protocol::envelope::{RequestEnvelope, ResponseEnvelope};
use syncline_core::Result;

use crate::config::{ClientConfig, HandlerFailurePolicy, PollSection};
use crate::dispatch::{HandlerRegistry, TopicHandler, UpdateCtx};
use crate::events::SessionEvent;
use crate::permissions::SharedPermissions;
use crate::subscription::SubscriptionState;
use crate::transport::Transport;

/// Loop lifecycle. `Frozen` is terminal: the server moved past this client's
/// protocol version and only a session reload recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Scheduled,
    Sending,
    Frozen,
}

/// Clone-able stop signal. Stopping prevents future scheduling only; an
/// in-flight request completes and its response is still id-checked.
#[derive(Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Idempotent, safe from any state.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

pub struct UpdateLoop<T: Transport> {
    transport: T,
    subs: SubscriptionState,
    registry: HandlerRegistry,
    perms: SharedPermissions,
    poll: PollSection,
    protocol_version: u32,
    req_id: u64,
    state: LoopState,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl<T: Transport> UpdateLoop<T> {
    pub fn new(cfg: &ClientConfig, transport: T, subs: SubscriptionState) -> Result<Self> {
        let roles = cfg.role_table()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        Ok(Self {
            transport,
            subs,
            registry: HandlerRegistry::new(),
            perms: SharedPermissions::new(roles),
            poll: cfg.poll.clone(),
            protocol_version: cfg.protocol.version,
            req_id: 0,
            state: LoopState::Idle,
            events_tx,
            events_rx: Some(events_rx),
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        })
    }

    /// Register a topic handler. Order of registration is the dispatch
    /// order for the lifetime of the session.
    pub fn register(&mut self, flag: u32, handler: Box<dyn TopicHandler>) {
        self.registry.register(flag, handler);
    }

    /// Handle for UI feature gates; shared with every dispatch context.
    pub fn permissions(&self) -> SharedPermissions {
        self.perms.clone()
    }

    pub fn subscription(&self) -> &SubscriptionState {
        &self.subs
    }

    pub fn subscription_mut(&mut self) -> &mut SubscriptionState {
        &mut self.subs
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    /// Highest request id issued so far.
    pub fn last_req_id(&self) -> u64 {
        self.req_id
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: Arc::clone(&self.stop_tx),
        }
    }

    /// Session event stream (reload-required, poll-halted). Single consumer.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.events_rx.take()
    }

    /// Feed the out-of-band initial envelope (req_id 0) through the same
    /// success path as a polled response, priming handler state before the
    /// loop starts. A version-exceeded bootstrap freezes the session
    /// immediately.
    pub fn bootstrap(&mut self, env: ResponseEnvelope) {
        let _ = self.apply_response(env);
    }

    /// Drive the loop until it stops: terminal freeze, halted dispatch,
    /// stale discard, or an external `StopHandle::stop`. `initial_delay`
    /// zero sends immediately.
    pub async fn run(&mut self, initial_delay: Duration) {
        let mut delay = initial_delay;
        loop {
            if self.stop_requested() || self.state == LoopState::Frozen {
                break;
            }
            if !delay.is_zero() {
                self.state = LoopState::Scheduled;
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = self.stop_rx.changed() => {}
                }
                if self.stop_requested() {
                    break;
                }
            }
            match self.poll_once().await {
                Some(next) => delay = next,
                None => return,
            }
        }
        if self.state != LoopState::Frozen {
            self.state = LoopState::Idle;
        }
    }

    /// One timer fire. Returns the delay before the next fire, or `None`
    /// when the loop must not reschedule (frozen, stale discard, or a
    /// handler failure under the halt policy).
    pub async fn poll_once(&mut self) -> Option<Duration> {
        if self.state == LoopState::Frozen {
            return None;
        }

        let flags = self.subs.effective_flags();
        if flags == 0 {
            // Nothing to watch is a legitimate state, not an error; skip the
            // transport entirely and check again later.
            tracing::debug!("no topics subscribed; postponing request");
            return Some(self.normal_delay());
        }

        self.req_id += 1;
        let req = RequestEnvelope {
            version: self.protocol_version,
            req_id: self.req_id,
            req_flags: flags,
            req_params: self.subs.effective_params(),
        };

        tracing::debug!(req_id = req.req_id, flags, "state request");
        self.state = LoopState::Sending;
        match self.transport.send(&req).await {
            Ok(env) => self.apply_response(env),
            Err(e) => {
                tracing::warn!(req_id = self.req_id, error = %e, "state request failed");
                self.state = LoopState::Idle;
                Some(self.backoff_delay())
            }
        }
    }

    /// The shared success path for polled responses and the bootstrap
    /// envelope. Returns the next delay, or `None` when the loop must stop.
    fn apply_response(&mut self, env: ResponseEnvelope) -> Option<Duration> {
        if env.version > self.protocol_version {
            tracing::error!(
                server = env.version,
                client = self.protocol_version,
                "server protocol ahead; freezing session"
            );
            self.state = LoopState::Frozen;
            let _ = self.events_tx.send(SessionEvent::ReloadRequired {
                server_version: env.version,
            });
            return None;
        }
        self.protocol_version = env.version;

        // A slower earlier request resolving after a newer one was issued:
        // drop it whole. The newer request's response reschedules, not this.
        if env.req_id > 0 && env.req_id < self.req_id {
            tracing::debug!(
                req_id = env.req_id,
                newest = self.req_id,
                "ignoring stale state update"
            );
            self.state = LoopState::Idle;
            return None;
        }

        // The one-time tier was consumed by the request this response
        // answers; clear it before handlers queue the next round.
        self.subs.reset_one_time();

        let Self {
            subs,
            registry,
            perms,
            poll,
            events_tx,
            state,
            ..
        } = self;

        for reg in registry.entries_mut() {
            let Some(payload) = env.topic(reg.flag) else {
                tracing::trace!(topic = reg.flag, "no result for topic");
                continue;
            };
            tracing::debug!(handler = reg.handler.name(), topic = reg.flag, "dispatching topic");

            let mut ctx = UpdateCtx {
                subs: &mut *subs,
                perms: &*perms,
            };
            if let Err(e) = reg.handler.on_update(payload, &mut ctx) {
                tracing::error!(
                    handler = reg.handler.name(),
                    topic = reg.flag,
                    error = %e,
                    "topic handler failed"
                );
                match poll.on_handler_failure {
                    HandlerFailurePolicy::Halt => {
                        // Observed fail-stop behavior: remaining dispatch is
                        // abandoned and polling stops until something
                        // external restarts it.
                        let _ = events_tx.send(SessionEvent::PollHalted {
                            topic: reg.flag,
                            reason: e.to_string(),
                        });
                        *state = LoopState::Idle;
                        return None;
                    }
                    HandlerFailurePolicy::Continue => continue,
                }
            }
        }

        self.state = LoopState::Idle;
        Some(self.normal_delay())
    }

    fn stop_requested(&self) -> bool {
        *self.stop_rx.borrow()
    }

    fn normal_delay(&self) -> Duration {
        Duration::from_millis(self.poll.normal_delay_ms)
    }

    fn backoff_delay(&self) -> Duration {
        Duration::from_millis(self.poll.backoff_delay_ms)
    }
}
