/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Connection resilience monitor: observes session lifecycle events and owns
//! the bounded-retry reconnection loop.
//!
//! Exactly one retry loop may exist per session. The `reconnect_in_progress`
//! flag is claimed with a compare-exchange before a loop is spawned, so a
//! `Disconnected` event and a manual retry arriving together cannot start
//! two loops. Every suspension point in the loop re-checks that the monitor
//! is still attached and the session still disconnected before touching
//! shared state.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use roomqos_telemetry::{emit, metric, TelemetryEvent};
use roomqos_types::ConnectionStatus;

use super::backoff::BackoffSchedule;
use super::session::{
    EventSubscription, ReconnectCapability, SessionEvent, SessionEventSource,
};

pub type StatusCallback = Arc<dyn Fn(ConnectionStatus) + Send + Sync>;
pub type GiveUpCallback = Arc<dyn Fn() + Send + Sync>;

/// Lifecycle of the monitor itself, surfaced for UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Connected,
    SignalReconnecting,
    Reconnecting,
    Reconnected,
    Disconnected,
    RetryingAttempt(u32),
    /// Terminal until the monitor is reattached or a manual retry is issued.
    GaveUp,
}

impl MonitorState {
    pub fn name(&self) -> &'static str {
        match self {
            MonitorState::Connected => "connected",
            MonitorState::SignalReconnecting => "signal_reconnecting",
            MonitorState::Reconnecting => "reconnecting",
            MonitorState::Reconnected => "reconnected",
            MonitorState::Disconnected => "disconnected",
            MonitorState::RetryingAttempt(_) => "retrying",
            MonitorState::GaveUp => "gave_up",
        }
    }
}

/// Configuration for [`ConnectionResilienceMonitor::attach`].
pub struct ResilienceMonitorOptions {
    /// Last known server URL, reused for every rejoin attempt.
    pub server_url: String,
    /// Opaque credential for rejoining; issuance is not this layer's concern.
    pub token: String,
    /// Retry budget per disconnection.
    pub max_retries: u32,
    /// Receives `{message, tone}` records for toast rendering.
    pub on_status: StatusCallback,
    /// Invoked exactly once when the retry budget is exhausted. The host
    /// decides what happens next (e.g. offering a manual rejoin).
    pub on_give_up: GiveUpCallback,
}

struct MonitorShared<S> {
    session: Arc<S>,
    server_url: String,
    token: String,
    max_retries: u32,
    on_status: StatusCallback,
    on_give_up: GiveUpCallback,
    mounted: AtomicBool,
    reconnect_in_progress: AtomicBool,
    attempt: AtomicU32,
    state: Mutex<MonitorState>,
}

impl<S: ReconnectCapability + 'static> MonitorShared<S> {
    fn set_state(&self, state: MonitorState) {
        *self.state.lock().unwrap() = state;
        emit(TelemetryEvent::new(
            "connection",
            vec![metric!("state", state.name())],
        ));
    }

    fn push_status(&self, status: ConnectionStatus) {
        if self.mounted.load(Ordering::Acquire) {
            (self.on_status)(status);
        }
    }

    fn handle_event(this: &Arc<Self>, event: SessionEvent) {
        if !this.mounted.load(Ordering::Acquire) {
            return;
        }
        match event {
            SessionEvent::SignalReconnecting => {
                this.set_state(MonitorState::SignalReconnecting);
                this.push_status(ConnectionStatus::warning(
                    "Connection unstable, reconnecting...",
                ));
            }
            SessionEvent::Reconnecting => {
                this.set_state(MonitorState::Reconnecting);
                this.push_status(ConnectionStatus::warning(
                    "Connection unstable, reconnecting...",
                ));
            }
            SessionEvent::Reconnected => {
                // Supersedes any in-flight retry loop: the loop observes the
                // cleared flag at its next checkpoint and exits silently.
                this.attempt.store(0, Ordering::Release);
                this.reconnect_in_progress.store(false, Ordering::Release);
                this.set_state(MonitorState::Reconnected);
                this.push_status(ConnectionStatus::success("Connection restored"));
            }
            SessionEvent::Disconnected => {
                if this.reconnect_in_progress.load(Ordering::Acquire) {
                    debug!("ignoring Disconnected: retry loop already running");
                    return;
                }
                if *this.state.lock().unwrap() == MonitorState::GaveUp {
                    debug!("ignoring Disconnected: gave up, waiting for reattach");
                    return;
                }
                if !this.session.is_disconnected() {
                    debug!("ignoring Disconnected: session reports a live connection");
                    return;
                }
                this.set_state(MonitorState::Disconnected);
                Self::start_retry_loop(this);
            }
            SessionEvent::ConnectionQualityChanged {
                participant_id,
                quality,
            } => {
                emit(
                    TelemetryEvent::new(
                        "connection_quality",
                        vec![metric!("tier", quality.as_str())],
                    )
                    .with_stream(participant_id),
                );
            }
        }
    }

    fn start_retry_loop(this: &Arc<Self>) {
        if this
            .reconnect_in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("retry loop already in progress, not starting another");
            return;
        }
        let shared = this.clone();
        tokio::spawn(async move {
            shared.run_retry_loop().await;
        });
    }

    async fn run_retry_loop(self: Arc<Self>) {
        let mut schedule = BackoffSchedule::new(self.max_retries);
        while let Some(attempt) = schedule.begin_attempt() {
            if let Some(delay) = schedule.delay_before(attempt) {
                tokio::time::sleep(delay).await;
            }
            // Checkpoints after the suspension: the host may have unmounted,
            // a Reconnected event may have cleared the flag, or the session
            // may have recovered through another path (e.g. a manual rejoin).
            if !self.mounted.load(Ordering::Acquire) {
                return;
            }
            if !self.reconnect_in_progress.load(Ordering::Acquire) {
                return;
            }
            if !self.session.is_disconnected() {
                self.reconnect_in_progress.store(false, Ordering::Release);
                return;
            }
            self.attempt.store(attempt, Ordering::Release);
            self.set_state(MonitorState::RetryingAttempt(attempt));
            self.push_status(ConnectionStatus::warning(format!(
                "Connection lost, reconnecting (attempt {attempt} of {})",
                self.max_retries
            )));
            match self.session.connect(&self.server_url, &self.token).await {
                Ok(()) => {
                    if !self.mounted.load(Ordering::Acquire) {
                        return;
                    }
                    info!("reconnected after {attempt} attempt(s)");
                    self.attempt.store(0, Ordering::Release);
                    self.reconnect_in_progress.store(false, Ordering::Release);
                    self.set_state(MonitorState::Connected);
                    self.push_status(ConnectionStatus::success("Connection restored"));
                    return;
                }
                Err(e) => {
                    warn!(
                        "reconnect attempt {attempt} of {} failed: {e:#}",
                        self.max_retries
                    );
                }
            }
        }
        if !self.mounted.load(Ordering::Acquire) {
            return;
        }
        self.reconnect_in_progress.store(false, Ordering::Release);
        self.set_state(MonitorState::GaveUp);
        self.push_status(ConnectionStatus::warning(
            "Unable to reconnect, connection lost",
        ));
        (self.on_give_up)();
    }
}

/// Observes a session's lifecycle and drives reconnection with bounded
/// exponential backoff. Holds the only [`ReconnectCapability`] in the system.
///
/// Detaching (dropping) the monitor deregisters its event listener and
/// silences any in-flight timer: no status callback or retry fires afterward.
pub struct ConnectionResilienceMonitor<S: ReconnectCapability + 'static> {
    shared: Arc<MonitorShared<S>>,
    subscription: Option<EventSubscription>,
}

impl<S: ReconnectCapability + 'static> ConnectionResilienceMonitor<S> {
    /// Subscribe to `events` and start monitoring `session`.
    ///
    /// Must be called within a tokio runtime; retry loops are spawned onto it.
    pub fn attach<E: SessionEventSource>(
        session: Arc<S>,
        events: &E,
        options: ResilienceMonitorOptions,
    ) -> Self {
        let shared = Arc::new(MonitorShared {
            session,
            server_url: options.server_url,
            token: options.token,
            max_retries: options.max_retries,
            on_status: options.on_status,
            on_give_up: options.on_give_up,
            mounted: AtomicBool::new(true),
            reconnect_in_progress: AtomicBool::new(false),
            attempt: AtomicU32::new(0),
            state: Mutex::new(MonitorState::Connected),
        });
        let weak = Arc::downgrade(&shared);
        let subscription = events.subscribe(Arc::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                MonitorShared::handle_event(&shared, event);
            }
        }));
        info!(
            "resilience monitor attached, retry budget {}",
            shared.max_retries
        );
        Self {
            shared,
            subscription: Some(subscription),
        }
    }

    pub fn state(&self) -> MonitorState {
        *self.shared.state.lock().unwrap()
    }

    /// Attempt number of the in-flight retry, 0 when idle.
    pub fn current_attempt(&self) -> u32 {
        self.shared.attempt.load(Ordering::Acquire)
    }

    pub fn is_reconnect_in_progress(&self) -> bool {
        self.shared.reconnect_in_progress.load(Ordering::Acquire)
    }

    /// User-triggered reconnect. A no-op while the automatic loop runs (the
    /// in-progress flag guards both paths); after `GaveUp` it starts a fresh
    /// loop with a full retry budget.
    pub fn trigger_manual_reconnect(&self) {
        let shared = &self.shared;
        if !shared.mounted.load(Ordering::Acquire) {
            return;
        }
        {
            let mut state = shared.state.lock().unwrap();
            if *state == MonitorState::GaveUp {
                *state = MonitorState::Disconnected;
            }
        }
        if !shared.session.is_disconnected() {
            debug!("manual reconnect ignored: session reports a live connection");
            return;
        }
        MonitorShared::start_retry_loop(shared);
    }

    /// Stop monitoring. Equivalent to dropping the monitor.
    pub fn detach(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.shared.mounted.store(false, Ordering::Release);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        debug!("resilience monitor detached");
    }
}

impl<S: ReconnectCapability + 'static> Drop for ConnectionResilienceMonitor<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
