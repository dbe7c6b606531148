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

//! Capability seams onto the underlying real-time session.
//!
//! The session object is shared by several independent consumers, so each
//! consumer sees only the narrow capability it needs. The resilience monitor
//! holds the sole [`ReconnectCapability`]; every other component reads state
//! or issues track-level calls, which keeps competing reconnection attempts
//! structurally impossible.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use roomqos_types::ConnectionQualityTier;

/// Lifecycle events emitted by the underlying session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The signaling channel dropped and is being re-established.
    SignalReconnecting,
    /// Full transport reconnection is underway inside the session itself.
    Reconnecting,
    /// The session recovered on its own.
    Reconnected,
    /// The session is gone; recovery is now this layer's job.
    Disconnected,
    /// Per-participant quality signal changed.
    ConnectionQualityChanged {
        participant_id: String,
        quality: ConnectionQualityTier,
    },
}

/// The one capability allowed to re-establish a dropped session. Held only by
/// the resilience monitor.
pub trait ReconnectCapability: Send + Sync {
    /// Rejoin the session at `server_url` with the (opaque) `token`.
    fn connect<'a>(&'a self, server_url: &'a str, token: &'a str) -> BoxFuture<'a, anyhow::Result<()>>;

    /// Whether the session currently has no live connection.
    fn is_disconnected(&self) -> bool;
}

pub type SessionEventListener = Arc<dyn Fn(SessionEvent) + Send + Sync>;

/// Source of [`SessionEvent`]s with structurally enforced teardown: dropping
/// the returned [`EventSubscription`] deregisters the listener, so a consumer
/// cannot forget the `off` half of an `on`/`off` pair.
pub trait SessionEventSource {
    fn subscribe(&self, listener: SessionEventListener) -> EventSubscription;
}

/// Disposable subscription handle. Deregisters on drop.
pub struct EventSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl EventSubscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Deregister now instead of at drop time.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventSubscription")
    }
}

/// Simple dispatcher implementing [`SessionEventSource`], for room adapters
/// that translate their transport's callbacks into [`SessionEvent`]s.
#[derive(Clone, Default)]
pub struct SessionEventBus {
    listeners: Arc<Mutex<HashMap<u64, SessionEventListener>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every current listener, in registration order.
    pub fn dispatch(&self, event: SessionEvent) {
        let listeners: Vec<(u64, SessionEventListener)> = {
            let guard = self.listeners.lock().unwrap();
            let mut entries: Vec<_> = guard.iter().map(|(id, l)| (*id, l.clone())).collect();
            entries.sort_by_key(|(id, _)| *id);
            entries
        };
        for (_, listener) in listeners {
            listener(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl SessionEventSource for SessionEventBus {
    fn subscribe(&self, listener: SessionEventListener) -> EventSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, listener);
        let listeners = self.listeners.clone();
        EventSubscription::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispatch_reaches_subscribed_listener() {
        let bus = SessionEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let _sub = bus.subscribe(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        bus.dispatch(SessionEvent::Disconnected);
        bus.dispatch(SessionEvent::Reconnected);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropping_subscription_deregisters() {
        let bus = SessionEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let sub = bus.subscribe(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(bus.listener_count(), 1);
        drop(sub);
        assert_eq!(bus.listener_count(), 0);
        bus.dispatch(SessionEvent::Disconnected);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let bus = SessionEventBus::new();
        let sub = bus.subscribe(Arc::new(|_| {}));
        sub.unsubscribe();
        assert_eq!(bus.listener_count(), 0);
    }
}
