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
 */

pub mod backoff;
pub mod monitor;
pub mod session;

pub use backoff::BackoffSchedule;
pub use monitor::{
    ConnectionResilienceMonitor, GiveUpCallback, MonitorState, ResilienceMonitorOptions,
    StatusCallback,
};
pub use session::{
    EventSubscription, ReconnectCapability, SessionEvent, SessionEventBus, SessionEventListener,
    SessionEventSource,
};
