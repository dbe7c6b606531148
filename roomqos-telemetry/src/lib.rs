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

//! Lightweight telemetry event bus shared across the policy layer.
//!
//! Bandwidth samples, applied fallback actions, and connection status
//! transitions flow through here so observers (dashboards, logs, tests) can
//! watch the policy layer work without being wired into it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

// === Telemetry data structures ===

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Sub-system that produced this event (e.g. "bandwidth", "connection").
    pub subsystem: &'static str,
    /// Optional stream or participant identifier.
    pub stream_id: Option<String>,
    /// Unix time in milliseconds when the event was captured.
    pub ts_ms: u64,
    /// Arbitrary key/value metrics.
    pub metrics: Vec<Metric>,
}

impl TelemetryEvent {
    pub fn new(subsystem: &'static str, metrics: Vec<Metric>) -> Self {
        Self {
            subsystem,
            stream_id: None,
            ts_ms: now_ms(),
            metrics,
        }
    }

    pub fn with_stream(mut self, stream_id: impl Into<String>) -> Self {
        self.stream_id = Some(stream_id.into());
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metric {
    pub name: &'static str,
    pub value: MetricValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum MetricValue {
    I64(i64),
    U64(u64),
    F64(f64),
    Text(String),
}

/// A single measured throughput value supplied by the telemetry collaborator.
///
/// Stateless input to the bandwidth fallback policy: no history is retained
/// here, and any smoothing happens upstream of this type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    pub bits_per_second: u64,
    pub ts_ms: u64,
}

impl BandwidthSample {
    pub fn new(bits_per_second: u64) -> Self {
        Self {
            bits_per_second,
            ts_ms: now_ms(),
        }
    }
}

// === Event bus ===

/// A telemetry channel pair. The global bus covers production use; tests and
/// embedded tooling can create private instances.
pub struct TelemetryBus {
    sender: flume::Sender<TelemetryEvent>,
    receiver: flume::Receiver<TelemetryEvent>,
}

impl TelemetryBus {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> flume::Sender<TelemetryEvent> {
        self.sender.clone()
    }

    pub fn receiver(&self) -> flume::Receiver<TelemetryEvent> {
        self.receiver.clone()
    }

    /// Non-blocking publish; events are dropped if every receiver is gone.
    pub fn emit(&self, event: TelemetryEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for TelemetryBus {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_BUS: Lazy<TelemetryBus> = Lazy::new(TelemetryBus::new);

/// Obtain a sender that can publish telemetry events to the global bus.
pub fn global_sender() -> flume::Sender<TelemetryEvent> {
    GLOBAL_BUS.sender()
}

/// Subscribe to the global telemetry stream.
pub fn subscribe() -> flume::Receiver<TelemetryEvent> {
    GLOBAL_BUS.receiver()
}

/// Publish an event to the global bus. Never blocks, never panics.
pub fn emit(event: TelemetryEvent) {
    GLOBAL_BUS.emit(event);
}

// === Helper utilities ===

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// === metric! helper macro ===

/// Shorthand for constructing a [`Metric`].
#[macro_export]
macro_rules! metric {
    ($name:expr, $value:expr) => {
        $crate::Metric {
            name: $name,
            value: $crate::MetricValue::from($value),
        }
    };
}

// `From` conversions so `metric!("attempt", 3u64)` works for common types.
impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::I64(v)
    }
}
impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::U64(v)
    }
}
impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::F64(v)
    }
}
impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}
impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_bus_delivers_events() {
        let bus = TelemetryBus::new();
        let rx = bus.receiver();
        bus.emit(TelemetryEvent::new(
            "bandwidth",
            vec![metric!("bits_per_second", 300_000u64)],
        ));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.subsystem, "bandwidth");
        assert_eq!(event.metrics.len(), 1);
        assert_eq!(event.metrics[0].name, "bits_per_second");
    }

    #[test]
    fn test_with_stream_sets_stream_id() {
        let event = TelemetryEvent::new("connection", vec![]).with_stream("peer-1");
        assert_eq!(event.stream_id.as_deref(), Some("peer-1"));
    }

    #[test]
    fn test_metric_macro_conversions() {
        let m = metric!("rtt", 12.5);
        assert!(matches!(m.value, MetricValue::F64(v) if v == 12.5));
        let m = metric!("state", "connected");
        assert!(matches!(m.value, MetricValue::Text(ref s) if s == "connected"));
    }

    #[test]
    fn test_global_emit_does_not_panic_without_receivers() {
        emit(TelemetryEvent::new("connection", vec![]));
    }

    #[test]
    fn test_bandwidth_sample_carries_timestamp() {
        let sample = BandwidthSample::new(500_000);
        assert_eq!(sample.bits_per_second, 500_000);
        assert!(sample.ts_ms > 0);
    }
}
