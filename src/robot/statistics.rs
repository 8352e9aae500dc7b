//! Byte accounting for outbound telemetry
//!
//! Compiled in with the `statistics` feature. Each engine instance owns
//! its counters; enabling the feature changes no observable protocol
//! behavior.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals for one counter
#[derive(Debug, Default)]
pub struct ByteCount {
    bytes_sent: AtomicU64,
    messages_sent: AtomicU64,
}

impl ByteCount {
    pub(crate) fn add(&self, bytes: u64) {
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }
}

/// Per-engine send statistics
#[derive(Debug, Default)]
pub struct Statistics {
    global: ByteCount,
    per_kind: Mutex<HashMap<u16, ByteCount>>,
    names: Mutex<HashMap<u16, &'static str>>,
}

impl Statistics {
    pub(crate) fn record_send(&self, kind: u16, bytes: u64) {
        self.global.add(bytes);
        self.per_kind.lock().entry(kind).or_default().add(bytes);
    }

    pub(crate) fn record_name(&self, kind: u16, name: &'static str) {
        self.names.lock().insert(kind, name);
    }

    /// Total bytes pushed across all kinds
    pub fn global_bytes_sent(&self) -> u64 {
        self.global.bytes_sent()
    }

    /// (bytes, messages) pushed for one kind
    pub fn per_kind(&self, kind: u16) -> (u64, u64) {
        self.per_kind
            .lock()
            .get(&kind)
            .map(|count| (count.bytes_sent(), count.messages_sent()))
            .unwrap_or((0, 0))
    }

    /// Declared message type name for one kind
    pub fn type_name(&self, kind: u16) -> Option<&'static str> {
        self.names.lock().get(&kind).copied()
    }
}
