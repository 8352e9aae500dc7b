//! Telemetry and map registries backing pull requests
//!
//! Every telemetry push keeps the serialized payload in a per-kind slot,
//! so a later `TELEMETRY_REQUEST` can answer with the newest state even
//! if the controller missed the push. Maps are never pushed at all; they
//! live here until a `MAP_REQUEST` pulls them.

use crate::wire;
use parking_lot::Mutex;
use prost::Message;
use std::collections::HashMap;

struct TelemetrySlot {
    payload: Vec<u8>,
    type_name: &'static str,
}

/// Registry of per-kind latest serialized telemetry
pub struct TelemetryBuffer {
    slots: Mutex<HashMap<u16, TelemetrySlot>>,
}

impl TelemetryBuffer {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Reserve a slot for `kind`, recording the message type carried
    pub fn register<T: Message>(&self, kind: u16) {
        let mut slots = self.slots.lock();
        if slots
            .insert(
                kind,
                TelemetrySlot {
                    payload: Vec::new(),
                    type_name: std::any::type_name::<T>(),
                },
            )
            .is_some()
        {
            log::warn!("telemetry kind {} registered twice", kind);
        }
    }

    /// Store the serialized payload of the latest push
    ///
    /// Returns false for unregistered kinds; the payload is dropped.
    pub fn store(&self, kind: u16, payload: Vec<u8>) -> bool {
        let mut slots = self.slots.lock();
        match slots.get_mut(&kind) {
            Some(slot) => {
                slot.payload = payload;
                true
            }
            None => {
                log::warn!("telemetry kind {} not registered, dropping push", kind);
                false
            }
        }
    }

    /// The framed serialization of the latest push for `kind`
    ///
    /// Unregistered or never-pushed kinds answer with an empty payload
    /// behind the kind tag, so the reply is never withheld.
    pub fn peek_serialized(&self, kind: u16) -> Vec<u8> {
        let slots = self.slots.lock();
        match slots.get(&kind) {
            Some(slot) => wire::tag(kind, &slot.payload),
            None => wire::tag_only(kind),
        }
    }

    /// Declared message type for `kind`, if registered
    pub fn type_name(&self, kind: u16) -> Option<&'static str> {
        self.slots.lock().get(&kind).map(|slot| slot.type_name)
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Latest serialized map payload per map id
pub struct MapBuffer {
    maps: Mutex<HashMap<u32, Vec<u8>>>,
}

impl MapBuffer {
    pub fn new() -> Self {
        Self {
            maps: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the stored payload for `map_id`
    pub fn store(&self, map_id: u32, payload: Vec<u8>) {
        self.maps.lock().insert(map_id, payload);
    }

    /// Latest payload for `map_id`, empty when never set
    pub fn peek(&self, map_id: u32) -> Vec<u8> {
        self.maps.lock().get(&map_id).cloned().unwrap_or_default()
    }
}

impl Default for MapBuffer {
    fn default() -> Self {
        Self::new()
    }
}
