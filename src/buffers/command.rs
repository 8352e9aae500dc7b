//! Command slots and the type-erased registry capability
//!
//! Each inbound command kind is bound to one slot. Dispatch goes through
//! the [`CommandSink`] capability (decode + store + notify); the slot's
//! storage is a tagged variant, either single-latest or ring.

use super::latest::LatestBuffer;
use crossbeam_queue::ArrayQueue;
use parking_lot::Mutex;
use prost::Message;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback run after a successful slot write
pub type CommandCallback = Arc<dyn Fn() + Send + Sync>;

enum Storage<T: Message + Default + Clone> {
    /// Most recent value plus an unread-write flag
    Latest {
        value: LatestBuffer<T>,
        fresh: AtomicBool,
    },
    /// Bounded FIFO; overflow evicts the oldest entry
    Ring(ArrayQueue<T>),
}

/// Per-kind inbound command buffer
///
/// `write` decodes wire payloads into the slot and runs the registered
/// callbacks; `read` hands values to robot code. The fresh flag on a
/// latest slot is true iff a write happened since the previous read.
pub struct CommandBuffer<T: Message + Default + Clone> {
    storage: Storage<T>,
    callbacks: Mutex<Vec<CommandCallback>>,
}

impl<T: Message + Default + Clone> CommandBuffer<T> {
    /// Single-latest slot
    pub fn latest() -> Self {
        Self {
            storage: Storage::Latest {
                value: LatestBuffer::new(),
                fresh: AtomicBool::new(false),
            },
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Ring slot holding up to `capacity` queued commands
    pub fn ring(capacity: usize) -> Self {
        Self {
            storage: Storage::Ring(ArrayQueue::new(capacity)),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Read the next unread command into `out`
    ///
    /// Returns true iff this read consumed a value not read before. A
    /// latest slot keeps handing out the stored value on later reads but
    /// reports them stale; a ring slot pops the head.
    pub fn read(&self, out: &mut T) -> bool {
        match &self.storage {
            Storage::Latest { value, fresh } => {
                let was_fresh = fresh.swap(false, Ordering::AcqRel);
                *out = value.get();
                was_fresh
            }
            Storage::Ring(queue) => match queue.pop() {
                Some(value) => {
                    *out = value;
                    true
                }
                None => false,
            },
        }
    }

    /// Store a value directly (robot-side injection, e.g. for tests)
    pub fn write_value(&self, value: T) {
        match &self.storage {
            Storage::Latest { value: slot, fresh } => {
                slot.set(value);
                fresh.store(true, Ordering::Release);
            }
            Storage::Ring(queue) => {
                queue.force_push(value);
            }
        }
        self.notify();
    }

    /// Decode a wire payload into the slot
    ///
    /// Returns false on decode failure; the slot contents and any prior
    /// fresh flag are left untouched in that case.
    fn write_bytes(&self, payload: &[u8]) -> bool {
        match &self.storage {
            Storage::Latest { value, fresh } => {
                if value.set_from_bytes(payload).is_err() {
                    return false;
                }
                fresh.store(true, Ordering::Release);
            }
            Storage::Ring(queue) => {
                let value = match T::decode(payload) {
                    Ok(value) => value,
                    Err(_) => return false,
                };
                queue.force_push(value);
            }
        }
        self.notify();
        true
    }

    fn notify(&self) {
        let callbacks = self.callbacks.lock().clone();
        for callback in callbacks {
            callback();
        }
    }
}

/// Type-erased slot capability used by the kind registry
///
/// The registry maps kind-id → sink; the kind-id itself is the dispatch
/// discriminator, the sink only contributes decode-and-store.
pub trait CommandSink: Send + Sync {
    /// Decode and store an inbound payload, false on decode failure
    fn write(&self, payload: &[u8]) -> bool;

    /// Register a callback run after every successful write
    fn add_callback(&self, callback: CommandCallback);
}

impl<T: Message + Default + Clone> CommandSink for CommandBuffer<T> {
    fn write(&self, payload: &[u8]) -> bool {
        self.write_bytes(payload)
    }

    fn add_callback(&self, callback: CommandCallback) {
        self.callbacks.lock().push(callback);
    }
}
