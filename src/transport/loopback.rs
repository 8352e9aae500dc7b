//! In-memory loopback transport for testing
//!
//! A [`LoopbackTransport::pair`] connects two endpoints through shared
//! message queues, preserving message boundaries like a real transport.

use super::{ReceiveMode, Transport};
use crate::error::Result;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Default)]
struct Channel {
    queue: Mutex<VecDeque<Vec<u8>>>,
    ready: Condvar,
}

impl Channel {
    fn push(&self, frame: Vec<u8>) {
        self.queue.lock().push_back(frame);
        self.ready.notify_one();
    }

    fn pop(&self, mode: ReceiveMode) -> Option<Vec<u8>> {
        let mut queue = self.queue.lock();
        match mode {
            ReceiveMode::NonBlocking => queue.pop_front(),
            ReceiveMode::Blocking => loop {
                if let Some(frame) = queue.pop_front() {
                    return Some(frame);
                }
                self.ready.wait(&mut queue);
            },
        }
    }
}

/// One endpoint of an in-memory transport pair
#[derive(Clone)]
pub struct LoopbackTransport {
    incoming: Arc<Channel>,
    outgoing: Arc<Channel>,
}

impl LoopbackTransport {
    /// Create two connected endpoints
    ///
    /// Everything sent on one endpoint is received on the other, in order.
    pub fn pair() -> (Self, Self) {
        let a = Arc::new(Channel::default());
        let b = Arc::new(Channel::default());
        (
            Self {
                incoming: Arc::clone(&a),
                outgoing: Arc::clone(&b),
            },
            Self {
                incoming: b,
                outgoing: a,
            },
        )
    }

    /// Number of messages waiting to be received on this endpoint
    pub fn pending(&self) -> usize {
        self.incoming.queue.lock().len()
    }
}

impl Transport for LoopbackTransport {
    fn send(&self, frame: &[u8]) -> Result<usize> {
        self.outgoing.push(frame.to_vec());
        Ok(frame.len())
    }

    fn receive(&self, mode: ReceiveMode) -> Result<Option<Vec<u8>>> {
        Ok(self.incoming.pop(mode))
    }
}
