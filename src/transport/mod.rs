//! Transport layer for message-oriented I/O
//!
//! The engine is transport-agnostic: anything that can move framed blobs
//! between exactly two peers while preserving message boundaries works.
//! Two implementations ship with the crate: an in-memory loopback pair
//! for tests and a length-prefixed TCP transport.

use crate::error::Result;

mod loopback;
pub use loopback::LoopbackTransport;

mod tcp;
pub use tcp::TcpTransport;

/// Whether a receive call may suspend until a message arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveMode {
    Blocking,
    NonBlocking,
}

/// Message-boundary-preserving bidirectional transport
///
/// Implementations must be safe for concurrent `send` from multiple
/// threads. `receive` is only ever driven from one thread at a time by
/// the engine's update loop.
pub trait Transport: Send + Sync {
    /// Send one message, returns the number of payload bytes sent
    fn send(&self, frame: &[u8]) -> Result<usize>;

    /// Receive one complete message
    ///
    /// Returns `Ok(None)` when no message is pending and `mode` is
    /// [`ReceiveMode::NonBlocking`].
    fn receive(&self, mode: ReceiveMode) -> Result<Option<Vec<u8>>>;
}
