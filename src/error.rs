//! Error types for niyantra
//!
//! # Error Recovery Strategies
//!
//! The engine itself never fails fatally: protocol-level problems are
//! answered on the wire (a `NO_DATA` reply or an empty `Folder`) and
//! logged, and public setters report failure as a zero byte count. The
//! variants below surface at the transport seam and in configuration
//! loading.
//!
//! ## Transient Errors (Retry Recommended)
//!
//! - **`Io`**: socket-level error. Usually retryable after a brief delay.
//!
//! ## Protocol Errors (Log and Continue)
//!
//! - **`Decode`**: an inbound payload failed to parse. The message is
//!   dropped and answered with `NO_DATA`; the connection remains usable.
//! - **`MalformedFrame`**: a transport blob shorter than the 2-byte kind
//!   tag. Answered with `NO_DATA`.
//! - **`MessageTooLarge`**: a framed message exceeded the transport's
//!   sanity cap. The peer is misbehaving or out of sync.
//!
//! ## Connection Errors (Reconnect)
//!
//! - **`Disconnected`**: the peer closed the connection. The transport
//!   must be re-established before further use.
//!
//! ## Configuration Errors (Fix and Restart)
//!
//! - **`Config`**: the configuration file is invalid. Fix and reload.

use thiserror::Error;

/// Errors that can occur in niyantra
///
/// See module-level documentation for recovery strategies.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("frame too short: {0} bytes")]
    MalformedFrame(usize),

    #[error("message too large: {0} bytes")]
    MessageTooLarge(usize),

    #[error("transport disconnected")]
    Disconnected,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
