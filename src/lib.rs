//! Niyantra - controlled-side engine for remote robot control
//!
//! This library runs on a robot and talks to one remote controller over
//! two message transports: a bidirectional command channel (commands in,
//! replies out) and a push-only telemetry channel. The
//! [`ControlledRobot`] engine multiplexes both over a 16-bit-tagged wire
//! protocol, buffers the latest value of every telemetry kind for pull
//! requests, queues inbound commands in typed slots, matches permission
//! requests to their replies, serves file requests, and supervises the
//! controller's heartbeat.
//!
//! ## Features
//!
//! - `compression`: DEFLATE-compressed file request payloads (default)
//! - `statistics`: per-kind byte accounting for outbound telemetry

pub mod buffers;
#[cfg(feature = "compression")]
pub mod compress;
pub mod config;
pub mod error;
pub mod messages;
pub mod robot;
pub mod transport;
pub mod wire;

// Re-export commonly used types
pub use config::RobotConfig;
pub use error::{Error, Result};
pub use robot::{ControlledRobot, FileEntry, OutcomeHandle};
