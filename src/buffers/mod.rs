//! Typed per-kind buffers
//!
//! Three storage shapes back the protocol engine:
//!
//! - [`LatestBuffer`]: a lock-guarded latest-value cell caching both the
//!   decoded message and its serialized form
//! - [`CommandBuffer`]: a per-kind command slot, either single-latest with
//!   a fresh flag or a bounded ring that drops the oldest on overflow
//! - [`TelemetryBuffer`] / [`MapBuffer`]: registries of serialized
//!   latest-value slots queried by pull requests
//!
//! All operations are safe under concurrent callers, and none suspends
//! for I/O while holding a buffer's exclusion.

mod command;
mod latest;
mod telemetry;

pub use command::{CommandBuffer, CommandCallback, CommandSink};
pub use latest::LatestBuffer;
pub use telemetry::{MapBuffer, TelemetryBuffer};
