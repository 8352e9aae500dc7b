//! Wire framing and message kinds
//!
//! # Frame layout
//!
//! Every blob on either transport starts with a 16-bit message-kind tag:
//!
//! ```text
//! ┌────────────────────┬──────────────────────────┐
//! │ Kind (2 bytes)     │ Payload (variable)       │
//! │ Little-endian u16  │ Protobuf binary          │
//! └────────────────────┴──────────────────────────┘
//! ```
//!
//! There is no length prefix here — the transport preserves message
//! boundaries. The kind tag is little-endian on the wire; big-endian
//! hosts byteswap.
//!
//! Kind ids are stable wire constants. The control and telemetry
//! enumerations are disjoint 16-bit spaces sharing the reserved sentinel
//! `0` (`NO_DATA`).

use crate::error::{Error, Result};

/// Size of the kind tag prepended to every payload
pub const KIND_TAG_SIZE: usize = 2;

/// Reserved sentinel kind, also used as the "unparseable / unknown" reply
pub const NO_DATA: u16 = 0;

/// Command and pull-request kinds (controller → robot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ControlKind {
    NoData = 0,
    TargetPoseCommand = 1,
    TwistCommand = 2,
    GoToCommand = 3,
    SimpleActionsCommand = 4,
    ComplexActionCommand = 5,
    JointsCommand = 6,
    Heartbeat = 7,
    Permission = 8,
    RobotTrajectoryCommand = 9,
    LogLevelSelect = 10,
    MapRequest = 11,
    TelemetryRequest = 12,
    FileRequest = 13,
}

impl ControlKind {
    /// Map a raw wire tag to a known control kind
    pub fn from_u16(raw: u16) -> Option<Self> {
        match raw {
            0 => Some(Self::NoData),
            1 => Some(Self::TargetPoseCommand),
            2 => Some(Self::TwistCommand),
            3 => Some(Self::GoToCommand),
            4 => Some(Self::SimpleActionsCommand),
            5 => Some(Self::ComplexActionCommand),
            6 => Some(Self::JointsCommand),
            7 => Some(Self::Heartbeat),
            8 => Some(Self::Permission),
            9 => Some(Self::RobotTrajectoryCommand),
            10 => Some(Self::LogLevelSelect),
            11 => Some(Self::MapRequest),
            12 => Some(Self::TelemetryRequest),
            13 => Some(Self::FileRequest),
            _ => None,
        }
    }
}

impl From<ControlKind> for u16 {
    fn from(kind: ControlKind) -> u16 {
        kind as u16
    }
}

/// Pushable state kinds (robot → controller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TelemetryKind {
    NoTelemetryData = 0,
    CurrentPose = 1,
    JointState = 2,
    ControllableJoints = 3,
    SimpleActions = 4,
    ComplexActions = 5,
    RobotName = 6,
    RobotState = 7,
    LogMessage = 8,
    VideoStreams = 9,
    SimpleSensorDefinition = 10,
    SimpleSensorValue = 11,
    WrenchState = 12,
    MapsDefinition = 13,
    Map = 14,
    Poses = 15,
    Transforms = 16,
    PermissionRequest = 17,
    PointCloud = 18,
    ImuValues = 19,
    ContactPoints = 20,
    CurrentTwist = 21,
    CurrentAcceleration = 22,
    CameraInformation = 23,
    Image = 24,
    ImageLayers = 25,
    Odometry = 26,
    ControllableFrames = 27,
    FileDefinition = 28,
}

impl From<TelemetryKind> for u16 {
    fn from(kind: TelemetryKind) -> u16 {
        kind as u16
    }
}

/// Well-known map ids for the map buffer
pub const POINTCLOUD_MAP: u32 = 0;
pub const GRID_MAP: u32 = 1;

/// Prepend the 2-byte kind tag to a payload
pub fn tag(kind: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(KIND_TAG_SIZE + payload.len());
    frame.extend_from_slice(&kind.to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// A 2-byte frame carrying a kind and no payload (used for ACK replies)
pub fn tag_only(kind: u16) -> Vec<u8> {
    kind.to_le_bytes().to_vec()
}

/// Split a frame into its kind tag and payload
///
/// Fails with [`Error::MalformedFrame`] when the blob is shorter than the
/// kind tag itself.
pub fn untag(frame: &[u8]) -> Result<(u16, &[u8])> {
    if frame.len() < KIND_TAG_SIZE {
        return Err(Error::MalformedFrame(frame.len()));
    }
    let kind = u16::from_le_bytes([frame[0], frame[1]]);
    Ok((kind, &frame[KIND_TAG_SIZE..]))
}

/// Read a little-endian u16 from the head of a payload
///
/// Used for the sub-kind in `TELEMETRY_REQUEST`, `MAP_REQUEST` and
/// `LOG_LEVEL_SELECT` payloads.
pub fn read_u16(payload: &[u8]) -> Option<u16> {
    if payload.len() < 2 {
        return None;
    }
    Some(u16::from_le_bytes([payload[0], payload[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_untag_roundtrip() {
        let frame = tag(ControlKind::TwistCommand.into(), &[0xAA, 0xBB, 0xCC]);
        assert_eq!(frame, vec![0x02, 0x00, 0xAA, 0xBB, 0xCC]);

        let (kind, payload) = untag(&frame).unwrap();
        assert_eq!(kind, 2);
        assert_eq!(payload, &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn untag_rejects_short_frames() {
        assert!(untag(&[]).is_err());
        assert!(untag(&[0x01]).is_err());
        // exactly the tag, empty payload
        let (kind, payload) = untag(&[0x0C, 0x00]).unwrap();
        assert_eq!(kind, ControlKind::TelemetryRequest as u16);
        assert!(payload.is_empty());
    }

    #[test]
    fn kind_tag_is_little_endian() {
        let frame = tag_only(0x0102);
        assert_eq!(frame, vec![0x02, 0x01]);
    }

    #[test]
    fn stable_wire_ids() {
        // these ids are wire constants shared with the controller peer
        assert_eq!(ControlKind::TwistCommand as u16, 2);
        assert_eq!(ControlKind::Heartbeat as u16, 7);
        assert_eq!(ControlKind::TelemetryRequest as u16, 12);
        assert_eq!(TelemetryKind::CurrentPose as u16, 1);
        assert_eq!(TelemetryKind::FileDefinition as u16, 28);
    }

    #[test]
    fn unknown_kind_maps_to_none() {
        assert!(ControlKind::from_u16(0xFFFF).is_none());
        assert_eq!(ControlKind::from_u16(13), Some(ControlKind::FileRequest));
    }

    #[test]
    fn read_u16_handles_short_payloads() {
        assert_eq!(read_u16(&[]), None);
        assert_eq!(read_u16(&[0x01]), None);
        assert_eq!(read_u16(&[0x01, 0x00, 0xFF]), Some(1));
    }
}
