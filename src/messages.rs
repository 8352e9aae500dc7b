//! Protobuf message schema for the control and telemetry channels
//!
//! All payloads on the wire are protobuf binary, tagged with the 16-bit
//! message kind (see [`crate::wire`]). The structs here carry the `prost`
//! derive directly instead of going through `prost-build`, which keeps the
//! wire encoding identical without a protoc build-time dependency.
//!
//! Field numbers are wire constants shared with the controller peer — do
//! not renumber.

/// Log severities, ordered `None < Fatal < Error < Warn < Info < Debug`.
///
/// Values at or above [`LogLevel::Custom`] bypass the level gate entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LogLevel {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    Custom = 20,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TimeStamp {
    #[prost(int64, tag = "1")]
    pub secs: i64,
    #[prost(int32, tag = "2")]
    pub nsecs: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Vector3 {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Position {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
}

/// Unit quaternion
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Orientation {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, tag = "3")]
    pub z: f64,
    #[prost(double, tag = "4")]
    pub w: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pose {
    #[prost(message, optional, tag = "1")]
    pub position: ::core::option::Option<Position>,
    #[prost(message, optional, tag = "2")]
    pub orientation: ::core::option::Option<Orientation>,
    #[prost(string, tag = "3")]
    pub frame: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Poses {
    #[prost(message, repeated, tag = "1")]
    pub poses: ::prost::alloc::vec::Vec<Pose>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Twist {
    #[prost(message, optional, tag = "1")]
    pub linear: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "2")]
    pub angular: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Acceleration {
    #[prost(message, optional, tag = "1")]
    pub linear: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "2")]
    pub angular: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GoTo {
    #[prost(message, optional, tag = "1")]
    pub waypoint: ::core::option::Option<Pose>,
    #[prost(float, tag = "2")]
    pub max_forward_speed: f32,
    #[prost(float, tag = "3")]
    pub waypoint_max_forward_speed: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JointState {
    #[prost(string, repeated, tag = "1")]
    pub name: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(double, repeated, tag = "2")]
    pub position: ::prost::alloc::vec::Vec<f64>,
    #[prost(double, repeated, tag = "3")]
    pub velocity: ::prost::alloc::vec::Vec<f64>,
    #[prost(double, repeated, tag = "4")]
    pub effort: ::prost::alloc::vec::Vec<f64>,
    #[prost(message, optional, tag = "5")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

/// Commanded joint targets; same layout as [`JointState`] minus the stamp
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JointCommand {
    #[prost(string, repeated, tag = "1")]
    pub name: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(double, repeated, tag = "2")]
    pub position: ::prost::alloc::vec::Vec<f64>,
    #[prost(double, repeated, tag = "3")]
    pub velocity: ::prost::alloc::vec::Vec<f64>,
    #[prost(double, repeated, tag = "4")]
    pub effort: ::prost::alloc::vec::Vec<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleAction {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub state: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleActions {
    #[prost(message, repeated, tag = "1")]
    pub actions: ::prost::alloc::vec::Vec<SimpleAction>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ComplexAction {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub poses: ::prost::alloc::vec::Vec<Pose>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ComplexActions {
    #[prost(message, repeated, tag = "1")]
    pub actions: ::prost::alloc::vec::Vec<ComplexAction>,
}

/// Liveness parameters sent periodically by the controller
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct HeartBeat {
    /// Interval the controller promises between heartbeats, in seconds
    #[prost(float, tag = "1")]
    pub heartbeat_duration: f32,
    /// One-way latency the controller measured, in seconds
    #[prost(float, tag = "2")]
    pub heartbeat_latency: f32,
}

/// Reply to a [`PermissionRequest`], matched by `requestuid`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Permission {
    #[prost(string, tag = "1")]
    pub requestuid: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub granted: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PermissionRequest {
    #[prost(string, tag = "1")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub requestuid: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LogMessage {
    #[prost(enumeration = "LogLevel", tag = "1")]
    pub level: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RobotName {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RobotState {
    #[prost(string, repeated, tag = "1")]
    pub state: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "2")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VideoStream {
    #[prost(string, tag = "1")]
    pub url: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub camera_pose: ::core::option::Option<Pose>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VideoStreams {
    #[prost(message, repeated, tag = "1")]
    pub streams: ::prost::alloc::vec::Vec<VideoStream>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleSensor {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub id: u32,
    #[prost(float, repeated, tag = "3")]
    pub value: ::prost::alloc::vec::Vec<f32>,
    #[prost(message, optional, tag = "4")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimpleSensors {
    #[prost(message, repeated, tag = "1")]
    pub sensors: ::prost::alloc::vec::Vec<SimpleSensor>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WrenchState {
    #[prost(message, optional, tag = "1")]
    pub force: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "2")]
    pub torque: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapInformation {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub id: u32,
}

/// Advertises which maps can be pulled via `MAP_REQUEST`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapsDefinition {
    #[prost(message, repeated, tag = "1")]
    pub maps: ::prost::alloc::vec::Vec<MapInformation>,
}

/// Container for a map payload of any serialized type
///
/// `type_name` names the message serialized into `data` so the peer can
/// decode it without out-of-band knowledge.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Map {
    #[prost(bytes = "vec", tag = "1")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "2")]
    pub type_name: ::prost::alloc::string::String,
}

/// Occupancy grid, requestable through the map buffer
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GridMap {
    #[prost(uint32, tag = "1")]
    pub width: u32,
    #[prost(uint32, tag = "2")]
    pub height: u32,
    #[prost(float, tag = "3")]
    pub resolution: f32,
    #[prost(message, optional, tag = "4")]
    pub origin: ::core::option::Option<Pose>,
    #[prost(bytes = "vec", tag = "5")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transform {
    #[prost(message, optional, tag = "1")]
    pub transform: ::core::option::Option<Pose>,
    #[prost(string, tag = "2")]
    pub from: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub to: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transforms {
    #[prost(message, repeated, tag = "1")]
    pub transforms: ::prost::alloc::vec::Vec<Transform>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PointCloud {
    #[prost(string, tag = "1")]
    pub frame: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub origin: ::core::option::Option<Pose>,
    #[prost(message, repeated, tag = "3")]
    pub points: ::prost::alloc::vec::Vec<Position>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Imu {
    #[prost(message, optional, tag = "1")]
    pub acceleration: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "2")]
    pub gyro: ::core::option::Option<Vector3>,
    #[prost(message, optional, tag = "3")]
    pub orientation: ::core::option::Option<Orientation>,
    #[prost(message, optional, tag = "4")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContactPoints {
    #[prost(message, repeated, tag = "1")]
    pub contacts: ::prost::alloc::vec::Vec<Position>,
    #[prost(message, optional, tag = "2")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CameraInformation {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub width: u32,
    #[prost(uint32, tag = "3")]
    pub height: u32,
    #[prost(double, tag = "4")]
    pub focal_x: f64,
    #[prost(double, tag = "5")]
    pub focal_y: f64,
    #[prost(string, tag = "6")]
    pub frame: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Image {
    #[prost(uint32, tag = "1")]
    pub width: u32,
    #[prost(uint32, tag = "2")]
    pub height: u32,
    #[prost(string, tag = "3")]
    pub encoding: ::prost::alloc::string::String,
    #[prost(uint32, tag = "4")]
    pub step: u32,
    #[prost(bytes = "vec", tag = "5")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "6")]
    pub frame: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "7")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImageLayers {
    #[prost(string, tag = "1")]
    pub frame: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub layers: ::prost::alloc::vec::Vec<Image>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Odometry {
    #[prost(message, optional, tag = "1")]
    pub pose: ::core::option::Option<Pose>,
    #[prost(message, optional, tag = "2")]
    pub twist: ::core::option::Option<Twist>,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::core::option::Option<TimeStamp>,
}

/// Frames the controller may command directly (e.g. end effectors)
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllableFrames {
    #[prost(string, repeated, tag = "1")]
    pub frames: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct File {
    #[prost(string, tag = "1")]
    pub identifier: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub path: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "3")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

/// Reply payload for `FILE_REQUEST`
///
/// On a miss or filesystem error the file list is empty and `identifier`
/// carries the diagnostic text.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Folder {
    #[prost(string, tag = "1")]
    pub identifier: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub compressed: bool,
    #[prost(message, repeated, tag = "3")]
    pub files: ::prost::alloc::vec::Vec<File>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileRequest {
    #[prost(string, tag = "1")]
    pub identifier: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub compressed: bool,
}

/// Advertises requestable files and folders
///
/// `files` and `is_folder` are parallel arrays; `File::data` is unused
/// here, only `identifier` and `path` are filled.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDefinition {
    #[prost(message, repeated, tag = "1")]
    pub files: ::prost::alloc::vec::Vec<File>,
    #[prost(bool, repeated, tag = "2")]
    pub is_folder: ::prost::alloc::vec::Vec<bool>,
}
