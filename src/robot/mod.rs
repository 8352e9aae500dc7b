//! The controlled-robot protocol engine
//!
//! [`ControlledRobot`] sits on the robot and speaks to one remote
//! controller over two transports: a bidirectional command channel it
//! drains and answers in [`ControlledRobot::update`], and a push-only
//! telemetry channel fed by the setter methods.
//!
//! # Threading
//!
//! One driver thread calls `update()` periodically; every setter and
//! getter may be called from any other thread concurrently. The engine
//! spawns no threads of its own and `update()` only performs bounded,
//! non-blocking work.
//!
//! ```no_run
//! use niyantra::messages::{Pose, Twist};
//! use niyantra::transport::TcpTransport;
//! use niyantra::ControlledRobot;
//! use std::sync::Arc;
//!
//! # fn main() -> niyantra::Result<()> {
//! let commands = Arc::new(TcpTransport::connect("192.168.1.20:7001")?);
//! let telemetry = Arc::new(TcpTransport::connect("192.168.1.20:7002")?);
//! let robot = ControlledRobot::new(commands, telemetry);
//!
//! loop {
//!     robot.update();
//!
//!     let mut twist = Twist::default();
//!     if robot.get_twist_command(&mut twist) {
//!         // feed the motion controller
//!     }
//!
//!     robot.set_current_pose(&Pose::default());
//!     std::thread::sleep(std::time::Duration::from_millis(10));
//! }
//! # }
//! ```

mod files;
mod heartbeat;
mod permissions;
mod requests;
#[cfg(feature = "statistics")]
mod statistics;

pub use files::FileEntry;
pub use permissions::OutcomeHandle;
#[cfg(feature = "statistics")]
pub use statistics::{ByteCount, Statistics};

use crate::buffers::{CommandBuffer, CommandSink, MapBuffer, TelemetryBuffer};
use crate::config::RobotConfig;
use crate::messages::{
    Acceleration, CameraInformation, ComplexAction, ComplexActions, ContactPoints,
    ControllableFrames, FileDefinition, GoTo, GridMap, HeartBeat, Image, ImageLayers, Imu,
    JointCommand, JointState, LogLevel, LogMessage, Map, MapsDefinition, Odometry,
    PermissionRequest, PointCloud, Pose, Poses, RobotName, RobotState, SimpleAction,
    SimpleActions, SimpleSensor, SimpleSensors, TimeStamp, Transforms, Twist, VideoStreams,
    WrenchState,
};
use crate::transport::{ReceiveMode, Transport};
use crate::wire::{self, ControlKind, TelemetryKind, KIND_TAG_SIZE};
use heartbeat::Timer;
use parking_lot::Mutex;
use permissions::PendingPermissions;
use prost::Message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

type KindCallback = Arc<dyn Fn(u16) + Send + Sync>;
type ExpiryCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Controlled-side core of the remote control protocol
pub struct ControlledRobot {
    command_transport: Arc<dyn Transport>,
    telemetry_transport: Option<Arc<dyn Transport>>,

    // typed command slots, also reachable through `command_sinks`
    pose_command: Arc<CommandBuffer<Pose>>,
    twist_command: Arc<CommandBuffer<Twist>>,
    goto_command: Arc<CommandBuffer<GoTo>>,
    joints_command: Arc<CommandBuffer<JointCommand>>,
    simple_action_command: Arc<CommandBuffer<SimpleAction>>,
    complex_action_command: Arc<CommandBuffer<ComplexAction>>,
    robot_trajectory_command: Arc<CommandBuffer<Poses>>,
    heartbeat_command: Arc<CommandBuffer<HeartBeat>>,

    command_sinks: HashMap<u16, Arc<dyn CommandSink>>,
    command_callbacks: Mutex<Vec<KindCallback>>,

    telemetry: TelemetryBuffer,
    maps: MapBuffer,
    files: Mutex<Vec<FileEntry>>,
    pending_permissions: PendingPermissions,

    heartbeat_timer: Mutex<Timer>,
    heartbeat_allowed_latency: Mutex<f32>,
    heartbeat_expired_callback: Mutex<Option<ExpiryCallback>>,
    connected: AtomicBool,
    log_level: AtomicU32,

    #[cfg(feature = "statistics")]
    statistics: statistics::Statistics,
}

impl ControlledRobot {
    /// Create an engine with default configuration
    pub fn new(
        command_transport: Arc<dyn Transport>,
        telemetry_transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_config(
            command_transport,
            Some(telemetry_transport),
            RobotConfig::default(),
        )
    }

    /// Create an engine with explicit configuration
    ///
    /// `telemetry_transport` may be `None` for a command-only setup; all
    /// telemetry setters then report 0 bytes sent.
    pub fn with_config(
        command_transport: Arc<dyn Transport>,
        telemetry_transport: Option<Arc<dyn Transport>>,
        config: RobotConfig,
    ) -> Self {
        let ring_capacity = config.command_ring_capacity.max(1);

        let pose_command = Arc::new(CommandBuffer::<Pose>::latest());
        let twist_command = Arc::new(CommandBuffer::<Twist>::latest());
        let goto_command = Arc::new(CommandBuffer::<GoTo>::latest());
        let joints_command = Arc::new(CommandBuffer::<JointCommand>::latest());
        let simple_action_command = Arc::new(CommandBuffer::<SimpleAction>::ring(ring_capacity));
        let complex_action_command = Arc::new(CommandBuffer::<ComplexAction>::ring(ring_capacity));
        let robot_trajectory_command = Arc::new(CommandBuffer::<Poses>::latest());
        let heartbeat_command = Arc::new(CommandBuffer::<HeartBeat>::latest());

        let mut command_sinks: HashMap<u16, Arc<dyn CommandSink>> = HashMap::new();
        command_sinks.insert(
            ControlKind::TargetPoseCommand as u16,
            Arc::clone(&pose_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::TwistCommand as u16,
            Arc::clone(&twist_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::GoToCommand as u16,
            Arc::clone(&goto_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::JointsCommand as u16,
            Arc::clone(&joints_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::SimpleActionsCommand as u16,
            Arc::clone(&simple_action_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::ComplexActionCommand as u16,
            Arc::clone(&complex_action_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::RobotTrajectoryCommand as u16,
            Arc::clone(&robot_trajectory_command) as Arc<dyn CommandSink>,
        );
        command_sinks.insert(
            ControlKind::Heartbeat as u16,
            Arc::clone(&heartbeat_command) as Arc<dyn CommandSink>,
        );

        let files = config
            .files
            .iter()
            .map(|entry| FileEntry {
                identifier: entry.identifier.clone(),
                path: entry.path.clone(),
                is_folder: entry.folder,
            })
            .collect();

        let robot = Self {
            command_transport,
            telemetry_transport,
            pose_command,
            twist_command,
            goto_command,
            joints_command,
            simple_action_command,
            complex_action_command,
            robot_trajectory_command,
            heartbeat_command,
            command_sinks,
            command_callbacks: Mutex::new(Vec::new()),
            telemetry: TelemetryBuffer::new(),
            maps: MapBuffer::new(),
            files: Mutex::new(files),
            pending_permissions: PendingPermissions::new(),
            heartbeat_timer: Mutex::new(Timer::new()),
            heartbeat_allowed_latency: Mutex::new(config.heartbeat_allowed_latency),
            heartbeat_expired_callback: Mutex::new(None),
            connected: AtomicBool::new(false),
            log_level: AtomicU32::new(config.log_level),
            #[cfg(feature = "statistics")]
            statistics: statistics::Statistics::default(),
        };

        robot.register_telemetry::<Pose>(TelemetryKind::CurrentPose);
        robot.register_telemetry::<JointState>(TelemetryKind::JointState);
        robot.register_telemetry::<JointState>(TelemetryKind::ControllableJoints);
        robot.register_telemetry::<SimpleActions>(TelemetryKind::SimpleActions);
        robot.register_telemetry::<ComplexActions>(TelemetryKind::ComplexActions);
        robot.register_telemetry::<RobotName>(TelemetryKind::RobotName);
        robot.register_telemetry::<RobotState>(TelemetryKind::RobotState);
        robot.register_telemetry::<LogMessage>(TelemetryKind::LogMessage);
        robot.register_telemetry::<VideoStreams>(TelemetryKind::VideoStreams);
        robot.register_telemetry::<SimpleSensors>(TelemetryKind::SimpleSensorDefinition);
        robot.register_telemetry::<SimpleSensor>(TelemetryKind::SimpleSensorValue);
        robot.register_telemetry::<WrenchState>(TelemetryKind::WrenchState);
        robot.register_telemetry::<MapsDefinition>(TelemetryKind::MapsDefinition);
        robot.register_telemetry::<Map>(TelemetryKind::Map);
        robot.register_telemetry::<Poses>(TelemetryKind::Poses);
        robot.register_telemetry::<Transforms>(TelemetryKind::Transforms);
        robot.register_telemetry::<PermissionRequest>(TelemetryKind::PermissionRequest);
        robot.register_telemetry::<PointCloud>(TelemetryKind::PointCloud);
        robot.register_telemetry::<Imu>(TelemetryKind::ImuValues);
        robot.register_telemetry::<ContactPoints>(TelemetryKind::ContactPoints);
        robot.register_telemetry::<Twist>(TelemetryKind::CurrentTwist);
        robot.register_telemetry::<Acceleration>(TelemetryKind::CurrentAcceleration);
        robot.register_telemetry::<CameraInformation>(TelemetryKind::CameraInformation);
        robot.register_telemetry::<Image>(TelemetryKind::Image);
        robot.register_telemetry::<ImageLayers>(TelemetryKind::ImageLayers);
        robot.register_telemetry::<Odometry>(TelemetryKind::Odometry);
        robot.register_telemetry::<ControllableFrames>(TelemetryKind::ControllableFrames);
        robot.register_telemetry::<FileDefinition>(TelemetryKind::FileDefinition);

        robot
    }

    // === Update loop ===

    /// Drain the command transport, then supervise the heartbeat
    ///
    /// Called periodically by the embedder's driver thread. Every inbound
    /// message is answered before the next is read; any inbound traffic
    /// marks the connection alive.
    pub fn update(&self) {
        while self.receive_request() {
            self.connected.store(true, Ordering::Release);
        }

        let mut heartbeat = HeartBeat::default();
        if self.heartbeat_command.read(&mut heartbeat) {
            self.connected.store(true, Ordering::Release);
            let latency = *self.heartbeat_allowed_latency.lock();
            self.heartbeat_timer
                .lock()
                .start(heartbeat.heartbeat_duration + latency);
        }

        let (expired, elapsed) = {
            let mut timer = self.heartbeat_timer.lock();
            (timer.check_expired(), timer.elapsed())
        };
        if expired {
            self.connected.store(false, Ordering::Release);
            log::warn!("heartbeat expired after {:.3}s", elapsed);
            let callback = self.heartbeat_expired_callback.lock().clone();
            if let Some(callback) = callback {
                callback(elapsed);
            }
        }
    }

    /// Receive and answer one command-transport message
    ///
    /// Returns false when the transport has no pending data.
    fn receive_request(&self) -> bool {
        match self.command_transport.receive(ReceiveMode::NonBlocking) {
            Ok(Some(frame)) => {
                self.evaluate_request(&frame);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::error!("command receive failed: {}", e);
                false
            }
        }
    }

    /// True while heartbeats (or any commands) keep arriving in time
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Configure the heartbeat expiry watchdog
    ///
    /// `allowed_latency` (seconds) is added to the duration announced by
    /// the controller. The callback runs on the update thread and gets
    /// the elapsed seconds since the last heartbeat; keep it short.
    pub fn setup_heartbeat_callback<F>(&self, allowed_latency: f32, callback: F)
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        *self.heartbeat_allowed_latency.lock() = allowed_latency;
        *self.heartbeat_expired_callback.lock() = Some(Arc::new(callback));
    }

    // === Command callbacks and registration ===

    /// Run `callback` with the numeric kind of every command received
    pub fn add_command_received_callback<F>(&self, callback: F)
    where
        F: Fn(u16) + Send + Sync + 'static,
    {
        self.command_callbacks.lock().push(Arc::new(callback));
    }

    /// Run `callback` whenever a command of `kind` is received
    ///
    /// Returns false when no slot is registered for `kind`.
    pub fn add_command_kind_callback<F>(&self, kind: u16, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        match self.command_sinks.get(&kind) {
            Some(sink) => {
                sink.add_callback(Arc::new(callback));
                true
            }
            None => {
                log::warn!("no command slot registered for kind {}", kind);
                false
            }
        }
    }

    fn notify_command_callbacks(&self, kind: u16) {
        let callbacks = self.command_callbacks.lock().clone();
        for callback in callbacks {
            callback(kind);
        }
    }

    /// Reserve a telemetry slot for a custom kind
    ///
    /// Kinds above [`TelemetryKind::FileDefinition`] are free for
    /// application use; push with [`ControlledRobot::send_telemetry`].
    pub fn register_telemetry_kind<T: Message>(&self, kind: u16) {
        self.telemetry.register::<T>(kind);
        #[cfg(feature = "statistics")]
        self.statistics.record_name(kind, std::any::type_name::<T>());
    }

    /// Bind a custom command kind to a slot
    ///
    /// Must happen before the update loop starts; the built-in kinds are
    /// bound at construction.
    pub fn register_command_kind(&mut self, kind: u16, sink: Arc<dyn CommandSink>) {
        if self.command_sinks.insert(kind, sink).is_some() {
            log::warn!("command kind {} was already registered, replacing", kind);
        }
    }

    fn register_telemetry<T: Message>(&self, kind: TelemetryKind) {
        self.register_telemetry_kind::<T>(kind as u16);
    }

    // === Telemetry push ===

    /// Serialize, buffer and push one telemetry message
    ///
    /// The stored serialization also answers later `TELEMETRY_REQUEST`
    /// pulls. Returns the payload bytes sent, 0 when no telemetry
    /// transport is configured or the send failed.
    pub fn send_telemetry<T: Message>(&self, data: &T, kind: u16) -> usize {
        self.push_telemetry(data, kind, false)
    }

    fn push_telemetry<T: Message>(&self, data: &T, kind: u16, request_only: bool) -> usize {
        let Some(transport) = &self.telemetry_transport else {
            log::error!("telemetry transport not configured, dropping kind {}", kind);
            return 0;
        };
        let payload = data.encode_to_vec();
        let frame = wire::tag(kind, &payload);
        self.telemetry.store(kind, payload);

        if request_only {
            return frame.len();
        }
        match transport.send(&frame) {
            Ok(bytes) => {
                #[cfg(feature = "statistics")]
                self.statistics.record_send(kind, bytes as u64);
                bytes.saturating_sub(KIND_TAG_SIZE)
            }
            Err(e) => {
                log::error!("telemetry send failed for kind {}: {}", kind, e);
                0
            }
        }
    }

    // === Command getters ===

    /// The target pose the robot should move to
    ///
    /// Returns true if the command was not read before.
    pub fn get_target_pose_command(&self, command: &mut Pose) -> bool {
        self.pose_command.read(command)
    }

    /// The twist velocities the robot should move at
    ///
    /// Returns true if the command was not read before.
    pub fn get_twist_command(&self, command: &mut Twist) -> bool {
        self.twist_command.read(command)
    }

    /// The goto command the robot should execute
    ///
    /// Returns true if the command was not read before.
    pub fn get_goto_command(&self, command: &mut GoTo) -> bool {
        self.goto_command.read(command)
    }

    /// The joint targets the robot should execute
    ///
    /// Returns true if the command was not read before.
    pub fn get_joints_command(&self, command: &mut JointCommand) -> bool {
        self.joints_command.read(command)
    }

    /// The next queued simple action
    ///
    /// Returns true if a queued action was popped.
    pub fn get_simple_action_command(&self, command: &mut SimpleAction) -> bool {
        self.simple_action_command.read(command)
    }

    /// The next queued complex action
    ///
    /// Returns true if a queued action was popped.
    pub fn get_complex_action_command(&self, command: &mut ComplexAction) -> bool {
        self.complex_action_command.read(command)
    }

    /// The trajectory the robot should follow
    ///
    /// Returns true if the command was not read before.
    pub fn get_robot_trajectory_command(&self, command: &mut Poses) -> bool {
        self.robot_trajectory_command.read(command)
    }

    // === Telemetry setters ===

    pub fn set_current_pose(&self, telemetry: &Pose) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::CurrentPose as u16)
    }

    pub fn set_current_twist(&self, telemetry: &Twist) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::CurrentTwist as u16)
    }

    pub fn set_current_acceleration(&self, telemetry: &Acceleration) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::CurrentAcceleration as u16)
    }

    pub fn set_current_imu_values(&self, telemetry: &Imu) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ImuValues as u16)
    }

    pub fn set_current_contact_points(&self, telemetry: &ContactPoints) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ContactPoints as u16)
    }

    pub fn set_current_transforms(&self, telemetry: &Transforms) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::Transforms as u16)
    }

    pub fn set_joint_state(&self, telemetry: &JointState) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::JointState as u16)
    }

    pub fn set_wrench_state(&self, telemetry: &WrenchState) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::WrenchState as u16)
    }

    /// A single sensor value; identified by id if the name was announced
    /// through [`ControlledRobot::init_simple_sensors`]
    pub fn set_simple_sensor(&self, telemetry: &SimpleSensor) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::SimpleSensorValue as u16)
    }

    pub fn set_poses(&self, telemetry: &Poses) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::Poses as u16)
    }

    pub fn set_point_cloud(&self, telemetry: &PointCloud) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::PointCloud as u16)
    }

    pub fn set_camera_information(&self, telemetry: &CameraInformation) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::CameraInformation as u16)
    }

    pub fn set_image(&self, telemetry: &Image) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::Image as u16)
    }

    pub fn set_image_layers(&self, telemetry: &ImageLayers) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ImageLayers as u16)
    }

    pub fn set_odometry(&self, telemetry: &Odometry) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::Odometry as u16)
    }

    pub fn set_robot_state(&self, state: &RobotState) -> usize {
        self.send_telemetry(state, TelemetryKind::RobotState as u16)
    }

    /// Robot state as a single description line
    pub fn set_robot_state_text(&self, state: &str) -> usize {
        self.set_robot_state(&RobotState {
            state: vec![state.to_string()],
            timestamp: Some(Self::get_time()),
        })
    }

    /// Robot state as multiple description lines
    pub fn set_robot_state_lines(&self, lines: &[String]) -> usize {
        self.set_robot_state(&RobotState {
            state: lines.to_vec(),
            timestamp: Some(Self::get_time()),
        })
    }

    // === Log messages ===

    /// Push a log message if it passes the controller-selected level gate
    ///
    /// A message is emitted iff its level is at or below the current
    /// level, or at/above [`LogLevel::Custom`].
    pub fn set_log_message(&self, message: &LogMessage) -> usize {
        let current = self.log_level.load(Ordering::Relaxed) as i64;
        let level = message.level as i64;
        if (0..=current).contains(&level) || level >= LogLevel::Custom as i64 {
            return self.send_telemetry(message, TelemetryKind::LogMessage as u16);
        }
        0
    }

    /// Convenience form of [`ControlledRobot::set_log_message`]
    pub fn set_log(&self, level: LogLevel, message: impl Into<String>) -> usize {
        self.set_log_message(&LogMessage {
            level: level as i32,
            message: message.into(),
            timestamp: Some(Self::get_time()),
        })
    }

    // === Init helpers (capability announcements) ===

    /// Announce the robot's controllable joints
    pub fn init_controllable_joints(&self, telemetry: &JointState) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ControllableJoints as u16)
    }

    /// Announce the set of simple actions; fill each state with its
    /// maximum value
    pub fn init_simple_actions(&self, telemetry: &SimpleActions) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::SimpleActions as u16)
    }

    /// Announce the set of complex actions
    pub fn init_complex_actions(&self, telemetry: &ComplexActions) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ComplexActions as u16)
    }

    /// Announce the robot's sensors; names are mandatory here so later
    /// [`ControlledRobot::set_simple_sensor`] pushes may omit them
    pub fn init_simple_sensors(&self, telemetry: &SimpleSensors) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::SimpleSensorDefinition as u16)
    }

    /// Announce the available maps; buffered for requests, not pushed
    pub fn init_maps_definition(&self, telemetry: &MapsDefinition) -> usize {
        self.push_telemetry(telemetry, TelemetryKind::MapsDefinition as u16, true)
    }

    /// Announce the robot's name
    pub fn init_robot_name(&self, telemetry: &RobotName) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::RobotName as u16)
    }

    /// Announce the video stream urls and camera poses
    pub fn init_video_streams(&self, telemetry: &VideoStreams) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::VideoStreams as u16)
    }

    /// Announce frames the controller may command directly
    pub fn init_controllable_frames(&self, telemetry: &ControllableFrames) -> usize {
        self.send_telemetry(telemetry, TelemetryKind::ControllableFrames as u16)
    }

    /// Announce requestable files/folders and remember their paths for
    /// answering `FILE_REQUEST`
    pub fn init_files(&self, definition: &FileDefinition) -> usize {
        let entries = definition
            .files
            .iter()
            .enumerate()
            .map(|(i, file)| FileEntry {
                identifier: file.identifier.clone(),
                path: file.path.clone(),
                is_folder: definition.is_folder.get(i).copied().unwrap_or(false),
            })
            .collect();
        *self.files.lock() = entries;
        self.send_telemetry(definition, TelemetryKind::FileDefinition as u16)
    }

    // === Maps ===

    /// Store raw map bytes under `map_id`; maps are only sent when the
    /// controller requests them on the command channel
    pub fn set_map_bytes(&self, data: Vec<u8>, map_id: u32) {
        self.maps.store(map_id, data);
    }

    /// Store a serialized [`Map`] under `map_id`
    pub fn set_map(&self, map: &Map, map_id: u32) {
        self.maps.store(map_id, map.encode_to_vec());
    }

    /// Store a point cloud under the well-known pointcloud map id
    pub fn set_point_cloud_map(&self, pointcloud: &PointCloud) {
        self.set_map(
            &Map {
                data: pointcloud.encode_to_vec(),
                type_name: std::any::type_name::<PointCloud>().to_string(),
            },
            wire::POINTCLOUD_MAP,
        );
    }

    /// Store an occupancy grid under the well-known grid map id
    pub fn set_grid_map(&self, gridmap: &GridMap) {
        self.set_map(
            &Map {
                data: gridmap.encode_to_vec(),
                type_name: std::any::type_name::<GridMap>().to_string(),
            },
            wire::GRID_MAP,
        );
    }

    // === Permissions ===

    /// Ask the operator for permission
    ///
    /// Pushes the request on the telemetry channel and returns a handle
    /// resolving to the operator's decision when the matching
    /// `PERMISSION` reply arrives. The handle may be cloned and observed
    /// from any thread; an unanswered request never resolves, so bound
    /// waits with [`OutcomeHandle::wait_timeout`].
    pub fn request_permission(&self, request: &PermissionRequest) -> OutcomeHandle {
        let handle = self.pending_permissions.insert(&request.requestuid);
        self.send_telemetry(request, TelemetryKind::PermissionRequest as u16);
        handle
    }

    // === Misc ===

    /// Wall-clock timestamp for outbound messages
    pub fn get_time() -> TimeStamp {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => TimeStamp {
                secs: elapsed.as_secs() as i64,
                nsecs: elapsed.subsec_nanos() as i32,
            },
            Err(_) => TimeStamp::default(),
        }
    }

    /// Send accounting, only updated when built with the `statistics`
    /// feature
    #[cfg(feature = "statistics")]
    pub fn statistics(&self) -> &statistics::Statistics {
        &self.statistics
    }
}
