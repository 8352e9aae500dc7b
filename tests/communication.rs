//! End-to-end request/response tests over a loopback transport pair
//!
//! The controller side is played by the tests: frames are written to the
//! command channel, `update()` is driven by hand, and replies plus
//! telemetry pushes are read back from the loopback endpoints.

use niyantra::messages::{
    FileRequest, Folder, HeartBeat, LogLevel, Permission, PermissionRequest, Pose, Position,
    SimpleAction, Twist, Vector3,
};
use niyantra::transport::{LoopbackTransport, ReceiveMode, Transport};
use niyantra::wire::{self, ControlKind, TelemetryKind};
use niyantra::{ControlledRobot, RobotConfig};
use prost::Message;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Controller {
    commands: LoopbackTransport,
    telemetry: LoopbackTransport,
}

impl Controller {
    /// Push one framed command; the robot answers on the next update
    fn send(&self, kind: u16, payload: &[u8]) {
        self.commands.send(&wire::tag(kind, payload)).unwrap();
    }

    fn reply(&self) -> Option<Vec<u8>> {
        self.commands.receive(ReceiveMode::NonBlocking).unwrap()
    }

    fn telemetry_frame(&self) -> Option<Vec<u8>> {
        self.telemetry.receive(ReceiveMode::NonBlocking).unwrap()
    }
}

fn setup() -> (ControlledRobot, Controller) {
    setup_with_config(RobotConfig::default())
}

fn setup_with_config(config: RobotConfig) -> (ControlledRobot, Controller) {
    let (controller_commands, robot_commands) = LoopbackTransport::pair();
    let (controller_telemetry, robot_telemetry) = LoopbackTransport::pair();
    let robot = ControlledRobot::with_config(
        Arc::new(robot_commands),
        Some(Arc::new(robot_telemetry)),
        config,
    );
    (
        robot,
        Controller {
            commands: controller_commands,
            telemetry: controller_telemetry,
        },
    )
}

fn twist(linear_x: f64) -> Twist {
    Twist {
        linear: Some(Vector3 {
            x: linear_x,
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn twist_command_is_acked_and_readable_once() {
    let (robot, controller) = setup();
    let sent = twist(1.0);

    controller.send(ControlKind::TwistCommand as u16, &sent.encode_to_vec());
    robot.update();

    assert_eq!(controller.reply(), Some(vec![0x02, 0x00]));

    let mut received = Twist::default();
    assert!(robot.get_twist_command(&mut received));
    assert_eq!(received.linear.unwrap().x, 1.0);
    assert!(!robot.get_twist_command(&mut received));
}

#[test]
fn telemetry_pull_returns_latest_push() {
    let (robot, controller) = setup();
    let pose = Pose {
        position: Some(Position {
            x: 3.0,
            y: 4.0,
            z: 0.0,
        }),
        ..Default::default()
    };
    robot.set_current_pose(&pose);

    // the push itself went out framed on the telemetry channel
    let pushed = controller.telemetry_frame().unwrap();
    let (kind, payload) = wire::untag(&pushed).unwrap();
    assert_eq!(kind, TelemetryKind::CurrentPose as u16);
    assert_eq!(Pose::decode(payload).unwrap(), pose);

    // pull the buffered value through the command channel
    controller.send(
        ControlKind::TelemetryRequest as u16,
        &(TelemetryKind::CurrentPose as u16).to_le_bytes(),
    );
    robot.update();

    let reply = controller.reply().unwrap();
    let (kind, payload) = wire::untag(&reply).unwrap();
    assert_eq!(kind, TelemetryKind::CurrentPose as u16);
    assert_eq!(Pose::decode(payload).unwrap(), pose);
}

#[test]
fn telemetry_pull_before_any_push_answers_empty() {
    let (robot, controller) = setup();

    controller.send(
        ControlKind::TelemetryRequest as u16,
        &(TelemetryKind::CurrentTwist as u16).to_le_bytes(),
    );
    robot.update();

    let reply = controller.reply().unwrap();
    assert_eq!(reply, (TelemetryKind::CurrentTwist as u16).to_le_bytes());
}

#[test]
fn map_request_returns_stored_bytes_or_empty() {
    let (robot, controller) = setup();
    robot.set_map_bytes(vec![9, 8, 7], 5);

    controller.send(ControlKind::MapRequest as u16, &5u16.to_le_bytes());
    robot.update();
    assert_eq!(controller.reply(), Some(vec![9, 8, 7]));

    controller.send(ControlKind::MapRequest as u16, &6u16.to_le_bytes());
    robot.update();
    assert_eq!(controller.reply(), Some(Vec::new()));
}

#[test]
fn heartbeat_expiry_fires_callback_once_and_disconnects() {
    let (robot, controller) = setup();

    let expiries = Arc::new(AtomicUsize::new(0));
    let elapsed_seen = Arc::new(Mutex::new(0.0f32));
    let expiries_cb = Arc::clone(&expiries);
    let elapsed_cb = Arc::clone(&elapsed_seen);
    robot.setup_heartbeat_callback(0.05, move |elapsed| {
        expiries_cb.fetch_add(1, Ordering::SeqCst);
        *elapsed_cb.lock().unwrap() = elapsed;
    });

    assert!(!robot.is_connected());

    let heartbeat = HeartBeat {
        heartbeat_duration: 0.05,
        heartbeat_latency: 0.0,
    };
    controller.send(ControlKind::Heartbeat as u16, &heartbeat.encode_to_vec());
    robot.update();

    assert_eq!(
        controller.reply(),
        Some(wire::tag_only(ControlKind::Heartbeat as u16))
    );
    assert!(robot.is_connected());
    assert_eq!(expiries.load(Ordering::SeqCst), 0);

    // no further traffic: duration + allowed latency (0.1s) runs out
    std::thread::sleep(Duration::from_millis(130));
    robot.update();

    assert!(!robot.is_connected());
    assert_eq!(expiries.load(Ordering::SeqCst), 1);
    assert!(*elapsed_seen.lock().unwrap() >= 0.1);

    // expiry is reported once, not on every later update
    robot.update();
    assert_eq!(expiries.load(Ordering::SeqCst), 1);
}

#[test]
fn a_fresh_heartbeat_rearms_the_watchdog() {
    let (robot, controller) = setup();
    let expiries = Arc::new(AtomicUsize::new(0));
    let expiries_cb = Arc::clone(&expiries);
    robot.setup_heartbeat_callback(0.02, move |_| {
        expiries_cb.fetch_add(1, Ordering::SeqCst);
    });

    let heartbeat = HeartBeat {
        heartbeat_duration: 0.05,
        heartbeat_latency: 0.0,
    };
    for _ in 0..3 {
        controller.send(ControlKind::Heartbeat as u16, &heartbeat.encode_to_vec());
        robot.update();
        controller.reply().unwrap();
        std::thread::sleep(Duration::from_millis(30));
        robot.update();
        assert!(robot.is_connected());
    }
    assert_eq!(expiries.load(Ordering::SeqCst), 0);
}

#[test]
fn file_request_miss_answers_diagnostic_folder() {
    let (robot, controller) = setup();

    let request = FileRequest {
        identifier: "nope".into(),
        compressed: true,
    };
    controller.send(ControlKind::FileRequest as u16, &request.encode_to_vec());
    robot.update();

    let reply = controller.reply().unwrap();
    let (kind, payload) = wire::untag(&reply).unwrap();
    assert_eq!(kind, ControlKind::FileRequest as u16);

    let folder = Folder::decode(payload).unwrap();
    assert_eq!(folder.identifier, "file/folder :nope undefined");
    assert!(folder.files.is_empty());
}

#[test]
fn file_request_serves_a_defined_file() {
    let dir = std::env::temp_dir().join(format!("niyantra-comm-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("manifest.txt");
    std::fs::write(&path, b"robot manifest").unwrap();

    let config = RobotConfig {
        files: vec![niyantra::config::FileDefEntry {
            identifier: "manifest".into(),
            path: path.to_string_lossy().into_owned(),
            folder: false,
        }],
        ..Default::default()
    };
    let (robot, controller) = setup_with_config(config);

    let request = FileRequest {
        identifier: "manifest".into(),
        compressed: false,
    };
    controller.send(ControlKind::FileRequest as u16, &request.encode_to_vec());
    robot.update();

    let reply = controller.reply().unwrap();
    let (_, payload) = wire::untag(&reply).unwrap();
    let folder = Folder::decode(payload).unwrap();
    assert_eq!(folder.files.len(), 1);
    assert_eq!(folder.files[0].data, b"robot manifest");
    assert!(!folder.compressed);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn permission_roundtrip_resolves_the_outcome() {
    let (robot, controller) = setup();

    let handle = robot.request_permission(&PermissionRequest {
        description: "open the airlock".into(),
        requestuid: "u1".into(),
    });
    assert_eq!(handle.try_get(), None);

    // the request itself was pushed on the telemetry channel
    let pushed = controller.telemetry_frame().unwrap();
    let (kind, _) = wire::untag(&pushed).unwrap();
    assert_eq!(kind, TelemetryKind::PermissionRequest as u16);

    let permission = Permission {
        requestuid: "u1".into(),
        granted: true,
    };
    controller.send(ControlKind::Permission as u16, &permission.encode_to_vec());
    robot.update();

    assert_eq!(
        controller.reply(),
        Some(wire::tag_only(ControlKind::Permission as u16))
    );
    assert_eq!(handle.try_get(), Some(true));
    assert!(handle.wait());

    // a duplicate reply for the same uid is discarded quietly
    controller.send(ControlKind::Permission as u16, &permission.encode_to_vec());
    robot.update();
    assert_eq!(
        controller.reply(),
        Some(wire::tag_only(ControlKind::Permission as u16))
    );
    assert_eq!(handle.try_get(), Some(true));
}

#[test]
fn unknown_kind_is_acked_with_no_data() {
    let (robot, controller) = setup();

    controller.send(0xFFFF, &[1, 2, 3]);
    robot.update();

    assert_eq!(controller.reply(), Some(vec![0x00, 0x00]));

    // no slot flags changed
    let mut out = Twist::default();
    assert!(!robot.get_twist_command(&mut out));
}

#[test]
fn malformed_frame_is_acked_with_no_data() {
    let (robot, controller) = setup();

    controller.commands.send(&[0x05]).unwrap();
    robot.update();

    assert_eq!(controller.reply(), Some(vec![0x00, 0x00]));
}

#[test]
fn command_decode_failure_keeps_prior_fresh_flag() {
    let (robot, controller) = setup();
    let sent = twist(2.5);

    controller.send(ControlKind::TwistCommand as u16, &sent.encode_to_vec());
    robot.update();
    controller.reply().unwrap();

    // garbage payload: NO_DATA reply, previous unread command survives
    controller.send(ControlKind::TwistCommand as u16, &[0xFF]);
    robot.update();
    assert_eq!(controller.reply(), Some(vec![0x00, 0x00]));

    let mut received = Twist::default();
    assert!(robot.get_twist_command(&mut received));
    assert_eq!(received, sent);
}

#[test]
fn every_inbound_frame_gets_exactly_one_reply() {
    let (robot, controller) = setup();

    controller.send(ControlKind::TwistCommand as u16, &twist(1.0).encode_to_vec());
    controller.send(0xFFFF, &[]);
    controller.commands.send(&[0x01]).unwrap();
    controller.send(
        ControlKind::TelemetryRequest as u16,
        &(TelemetryKind::CurrentPose as u16).to_le_bytes(),
    );
    robot.update();

    let mut replies = 0;
    while controller.reply().is_some() {
        replies += 1;
    }
    assert_eq!(replies, 4);
    assert!(robot.is_connected());
}

#[test]
fn action_commands_queue_in_fifo_order() {
    let (robot, controller) = setup();

    for state in 1..=3u64 {
        let action = SimpleAction {
            name: "beep".into(),
            state,
        };
        controller.send(
            ControlKind::SimpleActionsCommand as u16,
            &action.encode_to_vec(),
        );
    }
    robot.update();

    let mut action = SimpleAction::default();
    for expected in 1..=3u64 {
        assert!(robot.get_simple_action_command(&mut action));
        assert_eq!(action.state, expected);
    }
    assert!(!robot.get_simple_action_command(&mut action));
}

#[test]
fn log_level_select_gates_log_messages() {
    let (robot, controller) = setup();

    // default gate passes everything below the custom band
    assert!(robot.set_log(LogLevel::Debug, "starting up") > 0);
    controller.telemetry_frame().unwrap();

    // controller tightens the gate to ERROR
    controller.send(
        ControlKind::LogLevelSelect as u16,
        &(LogLevel::Error as u16).to_le_bytes(),
    );
    robot.update();
    assert_eq!(
        controller.reply(),
        Some(wire::tag_only(ControlKind::LogLevelSelect as u16))
    );

    assert_eq!(robot.set_log(LogLevel::Info, "suppressed"), 0);
    assert!(controller.telemetry_frame().is_none());

    assert!(robot.set_log(LogLevel::Error, "battery critical") > 0);
    controller.telemetry_frame().unwrap();

    // custom levels bypass the gate entirely
    assert!(robot.set_log(LogLevel::Custom, "mission event") > 0);
    controller.telemetry_frame().unwrap();
}

#[test]
fn command_callbacks_see_the_numeric_kind() {
    let (robot, controller) = setup();

    let kinds = Arc::new(Mutex::new(Vec::new()));
    let kinds_cb = Arc::clone(&kinds);
    robot.add_command_received_callback(move |kind| {
        kinds_cb.lock().unwrap().push(kind);
    });

    let twist_hits = Arc::new(AtomicUsize::new(0));
    let twist_hits_cb = Arc::clone(&twist_hits);
    assert!(robot.add_command_kind_callback(ControlKind::TwistCommand as u16, move || {
        twist_hits_cb.fetch_add(1, Ordering::SeqCst);
    }));

    controller.send(ControlKind::TwistCommand as u16, &twist(1.0).encode_to_vec());
    controller.send(0xFFFF, &[]);
    robot.update();

    assert_eq!(kinds.lock().unwrap().as_slice(), &[2u16]);
    assert_eq!(twist_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn maps_definition_is_buffered_without_a_push() {
    let (robot, controller) = setup();

    let definition = niyantra::messages::MapsDefinition {
        maps: vec![niyantra::messages::MapInformation {
            name: "occupancy".into(),
            id: 1,
        }],
    };
    assert!(robot.init_maps_definition(&definition) > 0);
    // request-only: nothing went out on the telemetry channel
    assert!(controller.telemetry_frame().is_none());

    controller.send(
        ControlKind::TelemetryRequest as u16,
        &(TelemetryKind::MapsDefinition as u16).to_le_bytes(),
    );
    robot.update();

    let reply = controller.reply().unwrap();
    let (kind, payload) = wire::untag(&reply).unwrap();
    assert_eq!(kind, TelemetryKind::MapsDefinition as u16);
    assert_eq!(
        niyantra::messages::MapsDefinition::decode(payload).unwrap(),
        definition
    );
}

#[cfg(feature = "statistics")]
#[test]
fn statistics_account_for_pushed_bytes() {
    let (robot, controller) = setup();

    let bytes = robot.set_current_pose(&Pose::default());
    let frame = controller.telemetry_frame().unwrap();
    assert_eq!(bytes + 2, frame.len());

    let stats = robot.statistics();
    assert_eq!(stats.global_bytes_sent(), frame.len() as u64);
    let (kind_bytes, kind_messages) = stats.per_kind(TelemetryKind::CurrentPose as u16);
    assert_eq!(kind_bytes, frame.len() as u64);
    assert_eq!(kind_messages, 1);
}
