//! Inbound request evaluation
//!
//! One framed blob in, exactly one reply out, emitted before the next
//! message is read. Pull requests are answered from the telemetry and
//! map buffers, commands are decoded into their registered slot and
//! acknowledged with their own kind, and everything unparseable or
//! unknown is acknowledged with `NO_DATA` so the controller's
//! request/response pairing never dangles.

use super::ControlledRobot;
use crate::messages::{FileRequest, Permission};
use crate::robot::files;
use crate::wire::{self, ControlKind};
use prost::Message;
use std::sync::atomic::Ordering;

impl ControlledRobot {
    /// Dispatch one inbound frame and emit its reply
    ///
    /// Returns the kind the frame was handled as; `NO_DATA` for anything
    /// that could not be parsed.
    pub(super) fn evaluate_request(&self, frame: &[u8]) -> u16 {
        let (kind, payload) = match wire::untag(frame) {
            Ok(parts) => parts,
            Err(_) => {
                log::warn!("dropping frame shorter than the kind tag ({} bytes)", frame.len());
                self.reply_ack(wire::NO_DATA);
                return wire::NO_DATA;
            }
        };

        match ControlKind::from_u16(kind) {
            Some(ControlKind::TelemetryRequest) => self.answer_telemetry_request(payload, kind),
            Some(ControlKind::MapRequest) => self.answer_map_request(payload, kind),
            Some(ControlKind::LogLevelSelect) => self.answer_log_level_select(payload, kind),
            Some(ControlKind::Permission) => self.answer_permission(payload, kind),
            Some(ControlKind::FileRequest) => self.answer_file_request(payload, kind),
            _ => self.write_command(kind, payload),
        }
    }

    /// `TELEMETRY_REQUEST`: answer with the stored serialization of the
    /// requested sub-kind, framed; empty behind the tag if never pushed
    fn answer_telemetry_request(&self, payload: &[u8], kind: u16) -> u16 {
        let Some(requested) = wire::read_u16(payload) else {
            log::warn!("telemetry request without a sub-kind");
            self.reply_ack(wire::NO_DATA);
            return wire::NO_DATA;
        };
        self.reply(&self.telemetry.peek_serialized(requested));
        kind
    }

    /// `MAP_REQUEST`: answer with the stored raw map bytes, untagged;
    /// empty for an unset id
    fn answer_map_request(&self, payload: &[u8], kind: u16) -> u16 {
        let Some(map_id) = wire::read_u16(payload) else {
            log::warn!("map request without a map id");
            self.reply_ack(wire::NO_DATA);
            return wire::NO_DATA;
        };
        self.reply(&self.maps.peek(map_id as u32));
        kind
    }

    fn answer_log_level_select(&self, payload: &[u8], kind: u16) -> u16 {
        let Some(level) = wire::read_u16(payload) else {
            log::warn!("log level select without a level");
            self.reply_ack(wire::NO_DATA);
            return wire::NO_DATA;
        };
        self.log_level.store(level as u32, Ordering::Relaxed);
        log::debug!("log level set to {} by controller", level);
        self.reply_ack(kind);
        kind
    }

    fn answer_permission(&self, payload: &[u8], kind: u16) -> u16 {
        let permission = match Permission::decode(payload) {
            Ok(permission) => permission,
            Err(e) => {
                log::warn!("unable to parse permission reply: {}", e);
                self.reply_ack(wire::NO_DATA);
                return wire::NO_DATA;
            }
        };
        self.pending_permissions
            .fulfil(&permission.requestuid, permission.granted);
        self.reply_ack(kind);
        kind
    }

    fn answer_file_request(&self, payload: &[u8], kind: u16) -> u16 {
        let request = match FileRequest::decode(payload) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("unable to parse file request: {}", e);
                self.reply_ack(wire::NO_DATA);
                return wire::NO_DATA;
            }
        };
        // clone the few definitions out so the lock never spans file I/O
        let definitions = self.files.lock().clone();
        let folder = files::build_folder_reply(&definitions, &request);
        self.reply(&wire::tag(kind, &folder.encode_to_vec()));
        kind
    }

    /// Everything else is a command: decode into the registered slot
    fn write_command(&self, kind: u16, payload: &[u8]) -> u16 {
        match self.command_sinks.get(&kind) {
            Some(sink) => {
                if sink.write(payload) {
                    self.reply_ack(kind);
                    self.notify_command_callbacks(kind);
                    kind
                } else {
                    log::warn!("unable to parse command payload of kind {}", kind);
                    self.reply_ack(wire::NO_DATA);
                    wire::NO_DATA
                }
            }
            None => {
                log::warn!("no command slot registered for kind {}", kind);
                self.reply_ack(wire::NO_DATA);
                kind
            }
        }
    }

    fn reply(&self, frame: &[u8]) {
        if let Err(e) = self.command_transport.send(frame) {
            log::error!("command reply send failed: {}", e);
        }
    }

    fn reply_ack(&self, kind: u16) {
        self.reply(&wire::tag_only(kind));
    }
}
