//! Length-prefixed TCP transport
//!
//! TCP is a byte stream, so message boundaries are restored with a
//! framing prefix:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Length (4 bytes) │ Message (variable)       │
//! │ Big-endian u32   │ kind tag + payload       │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! The length field uses network byte order; messages above 1MB are
//! rejected as a sanity check against protocol desync.

use super::{ReceiveMode, Transport};
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

/// Maximum framed message size (1MB)
const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Read chunk size for the receive path
const READ_CHUNK: usize = 4096;

/// Message transport over a single TCP connection
///
/// Sends are serialized through an internal lock so any thread may push
/// telemetry concurrently. Receiving reassembles frames from the byte
/// stream, tolerating partial reads in non-blocking mode.
pub struct TcpTransport {
    writer: Mutex<TcpStream>,
    reader: Mutex<FrameReader>,
}

impl TcpTransport {
    /// Connect to a listening peer
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream)
    }

    /// Accept one connection from a bound listener
    pub fn accept(listener: &TcpListener) -> Result<Self> {
        let (stream, addr) = listener.accept()?;
        log::info!("peer connected: {}", addr);
        Self::from_stream(stream)
    }

    /// Wrap an already-established connection
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        if let Err(e) = stream.set_nodelay(true) {
            log::warn!("failed to set TCP_NODELAY: {}", e);
        }
        let read_half = stream.try_clone()?;
        Ok(Self {
            writer: Mutex::new(stream),
            reader: Mutex::new(FrameReader::new(read_half)),
        })
    }
}

impl Transport for TcpTransport {
    fn send(&self, frame: &[u8]) -> Result<usize> {
        if frame.len() > MAX_MESSAGE_SIZE {
            return Err(Error::MessageTooLarge(frame.len()));
        }
        let mut stream = self.writer.lock();
        stream.write_all(&(frame.len() as u32).to_be_bytes())?;
        stream.write_all(frame)?;
        stream.flush()?;
        Ok(frame.len())
    }

    fn receive(&self, mode: ReceiveMode) -> Result<Option<Vec<u8>>> {
        self.reader.lock().read_frame(mode)
    }
}

/// Stream-side state: the read half plus bytes of incomplete frames
struct FrameReader {
    stream: TcpStream,
    buf: Vec<u8>,
}

impl FrameReader {
    fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            buf: Vec::with_capacity(READ_CHUNK),
        }
    }

    fn read_frame(&mut self, mode: ReceiveMode) -> Result<Option<Vec<u8>>> {
        self.stream
            .set_nonblocking(mode == ReceiveMode::NonBlocking)?;

        loop {
            if let Some(frame) = self.take_complete_frame()? {
                return Ok(Some(frame));
            }

            let mut chunk = [0u8; READ_CHUNK];
            match self.stream.read(&mut chunk) {
                Ok(0) => return Err(Error::Disconnected),
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // partial frame stays buffered for the next call
                    return Ok(None);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Pop one frame off the reassembly buffer if fully received
    fn take_complete_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if self.buf.len() < 4 {
            return Ok(None);
        }
        let len = u32::from_be_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]) as usize;
        if len > MAX_MESSAGE_SIZE {
            return Err(Error::MessageTooLarge(len));
        }
        if self.buf.len() < 4 + len {
            return Ok(None);
        }
        let frame = self.buf[4..4 + len].to_vec();
        self.buf.drain(..4 + len);
        Ok(Some(frame))
    }
}
