//! Latest-value cell with a serialized-form cache

use crate::error::Result;
use parking_lot::Mutex;
use prost::Message;

struct Inner<T> {
    value: T,
    serialized: Vec<u8>,
}

/// Holds the most recent value of one message type
///
/// Writes replace the value and its serialized form in a single swap;
/// reads are non-destructive copies. The lock is only held for the copy,
/// never across I/O.
pub struct LatestBuffer<T: Message + Default + Clone> {
    inner: Mutex<Inner<T>>,
}

impl<T: Message + Default + Clone> LatestBuffer<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: T::default(),
                serialized: Vec::new(),
            }),
        }
    }

    /// Replace the stored value
    pub fn set(&self, value: T) {
        let serialized = value.encode_to_vec();
        let mut inner = self.inner.lock();
        inner.value = value;
        inner.serialized = serialized;
    }

    /// Decode `bytes` and replace the stored value
    ///
    /// On decode failure the previous value is left untouched.
    pub fn set_from_bytes(&self, bytes: &[u8]) -> Result<()> {
        let value = T::decode(bytes)?;
        let mut inner = self.inner.lock();
        inner.value = value;
        inner.serialized = bytes.to_vec();
        Ok(())
    }

    /// Copy out the stored value
    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Copy out the serialized form stored at the last write
    pub fn peek_bytes(&self) -> Vec<u8> {
        self.inner.lock().serialized.clone()
    }
}

impl<T: Message + Default + Clone> Default for LatestBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::RobotName;

    #[test]
    fn set_get_roundtrip() {
        let buffer = LatestBuffer::<RobotName>::new();
        assert_eq!(buffer.get(), RobotName::default());

        buffer.set(RobotName {
            value: "pathfinder".into(),
        });
        assert_eq!(buffer.get().value, "pathfinder");
        assert!(!buffer.peek_bytes().is_empty());
    }

    #[test]
    fn bad_bytes_keep_previous_value() {
        let buffer = LatestBuffer::<RobotName>::new();
        buffer.set(RobotName {
            value: "pathfinder".into(),
        });

        // field 1 wire-type mismatch
        assert!(buffer.set_from_bytes(&[0x0D, 0x01, 0x02]).is_err());
        assert_eq!(buffer.get().value, "pathfinder");
    }

    #[test]
    fn peek_matches_encoding() {
        let buffer = LatestBuffer::<RobotName>::new();
        let name = RobotName {
            value: "scout".into(),
        };
        buffer.set(name.clone());
        assert_eq!(buffer.peek_bytes(), name.encode_to_vec());
    }
}
