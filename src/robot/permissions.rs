//! Permission request matching
//!
//! The robot asks the operator for permission by pushing a
//! `PERMISSION_REQUEST` with a unique request UID. The controller answers
//! with a `PERMISSION` command carrying the same UID. Between the two,
//! the outcome lives in a single-shot cell that any number of robot
//! threads may observe.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

struct OutcomeCell {
    state: Mutex<Option<bool>>,
    decided: Condvar,
}

impl OutcomeCell {
    fn new() -> Self {
        Self {
            state: Mutex::new(None),
            decided: Condvar::new(),
        }
    }

    /// Deliver the outcome; false when already fulfilled
    fn fulfil(&self, granted: bool) -> bool {
        let mut state = self.state.lock();
        if state.is_some() {
            return false;
        }
        *state = Some(granted);
        self.decided.notify_all();
        true
    }
}

/// Shareable observer of one permission outcome
///
/// Clones observe the same cell; the value is delivered exactly once and
/// remains readable afterwards.
#[derive(Clone)]
pub struct OutcomeHandle {
    cell: Arc<OutcomeCell>,
}

impl OutcomeHandle {
    /// The outcome, if already delivered
    pub fn try_get(&self) -> Option<bool> {
        *self.cell.state.lock()
    }

    /// Block until the outcome arrives
    pub fn wait(&self) -> bool {
        let mut state = self.cell.state.lock();
        loop {
            if let Some(granted) = *state {
                return granted;
            }
            self.cell.decided.wait(&mut state);
        }
    }

    /// Block up to `timeout` for the outcome
    pub fn wait_timeout(&self, timeout: Duration) -> Option<bool> {
        let mut state = self.cell.state.lock();
        if let Some(granted) = *state {
            return Some(granted);
        }
        self.cell.decided.wait_for(&mut state, timeout);
        *state
    }
}

/// Pending permission table keyed by request UID
///
/// Entries are created when a request is emitted and removed by the
/// matching reply. Abandoned entries (no reply ever arrives) stay until
/// then; bounding them is the caller's concern.
pub(crate) struct PendingPermissions {
    pending: Mutex<HashMap<String, Arc<OutcomeCell>>>,
}

impl PendingPermissions {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Create the outcome holder for `requestuid`, replacing any prior one
    pub fn insert(&self, requestuid: &str) -> OutcomeHandle {
        let cell = Arc::new(OutcomeCell::new());
        if self
            .pending
            .lock()
            .insert(requestuid.to_string(), Arc::clone(&cell))
            .is_some()
        {
            log::warn!(
                "permission request '{}' re-issued before a reply, replacing pending outcome",
                requestuid
            );
        }
        OutcomeHandle { cell }
    }

    /// Fulfil and consume the entry matching `requestuid`
    ///
    /// Duplicate or unmatched replies are discarded with a log line.
    pub fn fulfil(&self, requestuid: &str, granted: bool) {
        let cell = self.pending.lock().remove(requestuid);
        match cell {
            Some(cell) => {
                if !cell.fulfil(granted) {
                    log::warn!("permission '{}' fulfilled twice, discarding", requestuid);
                }
            }
            None => {
                log::warn!(
                    "permission reply for unknown request '{}', discarding",
                    requestuid
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn outcome_reaches_observers_taken_before_delivery() {
        let pending = PendingPermissions::new();
        let handle = pending.insert("u1");
        let observer = handle.clone();

        assert_eq!(handle.try_get(), None);
        pending.fulfil("u1", true);

        assert_eq!(handle.try_get(), Some(true));
        assert!(observer.wait());
    }

    #[test]
    fn duplicate_reply_is_discarded() {
        let pending = PendingPermissions::new();
        let handle = pending.insert("u1");

        pending.fulfil("u1", false);
        // second reply for the same uid finds no entry and changes nothing
        pending.fulfil("u1", true);

        assert_eq!(handle.try_get(), Some(false));
    }

    #[test]
    fn wait_blocks_until_fulfilment() {
        let pending = Arc::new(PendingPermissions::new());
        let handle = pending.insert("u2");

        let fulfiller = Arc::clone(&pending);
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            fulfiller.fulfil("u2", true);
        });

        assert!(handle.wait());
        worker.join().unwrap();
    }

    #[test]
    fn wait_timeout_expires_without_reply() {
        let pending = PendingPermissions::new();
        let handle = pending.insert("u3");
        assert_eq!(handle.wait_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn reissue_replaces_pending_outcome() {
        let pending = PendingPermissions::new();
        let abandoned = pending.insert("u4");
        let current = pending.insert("u4");

        pending.fulfil("u4", true);
        assert_eq!(current.try_get(), Some(true));
        assert_eq!(abandoned.try_get(), None);
    }
}
