//! Session persistence.
//!
//! The portal keeps exactly one session record in client-local
//! storage, serialized as JSON under a fixed key. The store is the
//! seam to that storage: reads of missing or malformed payloads
//! degrade to "no session" rather than failing, because stored data
//! is user-editable and must never wedge the portal.

use crate::session::SessionRecord;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::warn;

/// The fixed storage key the session record lives under.
pub const STORAGE_KEY: &str = "flemzin_session";

/// Client-local session storage.
///
/// Implementations hold at most one session. `save` replaces any
/// existing record; `clear` is idempotent.
pub trait SessionStore {
    /// Loads the stored session, if present and well-formed.
    fn load(&self) -> Option<SessionRecord>;

    /// Stores the session, replacing any existing record.
    fn save(&self, session: &SessionRecord);

    /// Removes the stored session. A no-op when absent.
    fn clear(&self);
}

/// An in-memory store over a string keyspace.
///
/// Mirrors the shape of browser local storage: values are JSON
/// strings under string keys, and nothing stops a user from editing
/// them out-of-band. `set_raw` is that editing seam.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw payload under the session key, bypassing the
    /// codec. This is how tampered or legacy payloads arrive.
    pub fn set_raw(&self, payload: &str) {
        self.values
            .lock()
            .insert(STORAGE_KEY.to_string(), payload.to_string());
    }

    /// Returns the raw stored payload, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.values.lock().get(STORAGE_KEY).cloned()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<SessionRecord> {
        let values = self.values.lock();
        let payload = values.get(STORAGE_KEY)?;
        match serde_json::from_str(payload) {
            Ok(session) => Some(session),
            Err(error) => {
                warn!(%error, "discarding malformed stored session");
                None
            }
        }
    }

    fn save(&self, session: &SessionRecord) {
        match serde_json::to_string(session) {
            Ok(payload) => {
                self.values.lock().insert(STORAGE_KEY.to_string(), payload);
            }
            Err(error) => {
                warn!(%error, "failed to serialize session record");
            }
        }
    }

    fn clear(&self) {
        self.values.lock().remove(STORAGE_KEY);
    }
}
