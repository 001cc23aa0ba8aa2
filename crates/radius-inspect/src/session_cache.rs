//! Transaction cache
//!
//! Remembers the authenticator of each outstanding request by its 8-bit
//! identifier so the reply can be checked against it. Entries are read once:
//! taking an entry removes it, since an identifier is reused as soon as the
//! transaction completes.

use dashmap::DashMap;
use tracing::trace;

#[derive(Debug, Default)]
pub struct SessionCache {
    entries: DashMap<u8, [u8; 16]>,
}

impl SessionCache {
    pub fn new() -> Self {
        SessionCache {
            entries: DashMap::new(),
        }
    }

    /// Store the authenticator for `identifier`, replacing any previous one
    pub fn set(&self, identifier: u8, authenticator: [u8; 16]) {
        if self.entries.insert(identifier, authenticator).is_some() {
            trace!(identifier, "Replaced outstanding request authenticator");
        }
    }

    /// Remove and return the authenticator stored for `identifier`
    pub fn take(&self, identifier: u8) -> Option<[u8; 16]> {
        self.entries.remove(&identifier).map(|(_, authenticator)| authenticator)
    }

    /// Get the number of outstanding entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        self.entries.clear();
    }
}
