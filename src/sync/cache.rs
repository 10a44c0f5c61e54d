//! Query cache keyed by resource identity.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::models::{Document, Invitation, Project};

/// Identity of a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    /// `projects`
    Projects,
    /// `project:{id}`
    Project(i64),
    /// `documents:{projectId}`
    Documents(i64),
    /// `invitations`
    Invitations,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Projects => write!(f, "projects"),
            CacheKey::Project(id) => write!(f, "project:{}", id),
            CacheKey::Documents(id) => write!(f, "documents:{}", id),
            CacheKey::Invitations => write!(f, "invitations"),
        }
    }
}

/// A cached server response.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Projects(Vec<Project>),
    Project(Project),
    Documents(Vec<Document>),
    Invitations(Vec<Invitation>),
}

/// Handle for one in-flight fetch; orders completions per cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
struct CacheEntry {
    value: Option<CachedValue>,
    stale: bool,
    session_version: u64,
    applied: u64,
    invalidated_before: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    last_ticket: u64,
}

/// Stale-flagged cache of server collections.
///
/// Reads trust an entry only while it is fresh and was fetched under the current session
/// version. Completions older than the last applied one for the same key are dropped, and
/// a fetch that started before an invalidation of its key never makes the entry fresh.
#[derive(Debug, Default)]
pub struct QueryCache {
    inner: Mutex<CacheInner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh value for `key`, if any.
    pub fn fresh(&self, key: &CacheKey, session_version: u64) -> Option<CachedValue> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        if entry.stale || entry.session_version != session_version {
            return None;
        }
        entry.value.clone()
    }

    /// Take a ticket for a fetch about to be issued.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut inner = self.lock();
        inner.last_ticket += 1;
        FetchTicket(inner.last_ticket)
    }

    /// Store the result of a fetch; returns whether it was applied.
    pub fn complete_fetch(
        &self,
        key: CacheKey,
        ticket: FetchTicket,
        session_version: u64,
        value: CachedValue,
    ) -> bool {
        let mut inner = self.lock();
        let entry = inner.entries.entry(key).or_default();
        if ticket.0 < entry.applied {
            tracing::debug!("Discarding out-of-order response for {}", key);
            return false;
        }
        entry.value = Some(value);
        entry.applied = ticket.0;
        entry.session_version = session_version;
        entry.stale = ticket.0 < entry.invalidated_before;
        true
    }

    /// Mark keys stale; the next read refetches them.
    pub fn invalidate(&self, keys: &[CacheKey]) {
        let mut inner = self.lock();
        let boundary = inner.last_ticket + 1;
        for key in keys {
            tracing::debug!("Invalidating {}", key);
            let entry = inner.entries.entry(*key).or_default();
            entry.stale = true;
            entry.invalidated_before = boundary;
        }
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.lock().entries.get(key).map_or(true, |entry| entry.stale || entry.value.is_none())
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
