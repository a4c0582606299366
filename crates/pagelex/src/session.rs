use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use doctext::Document;
use tracing::debug;
use uuid::Uuid;

/// One uploaded document and everything derived from it at upload time.
///
/// Immutable after creation; the store hands out `Arc`s so lookups keep
/// reading the text while later uploads come and go.
pub struct DocumentSession {
    pub id: String,
    pub filename: String,
    pub document: Document,
    /// Sorted, deduplicated lookup candidates, derived once at upload.
    pub words: Vec<String>,
    created: Instant,
}

/// In-memory session store with TTL and capacity eviction.
pub struct SessionStore {
    sessions: DashMap<String, Arc<DocumentSession>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Store a freshly extracted document under a new random id.
    ///
    /// Expired sessions are dropped first; if the store is still full after
    /// that, the oldest session makes room.
    pub fn insert(
        &self,
        filename: String,
        document: Document,
        words: Vec<String>,
    ) -> Arc<DocumentSession> {
        self.evict_expired();
        while self.sessions.len() >= self.max_sessions {
            let Some(oldest) = self.oldest_id() else { break };
            debug!("evicting session {oldest} to make room");
            self.sessions.remove(&oldest);
        }
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(DocumentSession {
            id: id.clone(),
            filename,
            document,
            words,
            created: Instant::now(),
        });
        self.sessions.insert(id, Arc::clone(&session));
        session
    }

    /// Fetch a live session; expired ones are removed and reported absent.
    pub fn get(&self, id: &str) -> Option<Arc<DocumentSession>> {
        let session = {
            // Scoped so the shard guard is released before any removal.
            let entry = self.sessions.get(id)?;
            Arc::clone(entry.value())
        };
        if session.created.elapsed() > self.ttl {
            self.sessions.remove(id);
            return None;
        }
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_expired(&self) {
        self.sessions
            .retain(|_, session| session.created.elapsed() <= self.ttl);
    }

    fn oldest_id(&self) -> Option<String> {
        self.sessions
            .iter()
            .min_by_key(|entry| entry.value().created)
            .map(|entry| entry.key().clone())
    }
}
