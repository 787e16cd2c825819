//! In-memory policy store.
//!
//! Thread-safe, last-write-wins map keyed by `(user_address, agent_id)`.
//! User addresses compare case-insensitively (keys are lowercased on entry).
//! Operations are synchronous and individually atomic; no lock is ever held
//! across a suspension point.

use chrono::Utc;
use proofgate_core::{
    PolicyBackend, PolicyConfig, PolicyEvent, PolicyEventSink, StoredPolicy, TracingEventSink,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The in-memory [`PolicyBackend`] implementation.
///
/// Constructed explicitly and shared via `Arc` — there is no global
/// singleton instance. Observability goes through an injected
/// [`PolicyEventSink`] so the store itself stays free of logging
/// side effects.
pub struct PolicyStore {
    entries: RwLock<HashMap<(String, String), StoredPolicy>>,
    sink: Arc<dyn PolicyEventSink>,
}

impl PolicyStore {
    /// Create a store that reports events through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingEventSink))
    }

    /// Create a store with a custom event sink.
    pub fn with_sink(sink: Arc<dyn PolicyEventSink>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            sink,
        }
    }

    fn key(user_address: &str, agent_id: &str) -> (String, String) {
        (user_address.to_lowercase(), agent_id.to_string())
    }

    /// Drop all entries. Teardown/test hook.
    pub fn clear(&self) {
        let dropped = {
            let mut entries = self.entries.write().unwrap();
            let n = entries.len();
            entries.clear();
            n
        };
        self.sink.emit(&PolicyEvent::Cleared { dropped, timestamp: Utc::now() });
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBackend for PolicyStore {
    fn store(&self, user_address: &str, agent_id: &str, policy: PolicyConfig) -> StoredPolicy {
        let key = Self::key(user_address, agent_id);
        let now = Utc::now();

        let (record, replaced) = {
            let mut entries = self.entries.write().unwrap();
            let created_at = entries.get(&key).map(|prev| prev.created_at);
            let replaced = created_at.is_some();
            let record = StoredPolicy {
                user_address: key.0.clone(),
                agent_id: key.1.clone(),
                policy,
                created_at: created_at.unwrap_or(now),
                updated_at: now,
            };
            entries.insert(key, record.clone());
            (record, replaced)
        };

        self.sink.emit(&PolicyEvent::Stored {
            user_address: record.user_address.clone(),
            agent_id: record.agent_id.clone(),
            replaced,
            timestamp: now,
        });
        record
    }

    fn get(&self, user_address: &str, agent_id: &str) -> Option<PolicyConfig> {
        self.entries
            .read()
            .unwrap()
            .get(&Self::key(user_address, agent_id))
            .map(|record| record.policy.clone())
    }

    fn get_stored(&self, user_address: &str, agent_id: &str) -> Option<StoredPolicy> {
        self.entries
            .read()
            .unwrap()
            .get(&Self::key(user_address, agent_id))
            .cloned()
    }

    fn remove(&self, user_address: &str, agent_id: &str) -> bool {
        let key = Self::key(user_address, agent_id);
        let removed = self.entries.write().unwrap().remove(&key).is_some();
        if removed {
            self.sink.emit(&PolicyEvent::Removed {
                user_address: key.0,
                agent_id: key.1,
                timestamp: Utc::now(),
            });
        }
        removed
    }

    fn count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
