//! Policy store observability events.
//!
//! The store emits structured events through an injected sink instead of
//! logging directly, so its core logic stays side-effect-free and testable
//! in isolation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Events emitted by the policy store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PolicyEvent {
    /// A policy was stored. `replaced` is true on overwrite.
    Stored {
        user_address: String,
        agent_id: String,
        replaced: bool,
        timestamp: DateTime<Utc>,
    },

    /// A policy was removed.
    Removed {
        user_address: String,
        agent_id: String,
        timestamp: DateTime<Utc>,
    },

    /// All policies were dropped (teardown).
    Cleared {
        dropped: usize,
        timestamp: DateTime<Utc>,
    },
}

/// Sink for policy store events.
pub trait PolicyEventSink: Send + Sync {
    fn emit(&self, event: &PolicyEvent);
}

/// Default sink: forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl PolicyEventSink for TracingEventSink {
    fn emit(&self, event: &PolicyEvent) {
        match event {
            PolicyEvent::Stored { user_address, agent_id, replaced, .. } => {
                info!(user = %user_address, agent = %agent_id, replaced, "Policy stored");
            }
            PolicyEvent::Removed { user_address, agent_id, .. } => {
                info!(user = %user_address, agent = %agent_id, "Policy removed");
            }
            PolicyEvent::Cleared { dropped, .. } => {
                debug!(dropped, "Policy store cleared");
            }
        }
    }
}
