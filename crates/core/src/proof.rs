//! Proof backend trait — the abstraction over the external
//! proof-generation service.
//!
//! The backend produces the cryptographic authorization artifact once the
//! policy check has passed. Proofgate never inspects or mutates the
//! artifact — it is an opaque passthrough.

use crate::error::ProofError;
use crate::policy::PolicyConfig;
use crate::transaction::TransactionData;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output of the proof-generation backend. Opaque to this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofResult {
    pub proof_id: String,

    /// Backend-specific proof payload, passed through unmodified.
    pub payload: serde_json::Value,

    pub generated_at: DateTime<Utc>,
}

impl ProofResult {
    /// Convenience constructor for backend implementations.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            proof_id: Uuid::new_v4().to_string(),
            payload,
            generated_at: Utc::now(),
        }
    }
}

/// The external proof-generation backend.
///
/// Called by the authorization mediator only after a policy check passes.
/// May suspend on network I/O; the mediator applies its own deadline.
#[async_trait]
pub trait ProofBackend: Send + Sync {
    /// A human-readable name for this backend (e.g. "zk-prover").
    fn name(&self) -> &str;

    /// Generate an authorization proof for a permitted transaction.
    async fn generate_proof(
        &self,
        policy: &PolicyConfig,
        tx: &TransactionData,
    ) -> Result<ProofResult, ProofError>;
}
