//! Authorization mediator — the layer between a pending agent transaction
//! and the proof-generation backend.
//!
//! # Flow
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  authorize   │───▶│ PolicyBackend │    │ ProofBackend │
//! │ (user,agent, │    │   lookup      │    │ generate     │
//! │  tx)         │    └──────────────┘    └──────────────┘
//! └─────────────┘           │                    ▲
//!                    ┌──────┴───────┐            │
//!                    │  Evaluator   │── allow ───┘
//!                    │  deny ──▶ PolicyViolation
//!                    └──────────────┘
//! ```
//!
//! Strictly **fail-closed**: a missing policy, a deny decision, a backend
//! failure, or a deadline overrun each surface as a distinct denial — never
//! a silent pass-through. The proof backend is only ever contacted after a
//! positive policy decision.

use proofgate_core::{
    AuthError, Decision, PolicyBackend, PolicyEvaluator, ProofBackend, ProofResult,
    TransactionData,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

const DEFAULT_PROOF_TIMEOUT_SECS: u64 = 30;

/// Mediates between stored policies and the proof backend.
pub struct Authorizer {
    store: Arc<dyn PolicyBackend>,
    evaluator: Arc<dyn PolicyEvaluator>,
    backend: Arc<dyn ProofBackend>,
    proof_timeout: Duration,
}

impl Authorizer {
    pub fn new(
        store: Arc<dyn PolicyBackend>,
        evaluator: Arc<dyn PolicyEvaluator>,
        backend: Arc<dyn ProofBackend>,
    ) -> Self {
        Self {
            store,
            evaluator,
            backend,
            proof_timeout: Duration::from_secs(DEFAULT_PROOF_TIMEOUT_SECS),
        }
    }

    /// Override the proof-generation deadline.
    pub fn with_proof_timeout(mut self, timeout: Duration) -> Self {
        self.proof_timeout = timeout;
        self
    }

    /// Authorize a pending transaction for a `(user, agent)` pair and, if
    /// permitted, obtain a proof from the backend.
    ///
    /// The returned [`ProofResult`] is passed through unchanged.
    pub async fn authorize(
        &self,
        user_address: &str,
        agent_id: &str,
        tx: &TransactionData,
    ) -> Result<ProofResult, AuthError> {
        let request_id = Uuid::new_v4();

        let Some(policy) = self.store.get(user_address, agent_id) else {
            warn!(
                %request_id,
                user = %user_address,
                agent = %agent_id,
                "Authorization DENIED: no policy stored"
            );
            return Err(AuthError::PolicyNotFound {
                user_address: user_address.to_string(),
                agent_id: agent_id.to_string(),
            });
        };

        if let Decision::Deny { rule, reason } = self.evaluator.evaluate(&policy, tx) {
            warn!(
                %request_id,
                user = %user_address,
                agent = %agent_id,
                contract = %tx.to,
                function = %tx.function,
                rule = %rule,
                "Authorization DENIED: {reason}"
            );
            return Err(AuthError::PolicyViolation { rule, reason });
        }

        debug!(
            %request_id,
            contract = %tx.to,
            function = %tx.function,
            backend = self.backend.name(),
            "Policy check passed, requesting proof"
        );

        match tokio::time::timeout(self.proof_timeout, self.backend.generate_proof(&policy, tx))
            .await
        {
            Err(_) => {
                warn!(%request_id, "Proof generation timed out");
                Err(AuthError::Timeout {
                    secs: self.proof_timeout.as_secs(),
                })
            }
            Ok(Err(e)) => {
                warn!(%request_id, error = %e, "Proof backend failed");
                Err(AuthError::ProofBackend(e))
            }
            Ok(Ok(proof)) => {
                info!(
                    %request_id,
                    proof_id = %proof.proof_id,
                    user = %user_address,
                    agent = %agent_id,
                    "Authorization granted"
                );
                Ok(proof)
            }
        }
    }
}
