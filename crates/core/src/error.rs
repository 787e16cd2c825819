//! Error types for the Proofgate domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use crate::chain::ChainId;
use thiserror::Error;

/// The top-level error type for all Proofgate operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Contract resolution errors ---
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    // --- Authorization errors ---
    #[error("Authorization error: {0}")]
    Auth(#[from] AuthError),

    // --- Proof backend errors ---
    #[error("Proof error: {0}")]
    Proof(#[from] ProofError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures while resolving a contract's interface from a block explorer.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Malformed address — rejected locally, no network call was made.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The chain identifier is not in the configured registry.
    #[error("Chain {0} is not configured")]
    InvalidChain(ChainId),

    /// The data source has no ABI for this address (unverified contract).
    /// Retrying will not change the outcome.
    #[error("Contract {address} is not verified on chain {chain}")]
    ContractNotVerified { address: String, chain: ChainId },

    /// The explorer returned an ABI payload that is not a JSON array.
    #[error("Malformed ABI for {address}: {detail}")]
    MalformedAbi { address: String, detail: String },

    /// Transport-level failure — retryable by the caller with backoff.
    #[error("Network error: {0}")]
    Network(String),

    /// The caller-supplied deadline elapsed.
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Failures while authorizing a transaction against a stored policy.
///
/// Every variant is a denial — the mediator is fail-closed, and none of
/// these are ever downgraded to an allow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No policy is stored for this (user, agent) pair.
    #[error("No policy stored for user '{user_address}' and agent '{agent_id}'")]
    PolicyNotFound {
        user_address: String,
        agent_id: String,
    },

    /// An existing policy disallowed the transaction. `rule` names the
    /// specific check that failed, for audit logging.
    #[error("Policy violation ({rule}): {reason}")]
    PolicyViolation { rule: String, reason: String },

    /// The proof backend itself failed. Distinct from a violation so audit
    /// trails can tell "denied" apart from "backend broke".
    #[error("Proof backend error: {0}")]
    ProofBackend(#[from] ProofError),

    /// Proof generation exceeded the configured deadline.
    #[error("Proof generation timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Failures reported by the external proof-generation backend.
#[derive(Debug, Clone, Error)]
pub enum ProofError {
    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Network error: {0}")]
    Network(String),
}
