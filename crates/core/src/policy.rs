//! Policy types and the storage/evaluation seams.
//!
//! A policy constrains what transactions an agent may execute for a given
//! user. The store treats [`PolicyConfig`] as an immutable value type;
//! interpretation is owned by a pluggable [`PolicyEvaluator`] so an
//! integrating system can supply its own schema.

use crate::transaction::TransactionData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capability set describing what an agent is permitted to do.
///
/// Both allowlists are deny-by-default: an empty list permits nothing, and
/// `"*"` permits everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Contract addresses the agent may call. Case-insensitive.
    #[serde(default)]
    pub allowed_contracts: Vec<String>,

    /// Function names or full signatures the agent may invoke.
    #[serde(default)]
    pub allowed_functions: Vec<String>,

    /// Per-transaction value ceiling in wei. When absent, only zero-value
    /// calls pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value_wei: Option<u128>,
}

/// A policy plus provenance, as held by the store.
///
/// `created_at` is stamped once, on the first store for a key, and survives
/// overwrites; `updated_at` advances on every store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPolicy {
    pub user_address: String,
    pub agent_id: String,
    pub policy: PolicyConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of evaluating a transaction against a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    /// `rule` names the specific check that failed, for audit logging.
    Deny { rule: String, reason: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Pluggable evaluation strategy: given a policy and a pending transaction,
/// decide allow/deny with a reason. Pure and synchronous.
pub trait PolicyEvaluator: Send + Sync {
    fn evaluate(&self, policy: &PolicyConfig, tx: &TransactionData) -> Decision;
}

/// Storage capability for policies, keyed by `(user_address, agent_id)`.
///
/// The composite key identifies at most one stored policy at any time —
/// store is a last-write-wins map, not a log. User addresses compare
/// case-insensitively. Operations are synchronous, non-suspending, and
/// individually atomic.
///
/// The in-memory implementation lives in `proofgate-policy`; a durable
/// backend can be supplied externally against this same trait.
pub trait PolicyBackend: Send + Sync {
    /// Idempotent overwrite. Never fails. Returns the stored record.
    fn store(&self, user_address: &str, agent_id: &str, policy: PolicyConfig) -> StoredPolicy;

    /// Pure lookup; `None` signals absence rather than an error.
    fn get(&self, user_address: &str, agent_id: &str) -> Option<PolicyConfig>;

    /// Full record lookup including provenance.
    fn get_stored(&self, user_address: &str, agent_id: &str) -> Option<StoredPolicy>;

    /// Returns whether an entry existed and was removed. Idempotent.
    fn remove(&self, user_address: &str, agent_id: &str) -> bool;

    /// Number of stored entries. Observability only.
    fn count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_config_deserializes_with_defaults() {
        let p: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert!(p.allowed_contracts.is_empty());
        assert!(p.allowed_functions.is_empty());
        assert!(p.max_value_wei.is_none());
    }

    #[test]
    fn decision_tags_serialize_snake_case() {
        let d = Decision::Deny {
            rule: "allowed_functions".into(),
            reason: "function not in allowlist".into(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["decision"], "deny");
        assert_eq!(json["rule"], "allowed_functions");
        assert!(!d.is_allowed());
        assert!(Decision::Allow.is_allowed());
    }
}
