//! Capability-set policy evaluation.
//!
//! The default [`PolicyEvaluator`]: checks the transaction's target
//! contract, function, and attached value against the policy's capability
//! set. Deny-by-default throughout — an empty allowlist permits nothing,
//! and a missing value ceiling permits only zero-value calls.

use proofgate_core::{Decision, PolicyConfig, PolicyEvaluator, TransactionData};
use tracing::debug;

/// Rule names surfaced in deny decisions, for audit logging.
const RULE_CONTRACTS: &str = "allowed_contracts";
const RULE_FUNCTIONS: &str = "allowed_functions";
const RULE_MAX_VALUE: &str = "max_value_wei";

/// Deny-by-default capability evaluation over contracts, functions, and
/// transaction value. Checks run in that order; the first failure names
/// its rule.
#[derive(Debug, Default, Clone)]
pub struct CapabilityEvaluator;

impl CapabilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn check_contract(policy: &PolicyConfig, tx: &TransactionData) -> Option<Decision> {
        if policy.allowed_contracts.is_empty() {
            return Some(deny(RULE_CONTRACTS, "no contracts allowed (deny by default)"));
        }
        if policy.allowed_contracts.iter().any(|c| c == "*") {
            return None;
        }
        let target = tx.to.to_lowercase();
        if policy
            .allowed_contracts
            .iter()
            .any(|c| c.to_lowercase() == target)
        {
            None
        } else {
            Some(deny(
                RULE_CONTRACTS,
                format!(
                    "contract '{}' not in allowlist ({} configured)",
                    tx.to,
                    policy.allowed_contracts.len()
                ),
            ))
        }
    }

    fn check_function(policy: &PolicyConfig, tx: &TransactionData) -> Option<Decision> {
        if policy.allowed_functions.is_empty() {
            return Some(deny(RULE_FUNCTIONS, "no functions allowed (deny by default)"));
        }
        if policy.allowed_functions.iter().any(|f| f == "*") {
            return None;
        }
        // A policy entry matches the bare name or the full signature;
        // a signature-form transaction also matches its bare-name entry.
        let requested = tx.function.as_str();
        let requested_name = requested.split('(').next().unwrap_or(requested);
        if policy
            .allowed_functions
            .iter()
            .any(|f| f == requested || f == requested_name)
        {
            None
        } else {
            Some(deny(
                RULE_FUNCTIONS,
                format!("function '{}' not in allowlist", tx.function),
            ))
        }
    }

    fn check_value(policy: &PolicyConfig, tx: &TransactionData) -> Option<Decision> {
        match policy.max_value_wei {
            Some(max) if tx.value > max => Some(deny(
                RULE_MAX_VALUE,
                format!("value {} wei exceeds ceiling {} wei", tx.value, max),
            )),
            None if tx.value > 0 => Some(deny(
                RULE_MAX_VALUE,
                "no value ceiling configured, only zero-value calls allowed",
            )),
            _ => None,
        }
    }
}

fn deny(rule: &str, reason: impl Into<String>) -> Decision {
    Decision::Deny {
        rule: rule.into(),
        reason: reason.into(),
    }
}

impl PolicyEvaluator for CapabilityEvaluator {
    fn evaluate(&self, policy: &PolicyConfig, tx: &TransactionData) -> Decision {
        let decision = Self::check_contract(policy, tx)
            .or_else(|| Self::check_function(policy, tx))
            .or_else(|| Self::check_value(policy, tx))
            .unwrap_or(Decision::Allow);

        debug!(
            contract = %tx.to,
            function = %tx.function,
            value = tx.value,
            allowed = decision.is_allowed(),
            "Capability evaluation"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAD: &str = "0x000000000000000000000000000000000000dEaD";
    const BEEF: &str = "0x000000000000000000000000000000000000bEEF";

    fn tx(to: &str, function: &str, value: u128) -> TransactionData {
        TransactionData {
            to: to.into(),
            function: function.into(),
            args: vec![],
            value,
        }
    }

    fn transfer_policy() -> PolicyConfig {
        PolicyConfig {
            allowed_contracts: vec![DEAD.to_lowercase()],
            allowed_functions: vec!["transfer".into()],
            max_value_wei: Some(1_000),
        }
    }

    fn assert_denied_by(decision: Decision, expected_rule: &str) {
        match decision {
            Decision::Deny { rule, .. } => assert_eq!(rule, expected_rule),
            Decision::Allow => panic!("expected deny by rule '{expected_rule}'"),
        }
    }

    #[test]
    fn allows_matching_call() {
        let decision = CapabilityEvaluator.evaluate(&transfer_policy(), &tx(DEAD, "transfer", 500));
        assert!(decision.is_allowed());
    }

    #[test]
    fn contract_comparison_is_case_insensitive() {
        let decision = CapabilityEvaluator
            .evaluate(&transfer_policy(), &tx(&DEAD.to_uppercase().replace("0X", "0x"), "transfer", 0));
        assert!(decision.is_allowed());
    }

    #[test]
    fn denies_other_contract() {
        let decision = CapabilityEvaluator.evaluate(&transfer_policy(), &tx(BEEF, "transfer", 0));
        assert_denied_by(decision, "allowed_contracts");
    }

    #[test]
    fn denies_other_function() {
        let decision = CapabilityEvaluator.evaluate(&transfer_policy(), &tx(DEAD, "approve", 0));
        assert_denied_by(decision, "allowed_functions");
    }

    #[test]
    fn empty_lists_deny_by_default() {
        let decision =
            CapabilityEvaluator.evaluate(&PolicyConfig::default(), &tx(DEAD, "transfer", 0));
        assert_denied_by(decision, "allowed_contracts");
    }

    #[test]
    fn wildcards_allow_any_target() {
        let policy = PolicyConfig {
            allowed_contracts: vec!["*".into()],
            allowed_functions: vec!["*".into()],
            max_value_wei: Some(u128::MAX),
        };
        assert!(CapabilityEvaluator.evaluate(&policy, &tx(BEEF, "anything", 42)).is_allowed());
    }

    #[test]
    fn value_over_ceiling_denied() {
        let decision = CapabilityEvaluator.evaluate(&transfer_policy(), &tx(DEAD, "transfer", 1_001));
        assert_denied_by(decision, "max_value_wei");
    }

    #[test]
    fn value_at_ceiling_allowed() {
        let decision = CapabilityEvaluator.evaluate(&transfer_policy(), &tx(DEAD, "transfer", 1_000));
        assert!(decision.is_allowed());
    }

    #[test]
    fn missing_ceiling_allows_only_zero_value() {
        let policy = PolicyConfig {
            allowed_contracts: vec!["*".into()],
            allowed_functions: vec!["*".into()],
            max_value_wei: None,
        };
        assert!(CapabilityEvaluator.evaluate(&policy, &tx(DEAD, "transfer", 0)).is_allowed());
        assert_denied_by(
            CapabilityEvaluator.evaluate(&policy, &tx(DEAD, "transfer", 1)),
            "max_value_wei",
        );
    }

    #[test]
    fn signature_entry_matches_signature_call() {
        let policy = PolicyConfig {
            allowed_contracts: vec!["*".into()],
            allowed_functions: vec!["transfer(address,uint256)".into()],
            max_value_wei: None,
        };
        assert!(
            CapabilityEvaluator
                .evaluate(&policy, &tx(DEAD, "transfer(address,uint256)", 0))
                .is_allowed()
        );
        // A different overload does not match.
        assert_denied_by(
            CapabilityEvaluator.evaluate(&policy, &tx(DEAD, "transfer(address)", 0)),
            "allowed_functions",
        );
    }

    #[test]
    fn bare_name_entry_matches_signature_call() {
        let policy = PolicyConfig {
            allowed_contracts: vec!["*".into()],
            allowed_functions: vec!["transfer".into()],
            max_value_wei: None,
        };
        assert!(
            CapabilityEvaluator
                .evaluate(&policy, &tx(DEAD, "transfer(address,uint256)", 0))
                .is_allowed()
        );
    }

    #[test]
    fn deny_reason_names_the_offender() {
        match CapabilityEvaluator.evaluate(&transfer_policy(), &tx(BEEF, "transfer", 0)) {
            Decision::Deny { reason, .. } => assert!(reason.contains(BEEF)),
            Decision::Allow => panic!("expected deny"),
        }
    }
}
