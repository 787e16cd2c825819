//! Pending transaction description.

use serde::{Deserialize, Serialize};

/// A pending call an agent wants authorized — checked against a stored
/// policy before proof generation is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// Target contract address.
    pub to: String,

    /// Function name or full signature (`transfer` or
    /// `transfer(address,uint256)`).
    pub function: String,

    /// Call arguments, JSON-encoded positionally.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,

    /// Native value attached to the call, in wei.
    #[serde(default)]
    pub value: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_and_args_default_to_empty() {
        let tx: TransactionData = serde_json::from_str(
            r#"{"to":"0x000000000000000000000000000000000000dead","function":"pause"}"#,
        )
        .unwrap();
        assert_eq!(tx.value, 0);
        assert!(tx.args.is_empty());
    }

    #[test]
    fn large_value_round_trips() {
        let tx = TransactionData {
            to: "0x000000000000000000000000000000000000beef".into(),
            function: "deposit".into(),
            args: vec![],
            value: 10_u128.pow(24),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: TransactionData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, 10_u128.pow(24));
    }
}
