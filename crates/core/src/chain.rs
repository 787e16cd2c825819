//! Chain identifiers.
//!
//! A [`ChainId`] selects which block-explorer configuration to use. The
//! chain-configuration registry (the `proofgate-config` crate) is ground
//! truth for which identifiers are valid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric chain identifier (EVM convention: 1 = Ethereum mainnet,
/// 8453 = Base, 11155111 = Sepolia, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
