//! Resolved contract types.

use crate::abi::{FunctionDescriptor, RawAbi};
use crate::chain::ChainId;
use serde::{Deserialize, Serialize};

/// Human-readable contract metadata from the data source. Best-effort
/// enrichment — resolution proceeds without it when the lookup fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadata {
    /// Contract name as reported by the explorer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the source code is verified on the explorer.
    #[serde(default)]
    pub verified: bool,
}

/// The output of contract resolution: a verified interface plus the
/// projection of its callable functions.
///
/// Immutable once returned. The resolver never caches these — every
/// resolution is a fresh fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedContract {
    /// Normalized (lowercase) contract address.
    pub address: String,

    pub chain_id: ChainId,

    /// The ABI verbatim as returned by the data source, all entry kinds.
    pub abi: RawAbi,

    /// Callable functions in ABI declaration order.
    pub functions: Vec<FunctionDescriptor>,

    /// Optional enrichment; `None` when metadata lookup failed or was
    /// skipped via resolve options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContractMetadata>,
}
