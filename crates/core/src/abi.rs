//! ABI types and the data-source trait.
//!
//! A contract's ABI arrives from a block explorer as an ordered JSON array
//! of interface-entry descriptors. The raw array is retained verbatim on
//! the resolved contract; callable functions are additionally projected
//! into typed [`FunctionDescriptor`]s.

use crate::chain::ChainId;
use crate::contract::ContractMetadata;
use crate::error::ResolveError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The raw ABI exactly as returned by the data source. May be empty.
/// Entries keep their declaration order; non-function entries (events,
/// errors, constructor) are preserved here even though they are excluded
/// from the function projection.
pub type RawAbi = Vec<serde_json::Value>;

/// A single named, typed parameter of a contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name. May be empty — Solidity allows unnamed parameters.
    #[serde(default)]
    pub name: String,

    /// Canonical type string (e.g. `address`, `uint256`, `bytes32[]`).
    #[serde(rename = "type")]
    pub ty: String,
}

/// State mutability of a contract function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

impl StateMutability {
    /// Parse the `stateMutability` field of an ABI entry. Unknown or
    /// missing values map to `Nonpayable` (the pre-0.4.16 Solidity default).
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("pure") => Self::Pure,
            Some("view") => Self::View,
            Some("payable") => Self::Payable,
            _ => Self::Nonpayable,
        }
    }
}

/// A callable contract function, derived deterministically from the raw ABI.
///
/// Overloaded functions are preserved as distinct descriptors and
/// disambiguated by [`FunctionDescriptor::signature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,

    /// Input parameters in declaration order.
    pub inputs: Vec<AbiParam>,

    /// Output types in declaration order.
    pub outputs: Vec<String>,

    pub state_mutability: StateMutability,
}

impl FunctionDescriptor {
    /// The full signature, `name(type,type,...)` — unique per overload.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// The block-explorer-equivalent data source.
///
/// Implementations query a chain-specific explorer for a contract's ABI and
/// metadata. No retries, no caching — freshness is prioritized because a
/// stale contract interface is a correctness risk, and retry policy belongs
/// to the caller.
#[async_trait]
pub trait AbiSource: Send + Sync {
    /// A human-readable name for this source (e.g. "etherscan").
    fn name(&self) -> &str;

    /// Fetch the raw ABI for a contract.
    ///
    /// The address must already be validated by the caller.
    async fn fetch_abi(&self, address: &str, chain: ChainId) -> Result<RawAbi, ResolveError>;

    /// Fetch human-readable contract metadata (name, verified flag).
    ///
    /// Consumers treat this as enrichment: the resolver degrades gracefully
    /// when it fails rather than failing the whole resolution.
    async fn fetch_metadata(
        &self,
        address: &str,
        chain: ChainId,
    ) -> Result<ContractMetadata, ResolveError>;
}
