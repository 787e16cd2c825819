//! Contract resolution orchestration.

use crate::address::{is_valid_address, normalize_address};
use crate::extract::extract_functions;
use proofgate_core::{AbiSource, ChainId, ResolveError, ResolvedContract};
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a single resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Attempt the metadata lookup at all. When false, `metadata` is `None`
    /// without any extra network call.
    pub include_metadata: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { include_metadata: true }
    }
}

/// Orchestrates address validation, ABI fetching, and function extraction.
///
/// Holds no state between calls and caches nothing — every resolution is a
/// fresh fetch against the data source.
pub struct ContractResolver {
    source: Arc<dyn AbiSource>,
}

impl ContractResolver {
    pub fn new(source: Arc<dyn AbiSource>) -> Self {
        Self { source }
    }

    /// Resolve a contract's interface.
    ///
    /// Fails with `InvalidAddress` before any network call when the address
    /// is malformed. Fetch failures propagate with their kind unchanged.
    /// Metadata failure alone never fails the resolution.
    pub async fn resolve_contract(
        &self,
        address: &str,
        chain: ChainId,
        options: ResolveOptions,
    ) -> Result<ResolvedContract, ResolveError> {
        if !is_valid_address(address) {
            return Err(ResolveError::InvalidAddress(address.to_string()));
        }
        let address = normalize_address(address);

        let abi = self.source.fetch_abi(&address, chain).await?;

        let metadata = if options.include_metadata {
            match self.source.fetch_metadata(&address, chain).await {
                Ok(meta) => Some(meta),
                Err(e) => {
                    debug!(%address, %chain, error = %e, "Metadata lookup failed, continuing without");
                    None
                }
            }
        } else {
            None
        };

        let functions = extract_functions(&abi);
        info!(
            %address,
            %chain,
            functions = functions.len(),
            entries = abi.len(),
            "Contract resolved"
        );

        Ok(ResolvedContract {
            address,
            chain_id: chain,
            abi,
            functions,
            metadata,
        })
    }
}
