//! Etherscan-style block-explorer client.
//!
//! Implements [`AbiSource`] against the `module=contract` explorer API
//! family (`action=getabi`, `action=getsourcecode`). One fresh fetch per
//! call — no caching, no retries; retry policy belongs to the caller.

use async_trait::async_trait;
use proofgate_config::ChainRegistry;
use proofgate_core::{AbiSource, ChainId, ContractMetadata, RawAbi, ResolveError};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The marker string explorers return in place of an ABI for contracts
/// whose source is not verified.
const NOT_VERIFIED_MARKER: &str = "not verified";

/// Explorer API response envelope. `result` is a JSON string for `getabi`
/// and an array of objects for `getsourcecode`.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

/// A block-explorer ABI source backed by `reqwest`.
pub struct ExplorerClient {
    registry: Arc<ChainRegistry>,
    client: reqwest::Client,
}

impl ExplorerClient {
    /// Create a client over the given chain registry.
    pub fn new(registry: Arc<ChainRegistry>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("proofgate")
            .build()
            .unwrap_or_default();
        Self { registry, client }
    }

    async fn query(
        &self,
        address: &str,
        chain: ChainId,
        action: &str,
    ) -> Result<Envelope, ResolveError> {
        let entry = self
            .registry
            .get(chain)
            .ok_or(ResolveError::InvalidChain(chain))?;

        let chain_param = chain.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("module", "contract"),
            ("action", action),
            ("address", address),
            ("chainid", chain_param.as_str()),
        ];
        if let Some(key) = entry.api_key.as_deref() {
            params.push(("apikey", key));
        }

        debug!(%address, %chain, action, "Querying block explorer");

        let response = self
            .client
            .get(&entry.explorer_url)
            .query(&params)
            .timeout(Duration::from_secs(entry.timeout_secs))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::Timeout { secs: entry.timeout_secs }
                } else {
                    ResolveError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Explorer API error");
            return Err(ResolveError::Network(format!(
                "explorer returned HTTP {status}"
            )));
        }

        response
            .json::<Envelope>()
            .await
            .map_err(|e| ResolveError::Network(format!("failed to parse explorer response: {e}")))
    }
}

#[async_trait]
impl AbiSource for ExplorerClient {
    fn name(&self) -> &str {
        "etherscan"
    }

    async fn fetch_abi(&self, address: &str, chain: ChainId) -> Result<RawAbi, ResolveError> {
        let envelope = self.query(address, chain, "getabi").await?;
        parse_abi_envelope(address, chain, envelope)
    }

    async fn fetch_metadata(
        &self,
        address: &str,
        chain: ChainId,
    ) -> Result<ContractMetadata, ResolveError> {
        let envelope = self.query(address, chain, "getsourcecode").await?;
        parse_metadata_envelope(address, chain, envelope)
    }
}

/// Interpret a `getabi` envelope. The explorer encodes the ABI array as a
/// JSON string inside `result`; some mirrors return the array directly.
fn parse_abi_envelope(
    address: &str,
    chain: ChainId,
    envelope: Envelope,
) -> Result<RawAbi, ResolveError> {
    if envelope.status != "1" {
        let detail = envelope
            .result
            .as_str()
            .unwrap_or(&envelope.message)
            .to_string();
        if detail.to_lowercase().contains(NOT_VERIFIED_MARKER) {
            return Err(ResolveError::ContractNotVerified {
                address: address.into(),
                chain,
            });
        }
        return Err(ResolveError::Network(detail));
    }

    let parsed = match envelope.result {
        serde_json::Value::String(encoded) => {
            serde_json::from_str::<serde_json::Value>(&encoded).map_err(|e| {
                ResolveError::MalformedAbi {
                    address: address.into(),
                    detail: e.to_string(),
                }
            })?
        }
        other => other,
    };

    match parsed {
        serde_json::Value::Array(entries) => Ok(entries),
        other => Err(ResolveError::MalformedAbi {
            address: address.into(),
            detail: format!("expected a JSON array, got {}", type_name(&other)),
        }),
    }
}

/// Interpret a `getsourcecode` envelope into best-effort metadata.
fn parse_metadata_envelope(
    address: &str,
    chain: ChainId,
    envelope: Envelope,
) -> Result<ContractMetadata, ResolveError> {
    if envelope.status != "1" {
        return Err(ResolveError::Network(format!(
            "metadata lookup failed for {address} on chain {chain}: {}",
            envelope.message
        )));
    }

    let record = envelope
        .result
        .as_array()
        .and_then(|entries| entries.first())
        .cloned()
        .unwrap_or_default();

    let name = record["ContractName"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from);
    let verified = record["ABI"]
        .as_str()
        .is_some_and(|abi| !abi.to_lowercase().contains(NOT_VERIFIED_MARKER));

    Ok(ContractMetadata { name, verified })
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x000000000000000000000000000000000000dead";

    fn envelope(status: &str, result: serde_json::Value) -> Envelope {
        Envelope {
            status: status.into(),
            message: if status == "1" { "OK".into() } else { "NOTOK".into() },
            result,
        }
    }

    #[test]
    fn abi_encoded_as_string_is_decoded() {
        let env = envelope(
            "1",
            serde_json::json!(r#"[{"type":"function","name":"pause","inputs":[],"outputs":[]}]"#),
        );
        let abi = parse_abi_envelope(ADDR, ChainId(1), env).unwrap();
        assert_eq!(abi.len(), 1);
        assert_eq!(abi[0]["name"], "pause");
    }

    #[test]
    fn abi_as_bare_array_is_accepted() {
        let env = envelope("1", serde_json::json!([{"type": "event", "name": "Paused"}]));
        let abi = parse_abi_envelope(ADDR, ChainId(1), env).unwrap();
        assert_eq!(abi.len(), 1);
    }

    #[test]
    fn empty_abi_array_is_not_an_error() {
        let env = envelope("1", serde_json::json!("[]"));
        let abi = parse_abi_envelope(ADDR, ChainId(1), env).unwrap();
        assert!(abi.is_empty());
    }

    #[test]
    fn unverified_contract_maps_to_not_verified() {
        let env = envelope("0", serde_json::json!("Contract source code not verified"));
        let err = parse_abi_envelope(ADDR, ChainId(1), env).unwrap_err();
        assert!(matches!(err, ResolveError::ContractNotVerified { .. }));
    }

    #[test]
    fn other_explorer_errors_map_to_network() {
        let env = envelope("0", serde_json::json!("Invalid API Key"));
        let err = parse_abi_envelope(ADDR, ChainId(1), env).unwrap_err();
        assert!(matches!(err, ResolveError::Network(msg) if msg.contains("Invalid API Key")));
    }

    #[test]
    fn non_array_abi_is_malformed() {
        let env = envelope("1", serde_json::json!(r#"{"not":"an array"}"#));
        let err = parse_abi_envelope(ADDR, ChainId(1), env).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedAbi { .. }));
    }

    #[test]
    fn unparseable_abi_string_is_malformed() {
        let env = envelope("1", serde_json::json!("[{broken"));
        let err = parse_abi_envelope(ADDR, ChainId(1), env).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedAbi { .. }));
    }

    #[test]
    fn metadata_extracts_name_and_verified() {
        let env = envelope(
            "1",
            serde_json::json!([{"ContractName": "WETH9", "ABI": "[...]"}]),
        );
        let meta = parse_metadata_envelope(ADDR, ChainId(1), env).unwrap();
        assert_eq!(meta.name.as_deref(), Some("WETH9"));
        assert!(meta.verified);
    }

    #[test]
    fn metadata_for_unverified_contract() {
        let env = envelope(
            "1",
            serde_json::json!([{"ContractName": "", "ABI": "Contract source code not verified"}]),
        );
        let meta = parse_metadata_envelope(ADDR, ChainId(1), env).unwrap();
        assert!(meta.name.is_none());
        assert!(!meta.verified);
    }

    #[tokio::test]
    async fn unconfigured_chain_fails_before_any_request() {
        let client = ExplorerClient::new(Arc::new(ChainRegistry::new()));
        let err = client.fetch_abi(ADDR, ChainId(42)).await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidChain(ChainId(42))));
    }
}
