//! Function extraction — the deterministic projection from a raw ABI to
//! typed [`FunctionDescriptor`]s.

use proofgate_core::{AbiParam, FunctionDescriptor, RawAbi, StateMutability};
use tracing::trace;

/// Project the callable functions out of a raw ABI.
///
/// One descriptor per entry of kind `function`, in declaration order.
/// Overloads are preserved as distinct entries. Non-function entries
/// (events, errors, constructor, fallback) are excluded. Entries of kind
/// `function` that lack a name are skipped rather than failing the whole
/// projection.
///
/// Deterministic: identical input yields identical ordered output.
pub fn extract_functions(abi: &RawAbi) -> Vec<FunctionDescriptor> {
    abi.iter()
        .filter(|entry| entry["type"].as_str() == Some("function"))
        .filter_map(|entry| {
            let name = entry["name"].as_str()?;
            let inputs = params_of(&entry["inputs"]);
            let outputs = entry["outputs"]
                .as_array()
                .map(|outs| {
                    outs.iter()
                        .filter_map(|o| o["type"].as_str().map(String::from))
                        .collect()
                })
                .unwrap_or_default();
            let state_mutability = StateMutability::parse(entry["stateMutability"].as_str());

            trace!(function = name, "Extracted function descriptor");
            Some(FunctionDescriptor {
                name: name.to_string(),
                inputs,
                outputs,
                state_mutability,
            })
        })
        .collect()
}

fn params_of(value: &serde_json::Value) -> Vec<AbiParam> {
    value
        .as_array()
        .map(|params| {
            params
                .iter()
                .filter_map(|p| {
                    let ty = p["type"].as_str()?;
                    Some(AbiParam {
                        name: p["name"].as_str().unwrap_or_default().to_string(),
                        ty: ty.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erc20_fragment() -> RawAbi {
        serde_json::from_str(
            r#"[
                {"type":"event","name":"Transfer","inputs":[]},
                {"type":"function","name":"balanceOf","stateMutability":"view",
                 "inputs":[{"name":"owner","type":"address"}],
                 "outputs":[{"type":"uint256"}]},
                {"type":"function","name":"transfer","stateMutability":"nonpayable",
                 "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
                 "outputs":[{"type":"bool"}]},
                {"type":"function","name":"transfer","stateMutability":"nonpayable",
                 "inputs":[{"name":"to","type":"address"}],
                 "outputs":[{"type":"bool"}]},
                {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}]},
                {"type":"function","name":"deposit","stateMutability":"payable",
                 "inputs":[],"outputs":[]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn extracts_functions_only_in_declaration_order() {
        let functions = extract_functions(&erc20_fragment());
        let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["balanceOf", "transfer", "transfer", "deposit"]);
    }

    #[test]
    fn overloads_are_distinct_by_signature() {
        let functions = extract_functions(&erc20_fragment());
        let sigs: Vec<String> = functions.iter().map(|f| f.signature()).collect();
        assert!(sigs.contains(&"transfer(address,uint256)".to_string()));
        assert!(sigs.contains(&"transfer(address)".to_string()));
    }

    #[test]
    fn mutability_and_params_carry_through() {
        let functions = extract_functions(&erc20_fragment());
        let balance_of = &functions[0];
        assert_eq!(balance_of.state_mutability, StateMutability::View);
        assert_eq!(balance_of.inputs[0].name, "owner");
        assert_eq!(balance_of.inputs[0].ty, "address");
        assert_eq!(balance_of.outputs, vec!["uint256".to_string()]);
        assert_eq!(functions[3].state_mutability, StateMutability::Payable);
    }

    #[test]
    fn extraction_is_idempotent() {
        let abi = erc20_fragment();
        assert_eq!(extract_functions(&abi), extract_functions(&abi));
    }

    #[test]
    fn empty_abi_yields_empty_functions() {
        assert!(extract_functions(&RawAbi::new()).is_empty());
    }

    #[test]
    fn nameless_function_entry_is_skipped() {
        let abi: RawAbi =
            serde_json::from_str(r#"[{"type":"function","inputs":[],"outputs":[]}]"#).unwrap();
        assert!(extract_functions(&abi).is_empty());
    }

    #[test]
    fn unnamed_params_keep_position() {
        let abi: RawAbi = serde_json::from_str(
            r#"[{"type":"function","name":"swap",
                 "inputs":[{"type":"uint256"},{"type":"uint256"}],"outputs":[]}]"#,
        )
        .unwrap();
        let functions = extract_functions(&abi);
        assert_eq!(functions[0].inputs.len(), 2);
        assert_eq!(functions[0].inputs[0].name, "");
        assert_eq!(functions[0].signature(), "swap(uint256,uint256)");
    }
}
