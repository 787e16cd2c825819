//! Address validation — pure string checks, no side effects.

/// Check that a string is a well-formed EVM address: `0x` prefix followed
/// by exactly 40 hex characters. Mixed-case (EIP-55 checksum style) input
/// is accepted as-is; checksums are not verified here. Never panics.
pub fn is_valid_address(input: &str) -> bool {
    let Some(hex) = input.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Lowercase a valid address for use as a key. Callers must validate first;
/// invalid input is returned lowercased but remains invalid.
pub fn normalize_address(input: &str) -> String {
    input.to_lowercase()
}
