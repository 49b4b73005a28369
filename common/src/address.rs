use alloy_primitives::Address;

use crate::{
    constants::EVM_ADDRESS_LEN,
    error::{CodecError, Result},
};

/// Decodes `input` into exactly `width` bytes.
///
/// A leading `0x` is stripped. Non-hex characters, an odd digit count or any
/// decoded length other than `width` fail with `InvalidHexAddress`; the input is
/// never truncated or zero padded.
pub fn hex_to_fixed_bytes(input: &str, width: usize) -> Result<Vec<u8>> {
    let digits = input.strip_prefix("0x").unwrap_or(input);

    let bytes = hex::decode(digits)
        .map_err(|e| CodecError::InvalidHexAddress(format!("{input:?}: {e}")))?;

    if bytes.len() != width {
        return Err(CodecError::InvalidHexAddress(format!(
            "{input:?} decodes to {} bytes, expected {width}",
            bytes.len()
        )));
    }

    Ok(bytes)
}

pub fn hex_to_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = hex_to_fixed_bytes(input, N)?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| CodecError::InvalidHexAddress(format!("{input:?} is not {N} bytes")))
}

/// Parses a 20-byte EVM account identifier (ZetaChain recipient).
pub fn parse_evm_address(input: &str) -> Result<Address> {
    hex_to_array::<EVM_ADDRESS_LEN>(input).map(Address::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

    #[test]
    fn test_prefixed_address_decodes_to_twenty_bytes() {
        let bytes = hex_to_fixed_bytes(RECIPIENT, 20).unwrap();

        assert_eq!(bytes.len(), 20);
        assert_eq!(bytes[0], 0x74);
        assert_eq!(bytes[19], 0x4e);
    }

    #[test]
    fn test_prefix_is_optional() {
        let with_prefix = hex_to_fixed_bytes(RECIPIENT, 20).unwrap();
        let without_prefix = hex_to_fixed_bytes(&RECIPIENT[2..], 20).unwrap();

        assert_eq!(with_prefix, without_prefix);
    }

    #[test]
    fn test_non_hex_characters_fail() {
        let input = format!("0x{}", "zz".repeat(20));

        let result = hex_to_fixed_bytes(&input, 20);
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));

        let result = hex_to_fixed_bytes("not-hex", 20);
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));
    }

    #[test]
    fn test_oversized_input_is_not_truncated() {
        // 42 hex digits = 21 bytes
        let input = format!("0x{}", "ab".repeat(21));

        let result = hex_to_fixed_bytes(&input, 20);
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));
    }

    #[test]
    fn test_short_input_is_not_padded() {
        let result = hex_to_fixed_bytes("0xabcd", 20);
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));
    }

    #[test]
    fn test_odd_digit_count_fails() {
        let input = format!("0x{}a", "ab".repeat(19));

        let result = hex_to_fixed_bytes(&input, 20);
        assert!(matches!(result, Err(CodecError::InvalidHexAddress(_))));
    }

    #[test]
    fn test_parse_evm_address() {
        let address = parse_evm_address(RECIPIENT).unwrap();

        assert_eq!(address.to_string().to_lowercase(), RECIPIENT.to_lowercase());
        assert_eq!(address.as_slice(), hex_to_fixed_bytes(RECIPIENT, 20).unwrap());
    }
}
