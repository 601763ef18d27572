//! Equivalence of hex encoded byte strings.
//!
//! Chain tooling hands out the same bytes in several surface forms: EIP-55 checksummed or
//! lowercase addresses, 32 byte words left-padded with zeros, or short unpadded values. The
//! functions in this module treat all of those as one canonical byte sequence.

use alloc::vec::Vec;
use alloy_primitives::hex;

/// Returns `true` if `value` is a recognizable hex encoded byte string.
///
/// A byte string carries a `0x` (or `0X`) prefix followed only by hex digits. An odd number of
/// digits is accepted and read as if left-padded with a zero nibble. Plain numbers, booleans and
/// identifiers are not byte strings.
pub fn is_valid_byte_string(value: &str) -> bool {
    strip_prefix(value).is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Returns `true` if `a` and `b` denote the same byte sequence.
///
/// Case, prefix notation and leading zero padding are ignored. If either side is not a valid
/// byte string the values are never equal; non-byte values must be compared elsewhere.
pub fn equal_bytes(a: &str, b: &str) -> bool {
    match (decode_byte_string(a), decode_byte_string(b)) {
        (Some(a), Some(b)) => equal_byte_slices(&a, &b),
        _ => false,
    }
}

/// Returns `true` if the two raw byte sequences are equal once leading zero bytes are dropped.
pub fn equal_byte_slices(a: &[u8], b: &[u8]) -> bool {
    trim_leading_zeros(a) == trim_leading_zeros(b)
}

/// Decodes a byte string into its raw bytes, or `None` if `value` is not a byte string.
pub fn decode_byte_string(value: &str) -> Option<Vec<u8>> {
    let digits = strip_prefix(value)?;
    if digits.len() % 2 == 1 {
        let mut padded = alloc::string::String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        hex::decode(padded).ok()
    } else {
        hex::decode(digits).ok()
    }
}

fn strip_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, address};
    use rstest::rstest;

    #[rstest]
    #[case::lowercase_address("0x5a98fcbea516cf06857215779fd812ca3bef1b32", true)]
    #[case::upper_prefix("0XABCDEF", true)]
    #[case::odd_nibbles("0xabc", true)]
    #[case::empty_payload("0x", true)]
    #[case::decimal("12345", false)]
    #[case::boolean("true", false)]
    #[case::identifier("NodeOperatorAdded", false)]
    #[case::non_hex_digit("0xzz", false)]
    #[case::empty("", false)]
    fn test_is_valid_byte_string(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_byte_string(value), expected);
    }

    #[test]
    fn test_checksum_and_lowercase_addresses_are_equal() {
        let checksummed = "0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32";
        let lowercase = "0x5a98fcbea516cf06857215779fd812ca3bef1b32";
        assert!(equal_bytes(checksummed, lowercase));
    }

    #[test]
    fn test_padded_word_equals_short_address() {
        let addr = address!("0x5a98fcbea516cf06857215779fd812ca3bef1b32");
        let word = B256::left_padding_from(addr.as_slice());
        assert!(equal_bytes(&word.to_string(), &addr.to_string()));
        assert!(equal_byte_slices(word.as_slice(), addr.as_slice()));
    }

    #[test]
    fn test_different_addresses_differ() {
        let a = Address::repeat_byte(0x11).to_string();
        let b = Address::repeat_byte(0x12).to_string();
        assert!(!equal_bytes(&a, &b));
    }

    #[test]
    fn test_non_byte_values_are_never_equal() {
        assert!(!equal_bytes("1", "1"));
        assert!(!equal_bytes("0x01", "1"));
    }

    #[test]
    fn test_odd_nibbles_are_left_padded() {
        assert_eq!(decode_byte_string("0xabc"), Some(vec![0x0a, 0xbc]));
        assert!(equal_bytes("0xabc", "0x0000abc"));
    }
}
