use xxhash_rust::xxh3::xxh3_128;

/// Number of hex characters in a full digest.
pub const HEX_DIGEST_LEN: usize = 32;

/// Lowercase hex of the xxh3-128 digest of `input`, always `HEX_DIGEST_LEN` long.
pub fn xxhash_hex(input: &[u8]) -> String {
  format!("{:032x}", xxh3_128(input))
}

#[test]
fn test_xxhash_hex() {
  let digest = xxhash_hex(b"hello");
  assert_eq!(digest.len(), HEX_DIGEST_LEN);
  assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  assert_eq!(digest, xxhash_hex(b"hello"));
  assert_ne!(digest, xxhash_hex(b"hello!"));
}
