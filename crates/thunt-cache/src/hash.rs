//! FNV-1a checksum over artifact payloads.
//!
//! Detects truncated or partially written files. Not cryptographic.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// 64-bit FNV-1a hash of `bytes`.
///
/// Returns the offset basis for an empty slice.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}
